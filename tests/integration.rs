use hashspace::{HashSpace, Query, SpaceConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn brute_force_distance_sq(space: &HashSpace, a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = space.displacement(a, b);
    d[0] * d[0] + d[1] * d[1] + d[2] * d[2]
}

#[test]
fn test_radius_search_agrees_with_brute_force() {
    // 32 units per side, 100 objects, radius 5, at most 50 results
    let mut space = HashSpace::new(5, 100);
    let mut query = Query::new(50);
    let mut rng = StdRng::seed_from_u64(2024);

    for _layout in 0..50 {
        for id in 0..100 {
            let x = rng.gen_range(0.0..32.0);
            let y = rng.gen_range(0.0..32.0);
            let z = rng.gen_range(0.0..32.0);
            space.move_xyz(id, x, y, z).unwrap();
        }
        let center = [
            rng.gen_range(0.0..32.0),
            rng.gen_range(0.0..32.0),
            rng.gen_range(0.0..32.0),
        ];

        query.clear();
        let found = query.search(&space, center, 5.0, 0.0);
        assert_eq!(found, query.len());
        assert!(found <= 50);

        for r in &query {
            let pos = space.object(r.object).unwrap().position();
            let d2 = brute_force_distance_sq(&space, center, pos);
            assert!(d2 <= 25.0, "object {} is {} away", r.object, d2.sqrt());
            assert!((d2 - r.distance_squared).abs() < 1e-9);
        }

        let expected: Vec<u32> = space
            .objects()
            .filter(|o| brute_force_distance_sq(&space, center, o.position()) <= 25.0)
            .map(|o| o.id())
            .collect();
        if expected.len() < 50 {
            let mut got: Vec<u32> = query.iter().map(|r| r.object).collect();
            got.sort();
            assert_eq!(got, expected);
        } else {
            assert_eq!(found, 50);
        }
    }
}

#[test]
fn test_removed_object_is_invisible() {
    let mut space = HashSpace::new(3, 1);
    space.move_xyz(0, 0.0, 0.0, 0.0).unwrap();
    space.remove(0).unwrap();

    for hash in 0..space.num_voxels() as u32 {
        assert_eq!(space.voxel_members(hash).count(), 0, "voxel {} still lists it", hash);
    }

    let mut query = Query::default();
    for x in 0..8 {
        for y in 0..8 {
            for z in 0..8 {
                query.clear();
                let center = [x as f64 + 0.5, y as f64 + 0.5, z as f64 + 0.5];
                assert_eq!(query.search_all(&space, center), 0);
            }
        }
    }
}

#[test]
fn test_neighbours_across_the_seam() {
    let mut space = HashSpace::new(3, 2);
    space.move_xyz(0, 0.0, 0.0, 0.0).unwrap();
    space.move_xyz(1, 7.0, 0.0, 0.0).unwrap();

    let a = space.object(0).unwrap().position();
    let b = space.object(1).unwrap().position();
    assert_eq!(space.wrap_relative(b[0] - a[0]), -1.0);
    assert_eq!(space.displacement(a, b), [-1.0, 0.0, 0.0]);

    let mut query = Query::default();
    assert_eq!(query.search_from(&space, 0, 2.0, 0.0).unwrap(), 1);
    assert_eq!(query.object(0), 1);
    query.clear();
    assert_eq!(query.search_from(&space, 1, 2.0, 0.0).unwrap(), 1);
    assert_eq!(query.object(0), 0);
    assert_eq!(query.distance_squared(0), 1.0);
}

#[test]
fn test_repeated_move_does_not_duplicate() {
    let mut space = HashSpace::new(4, 3);
    space.move_xyz(0, 3.2, 3.2, 3.2).unwrap();
    space.move_xyz(1, 3.7, 3.1, 3.9).unwrap();
    let hash = space.object(0).unwrap().voxel().unwrap();
    let before: Vec<u32> = space.voxel_members(hash).map(|o| o.id()).collect();

    space.move_xyz(0, 3.2, 3.2, 3.2).unwrap();
    space.move_xyz(0, 19.2, -12.8, 3.2).unwrap();

    let after: Vec<u32> = space.voxel_members(hash).map(|o| o.id()).collect();
    assert_eq!(before, after);
    assert_eq!(after.len(), 2);
}

#[test]
fn test_config_builds_space() {
    let space = HashSpace::from_config(&SpaceConfig { resolution: 4, num_objects: 10 });
    assert_eq!(space.dim(), 16);
    assert_eq!(space.max_radius(), 8);
    assert_eq!(space.num_objects(), 10);
    assert!(space.objects().all(|o| !o.is_linked()));
}
