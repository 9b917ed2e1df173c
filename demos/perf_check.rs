use hashspace::{HashSpace, Query};

fn main() {
    // Initialize Rayon explicitly so thread creation (clone3) happens
    // before the heavy calculation we want to profile.
    rayon::ThreadPoolBuilder::new().build_global().unwrap();

    // 64 units per side and up to 10,000 objects
    let mut space = HashSpace::new(6, 10_000);
    space.scatter(123456789);

    // One query per entity per frame, the way an animation loop would
    let mut neighbours = Query::new(500);
    let mut nearest = Query::new(6);
    let radius = space.max_radius() as f64 * 0.1;

    for frame in 0..60 {
        let t = frame as f64 / 60.0;
        for id in 0..space.num_objects() as u32 {
            let p = space.object(id).unwrap().position();
            space.move_object(id, [p[0] + t.sin() * 0.05, p[1] + t.cos() * 0.05, p[2]]).unwrap();
        }

        let mut total = 0;
        for id in (0..space.num_objects() as u32).step_by(10) {
            neighbours.clear();
            total += neighbours.search_from(&space, id, radius, 0.0).unwrap();
            nearest.nearest(&space, id).unwrap();
        }
        if frame % 20 == 0 {
            println!("frame {:2}: {} neighbours found", frame, total);
        }
    }

    // and the whole population at once
    let all = space.nearest_each(6);
    println!("{} objects have a nearest neighbour", all.iter().filter(|n| n.is_some()).count());
}
