/// Packs toroidal voxel coordinates into a single `u32` and folds real
/// coordinates back into the domain.
///
/// With `resolution` bits per axis the layout is `z | y | x`, each field
/// `resolution` bits wide, so the hash doubles as the voxel array index.
/// All axis arithmetic wraps by masking, which is exact because `dim` is a
/// power of two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelHasher {
    shift: u32,
    shift2: u32,
    dim: u32,
    mask: u32,
}

impl VoxelHasher {
    /// Creates a hasher for `2^resolution` voxels per side.
    ///
    /// `resolution` must already lie in `[1, 10]`.
    pub fn new(resolution: u32) -> Self {
        let dim = 1 << resolution;
        Self {
            shift: resolution,
            shift2: resolution * 2,
            dim,
            mask: dim - 1,
        }
    }

    /// Bits per axis.
    pub fn resolution(&self) -> u32 {
        self.shift
    }

    /// Voxels per side.
    pub fn dim(&self) -> u32 {
        self.dim
    }

    /// Half the side length, the largest meaningful query radius.
    pub fn half_dim(&self) -> u32 {
        self.dim / 2
    }

    /// Total number of voxels, `dim³`.
    pub fn num_voxels(&self) -> usize {
        (self.dim as usize).pow(3)
    }

    /// Packs integer axis indices. Indices outside `[0, dim)` wrap, so a
    /// negative offset cast with `as u32` hashes to its toroidal image.
    #[inline]
    pub fn hash(&self, x: u32, y: u32, z: u32) -> u32 {
        (x & self.mask) | ((y & self.mask) << self.shift) | ((z & self.mask) << self.shift2)
    }

    /// Hashes an already wrapped position by truncating each axis.
    #[inline]
    pub fn hash_position(&self, pos: &[f64; 3]) -> u32 {
        self.hash(pos[0] as u32, pos[1] as u32, pos[2] as u32)
    }

    /// Unpacks a hash into its axis indices, each in `[0, dim)`.
    #[inline]
    pub fn unhash(&self, h: u32) -> [u32; 3] {
        [
            h & self.mask,
            (h >> self.shift) & self.mask,
            (h >> self.shift2) & self.mask,
        ]
    }

    /// Hash of `unhash(offset) + (x, y, z)`, wrapped on every axis.
    ///
    /// `offset` is a relative hash from the shell table and `(x, y, z)` the
    /// absolute voxel of a query origin.
    #[inline]
    pub fn hash_offset(&self, x: u32, y: u32, z: u32, offset: u32) -> u32 {
        let [ox, oy, oz] = self.unhash(offset);
        self.hash(ox.wrapping_add(x), oy.wrapping_add(y), oz.wrapping_add(z))
    }

    /// Same as [`hash_offset`](Self::hash_offset) for a wrapped real position.
    #[inline]
    pub fn hash_position_offset(&self, pos: &[f64; 3], offset: u32) -> u32 {
        self.hash_offset(pos[0] as u32, pos[1] as u32, pos[2] as u32, offset)
    }

    /// Folds `x` into `[0, dim)`.
    #[inline]
    pub fn wrap(&self, x: f64) -> f64 {
        let dim = self.dim as f64;
        if (0.0..dim).contains(&x) {
            return x;
        }
        let folded = x.rem_euclid(dim);
        // rem_euclid rounds tiny negatives up to exactly `dim`
        if folded < dim { folded } else { 0.0 }
    }

    /// Folds a displacement into `[-dim/2, dim/2)`, the shorter way round.
    #[inline]
    pub fn wrap_relative(&self, x: f64) -> f64 {
        let half = self.half_dim() as f64;
        self.wrap(x + half) - half
    }

    /// Component-wise [`wrap`](Self::wrap).
    #[inline]
    pub fn wrap_vec(&self, v: [f64; 3]) -> [f64; 3] {
        [self.wrap(v[0]), self.wrap(v[1]), self.wrap(v[2])]
    }

    /// Component-wise [`wrap_relative`](Self::wrap_relative).
    #[inline]
    pub fn wrap_relative_vec(&self, v: [f64; 3]) -> [f64; 3] {
        [
            self.wrap_relative(v[0]),
            self.wrap_relative(v[1]),
            self.wrap_relative(v[2]),
        ]
    }

    /// Squared length of the shortest toroidal displacement from `a` to `b`.
    #[inline]
    pub fn distance_squared(&self, a: &[f64; 3], b: &[f64; 3]) -> f64 {
        let dx = self.wrap_relative(b[0] - a[0]);
        let dy = self.wrap_relative(b[1] - a[1]);
        let dz = self.wrap_relative(b[2] - a[2]);
        dx * dx + dy * dy + dz * dz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_layout() {
        let h = VoxelHasher::new(3);
        assert_eq!(h.hash(1, 0, 0), 1);
        assert_eq!(h.hash(0, 1, 0), 8);
        assert_eq!(h.hash(0, 0, 1), 64);
        assert_eq!(h.hash(7, 7, 7), 511);
        // out of range indices wrap
        assert_eq!(h.hash(8, 9, 0), h.hash(0, 1, 0));
    }

    #[test]
    fn test_negative_offset_wraps() {
        let h = VoxelHasher::new(3);
        let minus_one = h.hash(-1i32 as u32, 0, 0);
        assert_eq!(h.unhash(minus_one), [7, 0, 0]);
        assert_eq!(h.hash_offset(0, 2, 3, minus_one), h.hash(7, 2, 3));
        assert_eq!(h.hash_offset(5, 2, 3, minus_one), h.hash(4, 2, 3));
    }

    #[test]
    fn test_unhash_round_trip_all_voxels() {
        for resolution in 1..=4 {
            let h = VoxelHasher::new(resolution);
            for v in 0..h.num_voxels() as u32 {
                let [x, y, z] = h.unhash(v);
                assert_eq!(h.hash(x, y, z), v, "resolution {}", resolution);
            }
        }
    }

    #[test]
    fn test_wrap_fast_path_and_edges() {
        let h = VoxelHasher::new(3);
        assert_eq!(h.wrap(3.5), 3.5);
        assert_eq!(h.wrap(0.0), 0.0);
        assert_eq!(h.wrap(8.0), 0.0);
        assert_eq!(h.wrap(9.25), 1.25);
        assert_eq!(h.wrap(-1.0), 7.0);
        assert_eq!(h.wrap(-17.5), 6.5);
        assert!(h.wrap(-1e-20) < 8.0);
    }

    #[test]
    fn test_wrap_relative_takes_short_way() {
        let h = VoxelHasher::new(3);
        assert_eq!(h.wrap_relative(7.0), -1.0);
        assert_eq!(h.wrap_relative(-7.0), 1.0);
        assert_eq!(h.wrap_relative(3.0), 3.0);
        assert_eq!(h.wrap_relative(4.0), -4.0);
        assert_eq!(h.distance_squared(&[0.0, 0.0, 0.0], &[7.0, 0.0, 0.0]), 1.0);
    }

    proptest! {
        #[test]
        fn wrap_lands_in_domain(resolution in 1u32..=10, x in -1.0e6f64..1.0e6) {
            let h = VoxelHasher::new(resolution);
            let w = h.wrap(x);
            prop_assert!(w >= 0.0 && w < h.dim() as f64);
        }

        #[test]
        fn wrap_relative_lands_in_half_range(resolution in 1u32..=10, x in -1.0e6f64..1.0e6) {
            let h = VoxelHasher::new(resolution);
            let half = h.half_dim() as f64;
            let w = h.wrap_relative(x);
            prop_assert!(w >= -half && w < half);
        }

        #[test]
        fn unhash_inverts_hash(resolution in 1u32..=10, seed in any::<u32>()) {
            let h = VoxelHasher::new(resolution);
            let v = seed % h.num_voxels() as u32;
            let [x, y, z] = h.unhash(v);
            prop_assert_eq!(h.hash(x, y, z), v);
        }
    }
}
