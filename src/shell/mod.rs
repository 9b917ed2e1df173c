use std::ops::Range;

use crate::hasher::VoxelHasher;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Relative voxel offsets sorted by squared length.
///
/// Built once from the resolution. Every offset in the half-space cube
/// `[-dim/2, dim/2)³` appears exactly once, so the table also maps one-to-one
/// onto the voxels of the torus. Offsets are bucketed by their integer squared
/// length `d = dx² + dy² + dz²`, which runs over `0 ..= 3·(dim/2)²`.
#[derive(Clone, Debug)]
pub struct ShellTable {
    flat_offsets: Vec<u32>,
    distance_to_offset_start: Vec<u32>,
}

impl ShellTable {
    pub fn new(hasher: &VoxelHasher) -> Self {
        let half = hasher.half_dim() as i32;
        let shell_count = 3 * (half * half) as usize + 1;

        let mut shells: Vec<Vec<u32>> = vec![Vec::new(); shell_count];
        for x in -half..half {
            for y in -half..half {
                for z in -half..half {
                    let d = (x * x + y * y + z * z) as usize;
                    shells[d].push(hasher.hash(x as u32, y as u32, z as u32));
                }
            }
        }

        let mut flat_offsets = Vec::with_capacity(hasher.num_voxels());
        let mut distance_to_offset_start = Vec::with_capacity(shell_count + 1);
        for shell in &shells {
            // empty shells repeat the running start
            distance_to_offset_start.push(flat_offsets.len() as u32);
            flat_offsets.extend_from_slice(shell);
        }
        distance_to_offset_start.push(flat_offsets.len() as u32);

        Self {
            flat_offsets,
            distance_to_offset_start,
        }
    }

    /// Number of distinct squared lengths the table is keyed by.
    pub fn shell_count(&self) -> usize {
        self.distance_to_offset_start.len() - 1
    }

    pub fn flat_offsets(&self) -> &[u32] {
        &self.flat_offsets
    }

    pub fn distance_to_offset_start(&self) -> &[u32] {
        &self.distance_to_offset_start
    }

    /// Offsets whose squared length lies in `[d0, d1)`, in increasing order.
    /// Bounds past the table saturate.
    pub fn band(&self, d0: usize, d1: usize) -> &[u32] {
        let last = self.shell_count();
        let d1 = d1.min(last);
        let d0 = d0.min(d1);
        let start = self.distance_to_offset_start[d0] as usize;
        let end = self.distance_to_offset_start[d1] as usize;
        &self.flat_offsets[start..end]
    }

    /// Squared-length band that must be visited to find every object whose
    /// true distance lies in `[min_radius, max_radius]`.
    ///
    /// An object sits within one voxel of its truncated position on every
    /// axis, so its voxel offset length and its true distance differ by at
    /// most the voxel diagonal `√3`.
    pub fn band_for_radii(&self, max_radius: f64, min_radius: f64) -> Range<usize> {
        let last = self.shell_count();
        let shell = |d2: f64| {
            if d2 >= last as f64 {
                last
            } else {
                d2.floor() as usize
            }
        };
        let inner = (min_radius - SQRT_3).max(0.0);
        let outer = max_radius.max(0.0) + SQRT_3;
        let start = shell(inner * inner);
        let end = (shell(outer * outer) + 1).min(last);
        start.min(end)..end
    }
}
