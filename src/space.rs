use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::{Result, SpaceError};
use crate::hasher::VoxelHasher;
use crate::object::{Membership, Object, ObjectId, Payload};
use crate::shell::ShellTable;
use crate::voxel::{Members, Voxel};

/// Smallest accepted resolution (2 voxels per side).
pub const MIN_RESOLUTION: u32 = 1;
/// Largest accepted resolution (1024 voxels per side), so a hash fits in 30 bits.
pub const MAX_RESOLUTION: u32 = 10;
/// Largest registry a space can hold, since ids are `u32`.
pub const MAX_OBJECTS: usize = ObjectId::MAX as usize;

/// Slot count for a registry of `n`, clipped to [`MAX_OBJECTS`].
fn object_count(n: usize) -> ObjectId {
    ObjectId::try_from(n).unwrap_or_else(|_| {
        tracing::warn!(requested = n, clipped = MAX_OBJECTS, "object count clipped");
        ObjectId::MAX
    })
}

/// Construction parameters for a [`HashSpace`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpaceConfig {
    /// Bits per axis; the space is `2^resolution` units per side.
    pub resolution: u32,
    /// Object slots to preallocate.
    pub num_objects: usize,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            resolution: 5,
            num_objects: 0,
        }
    }
}

impl SpaceConfig {
    /// Builds a space, clipping the resolution like [`HashSpace::new`].
    pub fn build(&self) -> HashSpace {
        HashSpace::new(self.resolution, self.num_objects)
    }
}

/// A toroidal voxel grid tracking a fixed number of point objects.
///
/// Positions live in `[0, dim)` on every axis and the space wraps around at
/// the edges. Objects are moved in with [`move_object`](Self::move_object),
/// hidden with [`remove`](Self::remove), and found with a [`Query`](crate::Query).
///
/// The space has no internal locking. It is safe to share immutably, e.g. for
/// parallel queries, but any mutation needs exclusive access.
#[derive(Clone, Debug)]
pub struct HashSpace {
    hasher: VoxelHasher,
    objects: Vec<Object>,
    voxels: Vec<Voxel>,
    shells: ShellTable,
}

impl Default for HashSpace {
    fn default() -> Self {
        SpaceConfig::default().build()
    }
}

impl HashSpace {
    /// Creates a space of `2^resolution` voxels per side with `num_objects`
    /// unlinked slots.
    ///
    /// `resolution` is clipped into `[1, 10]` and `num_objects` to
    /// [`MAX_OBJECTS`]. Use [`try_new`](Self::try_new) to reject them instead.
    pub fn new(resolution: u32, num_objects: usize) -> Self {
        let clipped = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        if clipped != resolution {
            tracing::warn!(requested = resolution, clipped, "resolution clipped");
        }
        Self::build(clipped, num_objects)
    }

    /// Like [`new`](Self::new) but fails on a resolution outside `[1, 10]`
    /// or more than [`MAX_OBJECTS`] slots.
    pub fn try_new(resolution: u32, num_objects: usize) -> Result<Self> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(SpaceError::InvalidResolution { resolution });
        }
        if num_objects > MAX_OBJECTS {
            return Err(SpaceError::TooManyObjects {
                requested: num_objects,
            });
        }
        Ok(Self::build(resolution, num_objects))
    }

    pub fn from_config(config: &SpaceConfig) -> Self {
        config.build()
    }

    fn build(resolution: u32, num_objects: usize) -> Self {
        let hasher = VoxelHasher::new(resolution);
        let shells = ShellTable::new(&hasher);
        tracing::debug!(
            resolution,
            dim = hasher.dim(),
            voxels = hasher.num_voxels(),
            shells = shells.shell_count(),
            offsets = shells.flat_offsets().len(),
            "hash space built"
        );
        Self {
            hasher,
            objects: (0..object_count(num_objects)).map(Object::new).collect(),
            voxels: vec![Voxel::default(); hasher.num_voxels()],
            shells,
        }
    }

    /// Units (and voxels) per side.
    pub fn dim(&self) -> u32 {
        self.hasher.dim()
    }

    pub fn resolution(&self) -> u32 {
        self.hasher.resolution()
    }

    /// The largest meaningful query radius, `dim / 2`.
    pub fn max_radius(&self) -> u32 {
        self.hasher.half_dim()
    }

    pub fn hasher(&self) -> &VoxelHasher {
        &self.hasher
    }

    pub fn shells(&self) -> &ShellTable {
        &self.shells
    }

    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// Resizes the registry to `n` fresh slots.
    ///
    /// This is a full reset, not a grow or shrink: every slot comes back
    /// unlinked with a sequential id and `Payload::Id(id)`, and every voxel is
    /// emptied. `n` is clipped to [`MAX_OBJECTS`].
    pub fn set_num_objects(&mut self, n: usize) {
        tracing::debug!(from = self.objects.len(), to = n, "resetting object registry");
        self.objects.clear();
        self.objects.extend((0..object_count(n)).map(Object::new));
        self.voxels.iter_mut().for_each(Voxel::clear);
    }

    pub fn object(&self, id: ObjectId) -> Result<&Object> {
        self.objects.get(id as usize).ok_or(SpaceError::ObjectOutOfRange {
            id,
            len: self.objects.len(),
        })
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    fn check(&self, id: ObjectId) -> Result<usize> {
        let index = id as usize;
        if index < self.objects.len() {
            Ok(index)
        } else {
            Err(SpaceError::ObjectOutOfRange {
                id,
                len: self.objects.len(),
            })
        }
    }

    pub fn set_payload(&mut self, id: ObjectId, payload: Payload) -> Result<&mut Self> {
        let index = self.check(id)?;
        self.objects[index].payload = payload;
        Ok(self)
    }

    /// Places an object at `pos`, wrapped into the space.
    ///
    /// The stored position always updates. The object is only relinked when
    /// its voxel changes; moving within a voxel keeps its place in the list.
    pub fn move_object(&mut self, id: ObjectId, pos: [f64; 3]) -> Result<&mut Self> {
        let index = self.check(id)?;
        self.place(index, pos);
        Ok(self)
    }

    fn place(&mut self, index: usize, pos: [f64; 3]) {
        let id = index as ObjectId;
        let wrapped = self.hasher.wrap_vec(pos);
        let new_hash = self.hasher.hash_position(&wrapped);

        let object = &mut self.objects[index];
        object.position = wrapped;
        let old = object.membership;
        if old == Membership::Linked(new_hash) {
            return;
        }

        if let Membership::Linked(old_hash) = old {
            self.voxels[old_hash as usize].unlink(&mut self.objects, id);
        }
        self.voxels[new_hash as usize].link(&mut self.objects, id);
        self.objects[index].membership = Membership::Linked(new_hash);
    }

    pub fn move_xyz(&mut self, id: ObjectId, x: f64, y: f64, z: f64) -> Result<&mut Self> {
        self.move_object(id, [x, y, z])
    }

    /// Hides an object from queries. The slot stays allocated and can be
    /// placed again with [`move_object`](Self::move_object).
    pub fn remove(&mut self, id: ObjectId) -> Result<&mut Self> {
        let index = self.check(id)?;
        if let Membership::Linked(hash) = self.objects[index].membership {
            self.voxels[hash as usize].unlink(&mut self.objects, id);
            self.objects[index].membership = Membership::Unlinked;
        }
        Ok(self)
    }

    pub fn num_voxels(&self) -> usize {
        self.voxels.len()
    }

    pub fn voxel(&self, hash: u32) -> Option<&Voxel> {
        self.voxels.get(hash as usize)
    }

    /// Members of one voxel in list order; empty for an unknown hash.
    pub fn voxel_members(&self, hash: u32) -> Members<'_> {
        self.voxels
            .get(hash as usize)
            .copied()
            .unwrap_or_default()
            .members(&self.objects)
    }

    pub fn wrap(&self, x: f64) -> f64 {
        self.hasher.wrap(x)
    }

    pub fn wrap_relative(&self, x: f64) -> f64 {
        self.hasher.wrap_relative(x)
    }

    pub fn wrap_vec(&self, v: [f64; 3]) -> [f64; 3] {
        self.hasher.wrap_vec(v)
    }

    pub fn wrap_relative_vec(&self, v: [f64; 3]) -> [f64; 3] {
        self.hasher.wrap_relative_vec(v)
    }

    /// Shortest toroidal displacement from `from` to `to`.
    pub fn displacement(&self, from: [f64; 3], to: [f64; 3]) -> [f64; 3] {
        self.hasher.wrap_relative_vec([to[0] - from[0], to[1] - from[1], to[2] - from[2]])
    }

    /// Moves every slot to a uniformly random position.
    pub fn scatter(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let dim = self.dim() as f64;
        for index in 0..self.objects.len() {
            let pos = [
                rng.r#gen::<f64>() * dim,
                rng.r#gen::<f64>() * dim,
                rng.r#gen::<f64>() * dim,
            ];
            self.place(index, pos);
        }
    }
}
