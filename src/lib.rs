//! # hashspace
//!
//! `hashspace` is a Rust library for tracking a large, moving population of points in a
//! toroidal 3D space and asking "what is near here?" many times per frame. It can be used
//! from Rust as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Voxel hashing**: the space is `2^resolution` voxels per side; a voxel's packed
//!   coordinates double as its index, so moving an object is O(1).
//! - **Shell table**: voxel offsets are pre-sorted by distance once, so a radius search
//!   only touches the voxels that can hold a match, nearest first.
//! - **Toroidal**: positions wrap at the edges and every distance takes the short way round.
//! - **Parallel batches**: [`HashSpace::search_each`] and [`HashSpace::nearest_each`] query
//!   every object at once with `rayon`.
//!
//! ## Example
//!
//! ```
//! use hashspace::{HashSpace, Query};
//!
//! let mut space = HashSpace::new(3, 2);
//! space.move_object(0, [0.0, 0.0, 0.0]).unwrap();
//! space.move_object(1, [7.0, 0.0, 0.0]).unwrap();
//!
//! // The two objects are one unit apart across the seam.
//! let mut query = Query::default();
//! assert_eq!(query.search_from(&space, 0, 2.0, 0.0).unwrap(), 1);
//! assert_eq!(query.object(0), 1);
//! assert_eq!(query.distance(0), 1.0);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry points are [`HashSpace`], which owns the objects and voxels, and
//! [`Query`], a reusable search buffer.

mod batch;
mod error;
mod hasher;
mod object;
mod query;
mod shell;
mod space;
mod voxel;
pub mod wasm;

pub use error::{Result, SpaceError};
pub use hasher::VoxelHasher;
pub use object::{Membership, Object, ObjectId, Payload};
pub use query::{DEFAULT_MAX_RESULTS, Query, QueryResult};
pub use shell::ShellTable;
pub use space::{HashSpace, MAX_OBJECTS, MAX_RESOLUTION, MIN_RESOLUTION, SpaceConfig};
pub use voxel::{Members, Voxel};
