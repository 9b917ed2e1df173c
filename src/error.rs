//! Error types for hash space operations.

use crate::object::ObjectId;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpaceError>;

/// Errors arising from space construction or object access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpaceError {
    /// An object id does not name a slot of the registry.
    #[error("object {id} out of range: space holds {len} objects")]
    ObjectOutOfRange {
        /// The offending id.
        id: ObjectId,
        /// Number of slots in the registry.
        len: usize,
    },

    /// The requested resolution cannot be represented in a 32-bit hash.
    #[error("resolution {resolution} outside [1, 10]")]
    InvalidResolution {
        /// The rejected resolution.
        resolution: u32,
    },

    /// More object slots were requested than `u32` ids can name.
    #[error("{requested} objects requested, at most {max} fit", max = crate::space::MAX_OBJECTS)]
    TooManyObjects {
        /// The rejected slot count.
        requested: usize,
    },
}
