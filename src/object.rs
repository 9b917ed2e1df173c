use std::any::Any;
use std::fmt;
use std::sync::Weak;

/// Stable identity of an object slot, equal to its index in the registry.
pub type ObjectId = u32;

/// Which voxel, if any, an object is currently listed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Membership {
    /// Not part of any voxel; invisible to queries.
    #[default]
    Unlinked,
    /// Listed in the voxel with this hash.
    Linked(u32),
}

/// A tag the caller can attach to an object.
///
/// The space never dereferences or owns the external variant: it is a weak
/// back-reference, and keeping its target alive is the caller's business.
#[derive(Clone)]
pub enum Payload {
    /// A small integer tag. Slots start out tagged with their own id.
    Id(u32),
    /// A non-owning reference to caller state.
    External(Weak<dyn Any + Send + Sync>),
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Id(id) => f.debug_tuple("Id").field(id).finish(),
            Payload::External(weak) => write!(f, "External(alive: {})", weak.strong_count() > 0),
        }
    }
}

/// One tracked point.
///
/// The sibling links are indices into the registry, forming a circular
/// doubly linked list per voxel. They are meaningless while unlinked.
#[derive(Clone, Debug)]
pub struct Object {
    pub(crate) id: ObjectId,
    pub(crate) position: [f64; 3],
    pub(crate) membership: Membership,
    pub(crate) next: ObjectId,
    pub(crate) prev: ObjectId,
    pub(crate) payload: Payload,
}

impl Object {
    pub(crate) fn new(id: ObjectId) -> Self {
        Self {
            id,
            position: [0.0; 3],
            membership: Membership::Unlinked,
            next: id,
            prev: id,
            payload: Payload::Id(id),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The last position passed to `move_object`, wrapped into `[0, dim)`.
    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    pub fn membership(&self) -> Membership {
        self.membership
    }

    /// Hash of the voxel holding this object, `None` while unlinked.
    pub fn voxel(&self) -> Option<u32> {
        match self.membership {
            Membership::Linked(hash) => Some(hash),
            Membership::Unlinked => None,
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self.membership, Membership::Linked(_))
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}
