use crate::object::{Object, ObjectId};

/// One grid cell: the head of a circular doubly linked list of objects.
///
/// Links live in the objects themselves, so adding or removing a member is
/// O(1) and never scans the list. Not thread-safe.
#[derive(Clone, Copy, Debug, Default)]
pub struct Voxel {
    head: Option<ObjectId>,
}

impl Voxel {
    pub fn head(&self) -> Option<ObjectId> {
        self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends `id` at the tail of the list.
    pub(crate) fn link(&mut self, objects: &mut [Object], id: ObjectId) {
        match self.head {
            Some(head) => {
                let last = objects[head as usize].prev;
                objects[last as usize].next = id;
                objects[head as usize].prev = id;
                let o = &mut objects[id as usize];
                o.prev = last;
                o.next = head;
            }
            None => {
                let o = &mut objects[id as usize];
                o.prev = id;
                o.next = id;
                self.head = Some(id);
            }
        }
    }

    /// Detaches `id`, which must currently be a member.
    pub(crate) fn unlink(&mut self, objects: &mut [Object], id: ObjectId) {
        let (prev, next) = {
            let o = &objects[id as usize];
            (o.prev, o.next)
        };
        if prev == id {
            // sole member
            self.head = None;
        } else {
            objects[prev as usize].next = next;
            objects[next as usize].prev = prev;
            if self.head == Some(id) {
                self.head = Some(next);
            }
        }
        let o = &mut objects[id as usize];
        o.prev = id;
        o.next = id;
    }

    pub(crate) fn clear(&mut self) {
        self.head = None;
    }

    /// Walks the list once, starting at the head.
    pub fn members<'a>(&self, objects: &'a [Object]) -> Members<'a> {
        Members {
            objects,
            head: self.head,
            cursor: self.head,
        }
    }
}

/// Iterator over the members of one voxel, in list order.
pub struct Members<'a> {
    objects: &'a [Object],
    head: Option<ObjectId>,
    cursor: Option<ObjectId>,
}

impl<'a> Iterator for Members<'a> {
    type Item = &'a Object;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        let object = &self.objects[current as usize];
        self.cursor = Some(object.next).filter(|&next| Some(next) != self.head);
        Some(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(n: u32) -> Vec<Object> {
        (0..n).map(Object::new).collect()
    }

    fn ids(voxel: &Voxel, objects: &[Object]) -> Vec<ObjectId> {
        voxel.members(objects).map(|o| o.id()).collect()
    }

    #[test]
    fn test_link_appends_at_tail() {
        let mut objects = registry(4);
        let mut voxel = Voxel::default();
        for id in [2, 0, 3] {
            voxel.link(&mut objects, id);
        }
        assert_eq!(voxel.head(), Some(2));
        assert_eq!(ids(&voxel, &objects), vec![2, 0, 3]);
        // circular in both directions
        assert_eq!(objects[3].next, 2);
        assert_eq!(objects[2].prev, 3);
    }

    #[test]
    fn test_unlink_head_advances() {
        let mut objects = registry(3);
        let mut voxel = Voxel::default();
        for id in 0..3 {
            voxel.link(&mut objects, id);
        }
        voxel.unlink(&mut objects, 0);
        assert_eq!(voxel.head(), Some(1));
        assert_eq!(ids(&voxel, &objects), vec![1, 2]);
    }

    #[test]
    fn test_unlink_middle_and_last() {
        let mut objects = registry(3);
        let mut voxel = Voxel::default();
        for id in 0..3 {
            voxel.link(&mut objects, id);
        }
        voxel.unlink(&mut objects, 1);
        assert_eq!(ids(&voxel, &objects), vec![0, 2]);
        voxel.unlink(&mut objects, 2);
        assert_eq!(ids(&voxel, &objects), vec![0]);
        voxel.unlink(&mut objects, 0);
        assert!(voxel.is_empty());
        assert_eq!(voxel.members(&objects).count(), 0);
    }
}
