use rayon::prelude::*;

use crate::object::ObjectId;
use crate::query::{Query, QueryResult};
use crate::space::HashSpace;

impl HashSpace {
    /// Runs one [`Query::search_from`] per object in parallel.
    ///
    /// Entry `i` holds the neighbours of object `i`; unlinked objects get an
    /// empty list. Each worker reuses a single query buffer.
    pub fn search_each(
        &self,
        max_radius: f64,
        min_radius: f64,
        max_results: usize,
    ) -> Vec<Vec<QueryResult>> {
        (0..self.num_objects() as ObjectId)
            .into_par_iter()
            .map_init(
                || Query::new(max_results),
                |query, id| {
                    query.clear();
                    match self.object(id) {
                        Ok(o) if o.is_linked() => {
                            query.search_around(self, o, max_radius, min_radius);
                            query.results().to_vec()
                        }
                        _ => Vec::new(),
                    }
                },
            )
            .collect()
    }

    /// Nearest neighbour of every object, computed in parallel.
    ///
    /// Unlinked objects, and objects with no neighbour within
    /// [`max_radius`](Self::max_radius), map to `None`.
    pub fn nearest_each(&self, max_results: usize) -> Vec<Option<ObjectId>> {
        (0..self.num_objects() as ObjectId)
            .into_par_iter()
            .map_init(
                || Query::new(max_results),
                |query, id| match self.object(id) {
                    Ok(o) if o.is_linked() => query.nearest_to(self, o),
                    _ => None,
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_each_matches_serial_queries() {
        let mut space = HashSpace::new(4, 60);
        space.scatter(11);
        space.remove(3).unwrap();

        let batched = space.search_each(3.0, 0.0, 64);
        assert_eq!(batched.len(), 60);
        assert!(batched[3].is_empty());

        let mut query = Query::new(64);
        for id in [0, 17, 42] {
            query.clear();
            query.search_from(&space, id, 3.0, 0.0).unwrap();
            assert_eq!(batched[id as usize], query.results());
        }
    }

    #[test]
    fn test_nearest_each_matches_serial_queries() {
        let mut space = HashSpace::new(4, 40);
        space.scatter(5);
        let batched = space.nearest_each(128);
        let mut query = Query::default();
        for id in 0..40 {
            assert_eq!(batched[id as usize], query.nearest(&space, id).unwrap());
        }
    }
}
