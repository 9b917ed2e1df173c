use std::ops::Index;

use crate::error::Result;
use crate::object::{Object, ObjectId};
use crate::space::HashSpace;

/// Default cap on the number of results a [`Query`] keeps.
pub const DEFAULT_MAX_RESULTS: usize = 128;

/// One match of a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryResult {
    pub object: ObjectId,
    pub distance_squared: f64,
}

impl QueryResult {
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }
}

/// Reusable scratch buffer for neighbour searches.
///
/// Create one per caller and keep it around: searches append to the buffer
/// without reallocating, so several searches can be aggregated into one
/// result set. Call [`clear`](Self::clear) between independent searches.
///
/// Results come out roughly sorted by distance: shell by shell, and in voxel
/// list order within a shell. Once the buffer holds `max_results` matches the
/// scan stops, so a full buffer holds the first matches in that order, not
/// necessarily the closest ones.
///
/// ```
/// use hashspace::{HashSpace, Query};
///
/// let mut space = HashSpace::new(5, 3);
/// space.move_object(0, [1.0, 1.0, 1.0]).unwrap();
/// space.move_object(1, [2.0, 1.0, 1.0]).unwrap();
/// space.move_object(2, [20.0, 20.0, 20.0]).unwrap();
///
/// let mut query = Query::new(16);
/// let found = query.search(&space, [1.0, 1.0, 1.0], 3.0, 0.0);
/// assert_eq!(found, 2);
/// assert_eq!(query.nearest(&space, 0).unwrap(), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct Query {
    max_results: usize,
    results: Vec<QueryResult>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

impl Query {
    pub fn new(max_results: usize) -> Self {
        Self {
            max_results,
            results: Vec::with_capacity(max_results),
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Changes the cap. Results already held beyond the new cap are kept until
    /// the next [`clear`](Self::clear).
    pub fn set_max_results(&mut self, max_results: usize) -> &mut Self {
        self.max_results = max_results;
        self.results.reserve(max_results.saturating_sub(self.results.len()));
        self
    }

    /// Drops all results, keeping the buffer's capacity.
    pub fn clear(&mut self) -> &mut Self {
        self.results.clear();
        self
    }

    /// Appends every object whose toroidal distance from `center` lies in
    /// `[min_radius, max_radius]`, up to the result cap.
    ///
    /// `center` is wrapped into the space first. Radii above
    /// [`HashSpace::max_radius`] are allowed; the scan then covers the whole
    /// space. Returns the number of results added.
    pub fn search(
        &mut self,
        space: &HashSpace,
        center: [f64; 3],
        max_radius: f64,
        min_radius: f64,
    ) -> usize {
        let center = space.wrap_vec(center);
        self.scan(space, center, None, max_radius, min_radius)
    }

    /// Like [`search`](Self::search), centred on object `id` and skipping it.
    pub fn search_from(
        &mut self,
        space: &HashSpace,
        id: ObjectId,
        max_radius: f64,
        min_radius: f64,
    ) -> Result<usize> {
        let object = space.object(id)?;
        Ok(self.search_around(space, object, max_radius, min_radius))
    }

    pub(crate) fn search_around(
        &mut self,
        space: &HashSpace,
        object: &Object,
        max_radius: f64,
        min_radius: f64,
    ) -> usize {
        self.scan(space, object.position, Some(object.id), max_radius, min_radius)
    }

    /// Searches the whole space around `center`.
    pub fn search_all(&mut self, space: &HashSpace, center: [f64; 3]) -> usize {
        self.search(space, center, space.max_radius() as f64, 0.0)
    }

    /// Searches the whole space around object `id`.
    pub fn search_all_from(&mut self, space: &HashSpace, id: ObjectId) -> Result<usize> {
        self.search_from(space, id, space.max_radius() as f64, 0.0)
    }

    /// Exact nearest neighbour of object `id` within
    /// [`HashSpace::max_radius`].
    ///
    /// Clears the buffer, collects candidates with a full-radius search, then
    /// picks the minimum distance. Only the first `max_results` candidates are
    /// considered, so a small cap trades exactness for speed in dense spaces.
    pub fn nearest(&mut self, space: &HashSpace, id: ObjectId) -> Result<Option<ObjectId>> {
        let object = space.object(id)?;
        Ok(self.nearest_to(space, object))
    }

    pub(crate) fn nearest_to(&mut self, space: &HashSpace, object: &Object) -> Option<ObjectId> {
        self.clear();
        self.search_around(space, object, space.max_radius() as f64, 0.0);
        self.results
            .iter()
            .min_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared))
            .map(|r| r.object)
    }

    fn scan(
        &mut self,
        space: &HashSpace,
        center: [f64; 3],
        skip: Option<ObjectId>,
        max_radius: f64,
        min_radius: f64,
    ) -> usize {
        let before = self.results.len();
        if before >= self.max_results || max_radius < 0.0 || max_radius.is_nan() {
            return 0;
        }
        let min_radius = min_radius.max(0.0);
        let min_r2 = min_radius * min_radius;
        let max_r2 = max_radius * max_radius;
        let hasher = space.hasher();
        let shells = space.shells();

        let band = shells.band_for_radii(max_radius, min_radius);
        'shells: for &offset in shells.band(band.start, band.end) {
            let hash = hasher.hash_position_offset(&center, offset);
            for object in space.voxel_members(hash) {
                if Some(object.id) == skip {
                    continue;
                }
                let d2 = hasher.distance_squared(&center, &object.position);
                if d2 >= min_r2 && d2 <= max_r2 {
                    self.results.push(QueryResult {
                        object: object.id,
                        distance_squared: d2,
                    });
                    if self.results.len() >= self.max_results {
                        break 'shells;
                    }
                }
            }
        }
        self.results.len() - before
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[QueryResult] {
        &self.results
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryResult> {
        self.results.iter()
    }

    pub fn get(&self, i: usize) -> Option<&QueryResult> {
        self.results.get(i)
    }

    /// Id of the `i`-th result.
    pub fn object(&self, i: usize) -> ObjectId {
        self.results[i].object
    }

    pub fn distance_squared(&self, i: usize) -> f64 {
        self.results[i].distance_squared
    }

    pub fn distance(&self, i: usize) -> f64 {
        self.results[i].distance()
    }

    /// Sorts the held results by exact distance. Searches never do this on
    /// their own.
    pub fn sort_by_distance(&mut self) -> &mut Self {
        self.results.sort_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared));
        self
    }
}

impl Index<usize> for Query {
    type Output = QueryResult;

    fn index(&self, i: usize) -> &QueryResult {
        &self.results[i]
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = &'a QueryResult;
    type IntoIter = std::slice::Iter<'a, QueryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
