use crate::query::Query;
use crate::space::HashSpace;
use crate::wasm::utils::get_seed;
use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

// --- HashSpace ---

/// WASM wrapper for [`HashSpace`]. Positions cross the boundary as flat
/// `[x, y, z, x, y, z, ...]` arrays.
#[wasm_bindgen(js_name = HashSpace3D)]
pub struct HashSpace3D {
    inner: HashSpace,
}

#[wasm_bindgen(js_class = HashSpace3D)]
impl HashSpace3D {
    #[wasm_bindgen(constructor)]
    pub fn new(resolution: u32, num_objects: usize) -> HashSpace3D {
        HashSpace3D {
            inner: HashSpace::new(resolution, num_objects),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn dim(&self) -> u32 {
        self.inner.dim()
    }

    #[wasm_bindgen(getter)]
    pub fn max_radius(&self) -> u32 {
        self.inner.max_radius()
    }

    #[wasm_bindgen(getter)]
    pub fn num_objects(&self) -> usize {
        self.inner.num_objects()
    }

    pub fn set_num_objects(&mut self, n: usize) {
        self.inner.set_num_objects(n);
    }

    pub fn move_object(&mut self, id: u32, x: f64, y: f64, z: f64) -> Result<(), JsError> {
        self.inner.move_xyz(id, x, y, z)?;
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<(), JsError> {
        self.inner.remove(id)?;
        Ok(())
    }

    pub fn is_linked(&self, id: u32) -> Result<bool, JsError> {
        Ok(self.inner.object(id)?.is_linked())
    }

    pub fn position(&self, id: u32) -> Result<Vec<f64>, JsError> {
        Ok(self.inner.object(id)?.position().to_vec())
    }

    /// Moves every object at once from a flat coordinate array; extra
    /// coordinates beyond `num_objects` are ignored.
    pub fn set_positions(&mut self, positions: &[f64]) -> Result<(), JsError> {
        let count = self.inner.num_objects();
        for (id, p) in positions.chunks_exact(3).take(count).enumerate() {
            self.inner.move_xyz(id as u32, p[0], p[1], p[2])?;
        }
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Float64Array {
        let flat: Vec<f64> = self.inner.objects().flat_map(|o| o.position()).collect();
        Float64Array::from(flat.as_slice())
    }

    pub fn scatter(&mut self) {
        self.inner.scatter(get_seed());
    }

    pub fn wrap(&self, x: f64) -> f64 {
        self.inner.wrap(x)
    }

    pub fn wrap_relative(&self, x: f64) -> f64 {
        self.inner.wrap_relative(x)
    }

    /// Nearest neighbour of every object in parallel; `-1` where there is none.
    pub fn nearest_each(&self, max_results: usize) -> Vec<i32> {
        self.inner
            .nearest_each(max_results)
            .into_iter()
            .map(|n| n.map_or(-1, |id| id as i32))
            .collect()
    }
}

// --- Query ---

/// WASM wrapper for [`Query`].
#[wasm_bindgen(js_name = Query3D)]
pub struct Query3D {
    inner: Query,
}

#[wasm_bindgen(js_class = Query3D)]
impl Query3D {
    #[wasm_bindgen(constructor)]
    pub fn new(max_results: usize) -> Query3D {
        Query3D {
            inner: Query::new(max_results),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn max_results(&self) -> usize {
        self.inner.max_results()
    }

    #[wasm_bindgen(setter)]
    pub fn set_max_results(&mut self, n: usize) {
        self.inner.set_max_results(n);
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn search(
        &mut self,
        space: &HashSpace3D,
        x: f64,
        y: f64,
        z: f64,
        max_radius: f64,
        min_radius: f64,
    ) -> usize {
        self.inner.search(&space.inner, [x, y, z], max_radius, min_radius)
    }

    pub fn search_from(
        &mut self,
        space: &HashSpace3D,
        id: u32,
        max_radius: f64,
        min_radius: f64,
    ) -> Result<usize, JsError> {
        Ok(self.inner.search_from(&space.inner, id, max_radius, min_radius)?)
    }

    pub fn nearest(&mut self, space: &HashSpace3D, id: u32) -> Result<Option<u32>, JsError> {
        Ok(self.inner.nearest(&space.inner, id)?)
    }

    #[wasm_bindgen(getter)]
    pub fn objects(&self) -> Vec<u32> {
        self.inner.iter().map(|r| r.object).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn distances_squared(&self) -> Vec<f64> {
        self.inner.iter().map(|r| r.distance_squared).collect()
    }

    pub fn sort_by_distance(&mut self) {
        self.inner.sort_by_distance();
    }
}
