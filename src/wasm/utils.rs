use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_SPACE: &'static str = r#"
export const MIN_RESOLUTION = 1;
export const MAX_RESOLUTION = 10;
export const DEFAULT_MAX_RESULTS = 128;
"#;

/// Seed for random layouts: fresh per call in the browser, fixed natively so
/// tests are reproducible.
pub fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789
    }
}
