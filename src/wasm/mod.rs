pub mod space;
pub mod utils;
