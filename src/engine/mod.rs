pub mod chance;
pub mod feature;
pub mod model;
pub mod statistics;

pub use feature::Feature;
pub use model::{MAX_ATTEMPTS, Model, ModelError};
