pub mod models;

pub use models::{create_model, InferenceModel};

pub mod prelude {
    pub use super::models::{create_model, InferenceModel};
    pub use sd_core::{Error, Result};
}
