pub mod loader;
pub mod validator;

pub use loader::{load_catalog_from_str, load_params_from_str, LoadError};
pub use validator::ValidationError;
