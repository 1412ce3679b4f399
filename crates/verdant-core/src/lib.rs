pub mod catalog;
pub mod constants;
pub mod direction;
pub mod material;
pub mod math;
pub mod params;
pub mod properties;
pub mod types;
