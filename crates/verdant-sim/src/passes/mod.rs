pub mod diffusion;
pub mod gravity;
pub mod settle;
pub mod water;
