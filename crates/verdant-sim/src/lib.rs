pub mod conductivity;
pub mod passes;
pub mod pipeline;

mod staging;

#[cfg(test)]
mod test_harness;

pub use pipeline::{tick, SimPipeline, TickReport};
