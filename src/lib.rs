pub mod definitions;
pub mod devices;
pub mod machine;
pub mod opcode;
pub mod runner;
pub mod timer;
mod error;

// reexporting for convinience
pub use error::*;
pub use machine::{Cycle, Machine, Sound};
