//! The full implementation of the chip8 interpreter core, from the opcodes to an option to pretty
//! print the machine state.
mod opcodes;
mod print;
mod state;

/// reexport machine structs and data for simpler usage
pub use state::*;

/// split up tests into an other file for simpler implementation
#[cfg(test)]
mod tests;
