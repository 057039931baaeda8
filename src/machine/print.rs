//! The pretty print implementation written for the [`Machine`](super::Machine).
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use std::fmt::{self, Write};

use once_cell::sync::Lazy;

use super::Machine;
use crate::definitions::{cpu, display, memory};

/// The amount of bytes shown per line of the memory dump,
/// has to be even as an instruction is two bytes long
const HEX_PRINT_STEP: usize = 16;

const END_OF_LINE: char = '\n';
const INDENT: &str = "  ";

const PIXEL_ON: char = '#';
const PIXEL_OFF: char = '.';

/// The values that are used when there are at lease two rows of zeros.
const FILLER_BASE: &str = "...";

/// Prepares the line that will be used, in the case that there is at least two lines of only
/// zeros, it is centered below the opcode columns.
static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
    let opcodes = HEX_PRINT_STEP / memory::opcodes::SIZE as usize;
    // every opcode is printed as `0x0000 `
    let width = opcodes * 7 - 1;
    format!("{:^width$}", FILLER_BASE, width = width)
});

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        self.write_registers(&mut text)?;
        self.write_memory(&mut text)?;
        self.write_display(&mut text)?;
        f.write_str(&text)
    }
}

impl Machine {
    fn write_registers(&self, text: &mut String) -> fmt::Result {
        writeln!(
            text,
            "pc: {:#06X} opcode: {:#06X} i: {:#06X} sp: {} delay: {} sound: {}",
            self.program_counter,
            self.opcode,
            self.index_register,
            self.stack_pointer,
            self.delay_timer(),
            self.sound_timer(),
        )?;

        text.push_str("registers:");
        text.push(END_OF_LINE);
        text.push_str(INDENT);
        for (i, value) in self.registers.iter().enumerate() {
            write!(text, "V{:X}={:#04X}", i, value)?;
            text.push(if i == cpu::register::LAST { END_OF_LINE } else { ' ' });
        }

        text.push_str("stack:");
        for entry in self.stack().iter() {
            write!(text, " {:#06X}", entry)?;
        }
        text.push(END_OF_LINE);
        Ok(())
    }

    /// Dumps the program area, rows of zeros following a zero row are collapsed
    fn write_memory(&self, text: &mut String) -> fmt::Result {
        text.push_str("memory:");
        text.push(END_OF_LINE);

        let program = &self.memory[cpu::PROGRAM_COUNTER..];
        let mut collapsed = false;
        let mut previous_zero = false;

        for (row, chunk) in program.chunks(HEX_PRINT_STEP).enumerate() {
            let is_zero = chunk.iter().all(|&byte| byte == 0);
            if is_zero && previous_zero {
                if !collapsed {
                    text.push_str(INDENT);
                    text.push_str(&" ".repeat(18));
                    text.push_str(&ZERO_FILLER);
                    text.push(END_OF_LINE);
                    collapsed = true;
                }
                continue;
            }
            previous_zero = is_zero;
            collapsed = false;

            let from = cpu::PROGRAM_COUNTER + row * HEX_PRINT_STEP;
            let to = from + chunk.len() - 1;
            write!(text, "{}{:#06X} - {:#06X} :", INDENT, from, to)?;
            for pair in chunk.chunks(memory::opcodes::SIZE as usize) {
                let opcode = pair.iter().fold(0u16, |acc, &byte| acc << 8 | byte as u16);
                write!(text, " {:#06X}", opcode)?;
            }
            text.push(END_OF_LINE);
        }
        Ok(())
    }

    fn write_display(&self, text: &mut String) -> fmt::Result {
        text.push_str("display:");
        text.push(END_OF_LINE);
        for row in self.display.chunks(display::WIDTH) {
            text.push_str(INDENT);
            text.extend(
                row.iter()
                    .map(|&pixel| if pixel == 0 { PIXEL_OFF } else { PIXEL_ON }),
            );
            text.push(END_OF_LINE);
        }
        Ok(())
    }
}
