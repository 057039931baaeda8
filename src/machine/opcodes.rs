use rand::RngCore;

use crate::{
    definitions::{cpu, display, memory},
    opcode::{
        Address, Arithmetic, ArithmeticOpcode, ChipOpcodes, KeyCheck, KeyOpcode, Misc,
        MiscOpcode, Operation, ProgramCounterStep, RegisterConst, RegisterPair, Sprite, System,
    },
    timer::Timed,
    ProcessError,
};

use super::Machine;

impl Machine {
    /// Will return the memory address `offset` bytes after the index register,
    /// wrapping around the end of memory.
    fn indexed(&self, offset: usize) -> usize {
        (self.index_register as usize + offset) % memory::SIZE
    }
}

impl ChipOpcodes for Machine {
    fn system(
        &mut self,
        opcode: &System,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match *opcode {
            System::Clear => {
                // 00E0
                self.display = [0; display::RESOLUTION];
                self.draw_flag = true;
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                // 00EE
                // Return from sub routine => pop from stack and continue after the call
                let pc = self.pop_stack()?;
                log::debug!("return to {:#06X}", pc);
                Ok((
                    ProgramCounterStep::Jump(ProgramCounterStep::Next.apply(pc)),
                    Operation::None,
                ))
            }
            System::MachineCall { nnn } => {
                // 0NNN
                log::debug!("machine code routine at {:#06X} handled as a jump", nnn);
                Ok((ProgramCounterStep::Jump(nnn), Operation::None))
            }
        }
    }

    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        log::debug!("jump to {:#06X}", opcode.nnn);
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // the address of the call itself is stored, the return moves past it
        self.push_stack(self.program_counter)?;
        log::debug!("call {:#06X} from {:#06X}", opcode.nnn, self.program_counter);
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn skip_equal_const(&self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] == opcode.nn))
    }

    fn skip_not_equal_const(
        &self,
        opcode: &RegisterConst,
    ) -> Result<ProgramCounterStep, ProcessError> {
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] != opcode.nn))
    }

    fn skip_equal_register(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError> {
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] == self.registers[opcode.y],
        ))
    }

    fn set_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        self.registers[opcode.x] = opcode.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // let VX overflow, but ignore carry
        self.registers[opcode.x] = self.registers[opcode.x].wrapping_add(opcode.nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let Arithmetic { ops, x, y } = *opcode;
        let vx = self.registers[x];
        let vy = self.registers[y];

        // the flag is written last, so that it wins if X is F
        let flag = match ops {
            ArithmeticOpcode::Assign => {
                self.registers[x] = vy;
                None
            }
            ArithmeticOpcode::Or => {
                self.registers[x] = vx | vy;
                None
            }
            ArithmeticOpcode::And => {
                self.registers[x] = vx & vy;
                None
            }
            ArithmeticOpcode::Xor => {
                self.registers[x] = vx ^ vy;
                None
            }
            ArithmeticOpcode::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                self.registers[x] = res;
                Some(carry as u8)
            }
            ArithmeticOpcode::Sub => {
                let (res, borrow) = vx.overflowing_sub(vy);
                self.registers[x] = res;
                // VF is the "no borrow" flag
                Some(!borrow as u8)
            }
            ArithmeticOpcode::SubReverse => {
                let (res, borrow) = vy.overflowing_sub(vx);
                self.registers[x] = res;
                Some(!borrow as u8)
            }
            ArithmeticOpcode::ShiftRight => {
                self.registers[x] = vx >> 1;
                Some(vx & 1)
            }
            ArithmeticOpcode::ShiftLeft => {
                const SHIFT_SIGNIFICANT: u8 = 7;
                self.registers[x] = vx << 1;
                Some(vx >> SHIFT_SIGNIFICANT)
            }
        };

        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        Ok(ProgramCounterStep::Next)
    }

    fn skip_not_equal_register(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError> {
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] != self.registers[opcode.y],
        ))
    }

    fn set_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        self.index_register = opcode.nnn;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        let v0 = self.registers[0] as u16;
        Ok(ProgramCounterStep::Jump(opcode.nnn + v0))
    }

    fn random(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand = [0u8; 1];
        self.rng.fill_bytes(&mut rand);
        self.registers[opcode.x] = opcode.nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        const BYTE: usize = 8;

        let Sprite { x, y, n } = *opcode;
        let coorx = self.registers[x] as usize % display::WIDTH;
        let coory = self.registers[y] as usize % display::HEIGHT;

        self.registers[cpu::register::LAST] = 0;

        for i in 0..(n as usize) {
            let row = self.memory[self.indexed(i)];
            let y = (coory + i) % display::HEIGHT;

            // the most significant bit is the left most pixel
            for j in 0..BYTE {
                let mask = 0x80 >> j;
                if row & mask == 0 {
                    continue;
                }

                // pixels leaving the screen wrap around to the opposite edge
                let x = (coorx + j) % display::WIDTH;
                let pixel = &mut self.display[y * display::WIDTH + x];

                if *pixel == 1 {
                    self.registers[cpu::register::LAST] = 1;
                }
                *pixel ^= 1;
            }
        }

        self.draw_flag = true;
        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, opcode: &KeyCheck) -> Result<ProgramCounterStep, ProcessError> {
        let pressed = self.keyboard.is_pressed(self.registers[opcode.x]);
        let step = match opcode.ops {
            KeyOpcode::Pressed => ProgramCounterStep::cond(pressed),
            KeyOpcode::Released => ProgramCounterStep::cond(!pressed),
        };
        Ok(step)
    }

    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let x = opcode.x;
        match opcode.ops {
            MiscOpcode::GetDelayTimer => {
                self.registers[x] = self.delay_timer.get_value();
            }
            MiscOpcode::AwaitKeyPress => {
                // repeat this instruction until a key is observed pressed
                match self.keyboard.first_pressed() {
                    Some(key) => {
                        log::debug!("key {:#X} pressed, stored in V{:X}", key, x);
                        self.registers[x] = key;
                    }
                    None => return Ok((ProgramCounterStep::None, Operation::Wait)),
                }
            }
            MiscOpcode::SetDelayTimer => {
                self.delay_timer.set_value(self.registers[x]);
            }
            MiscOpcode::SetSoundTimer => {
                self.sound_timer.set_value(self.registers[x]);
            }
            MiscOpcode::AddVxToI => {
                let (res, overflow) = self
                    .index_register
                    .overflowing_add(self.registers[x] as u16);
                self.index_register = res;
                if overflow {
                    self.registers[cpu::register::LAST] = 1;
                }
            }
            MiscOpcode::SetIToSprite => {
                let glyph = (self.registers[x] & 0x0F) as usize;
                let location =
                    display::fontset::LOCATION + display::fontset::GLYPH_SIZE * glyph;
                self.index_register = location as u16;
            }
            MiscOpcode::StoreBCD => {
                let r = self.registers[x];
                let digits = [r / 100, r / 10 % 10, r % 10]; // 246 => [2, 4, 6]
                for (offset, digit) in digits.iter().enumerate() {
                    let address = self.indexed(offset);
                    self.memory[address] = *digit;
                }
            }
            MiscOpcode::StoreV0ToVx => {
                for offset in 0..=x {
                    let address = self.indexed(offset);
                    self.memory[address] = self.registers[offset];
                }
            }
            MiscOpcode::FillV0ToVx => {
                for offset in 0..=x {
                    let address = self.indexed(offset);
                    self.registers[offset] = self.memory[address];
                }
            }
        }
        Ok((ProgramCounterStep::Next, Operation::None))
    }
}
