use std::convert::TryFrom;

use rand::rngs::mock::StepRng;

use super::{Machine, Sound};
use crate::{
    definitions::{cpu, display, keyboard, memory},
    opcode::{ChipOpcodes, Instruction, Opcode, Operation},
    timer::Timed,
    LoadError, OpcodeError, ProcessError, StackError,
};

const SEED: u64 = 0x5EED;

const FLAG: usize = cpu::register::LAST;

const PROGRAM_START: u16 = cpu::PROGRAM_COUNTER as u16;

/// will setup the default configured machine
pub(super) fn get_default_machine() -> Machine {
    let mut machine = Machine::with_seed(SEED);
    // fill up register with random values
    for register in machine.registers.iter_mut() {
        *register = rand::random();
    }
    machine
}

#[inline]
/// Will write the opcode to the memory location specified
pub(super) fn write_opcode_to_memory(memory: &mut [u8], from: usize, opcode: Opcode) {
    write_slice_to_memory(memory, from, &opcode.to_be_bytes());
}

#[inline]
/// Will write the slice to the memory location specified
pub(super) fn write_slice_to_memory(memory: &mut [u8], from: usize, data: &[u8]) {
    memory[from..(from + data.len())].copy_from_slice(data);
}

/// Will write the opcode at the current program counter and run a single cycle
pub(super) fn run(machine: &mut Machine, opcode: Opcode) -> super::Cycle {
    let pc = machine.program_counter as usize;
    write_opcode_to_memory(&mut machine.memory, pc, opcode);
    machine.step()
}

/// Will load the opcodes as the program
pub(super) fn load_opcodes(machine: &mut Machine, opcodes: &[Opcode]) {
    let image: Vec<u8> = opcodes.iter().flat_map(|op| op.to_be_bytes()).collect();
    assert_eq!(Ok(()), machine.load(&image));
}

mod lifecycle {
    use super::*;

    #[test]
    fn test_reset_state() {
        let mut machine = get_default_machine();
        machine.program_counter = 0x0ABC;
        machine.index_register = 0x0123;
        machine.draw_flag = true;
        machine.display[42] = 1;
        machine.memory[0x300] = 0xFF;
        machine.delay_timer.set_value(4);
        machine.sound_timer.set_value(4);
        machine.set_key(0x4, true);
        assert_eq!(Ok(()), machine.push_stack(0x0222));

        machine.reset(SEED);

        let font = display::fontset::LOCATION;
        assert_eq!(
            &machine.memory()[font..(font + display::fontset::FONTSET.len())],
            &display::fontset::FONTSET[..]
        );
        assert!(machine.memory()[..font].iter().all(|&byte| byte == 0));
        assert!(machine.memory()[cpu::PROGRAM_COUNTER..]
            .iter()
            .all(|&byte| byte == 0));
        assert_eq!(machine.program_counter(), PROGRAM_START);
        assert_eq!(machine.stack_pointer(), 0);
        assert!(machine.stack().is_empty());
        assert_eq!(machine.index_register(), 0);
        assert!(machine.registers().iter().all(|&v| v == 0));
        assert!(machine.display().iter().all(|&pixel| pixel == 0));
        assert!(machine.get_keyboard().iter().all(|&down| !down));
        assert!(!machine.draw_flag());
        assert_eq!(machine.delay_timer(), 0);
        assert_eq!(machine.sound_timer(), 0);
    }

    #[test]
    fn test_reset_is_repeatable() {
        let mut machine = Machine::with_seed(SEED);
        let memory = machine.memory;
        machine.reset(SEED);
        machine.reset(SEED);
        assert_eq!(&machine.memory[..], &memory[..]);
    }

    #[test]
    fn test_load_copies_image() {
        let mut machine = Machine::with_seed(SEED);
        let image: Vec<u8> = (0..cpu::PROGRAM_CAPACITY).map(|i| i as u8).collect();

        assert_eq!(Ok(()), machine.load(&image));

        for (k, byte) in image.iter().enumerate() {
            assert_eq!(machine.memory()[cpu::PROGRAM_COUNTER + k], *byte);
        }
    }

    #[test]
    fn test_load_too_large() {
        let mut machine = Machine::with_seed(SEED);
        let before = machine.memory;
        let image = vec![0xAA; cpu::PROGRAM_CAPACITY + 1];

        assert_eq!(
            Err(LoadError::TooLarge {
                size: cpu::PROGRAM_CAPACITY + 1,
                capacity: 0xE00
            }),
            machine.load(&image)
        );
        assert_eq!(&machine.memory[..], &before[..]);
    }

    #[test]
    fn test_load_keeps_other_state() {
        let mut machine = get_default_machine();
        let registers = machine.registers;
        machine.program_counter = 0x0300;

        assert_eq!(Ok(()), machine.load(&[0x12, 0x34]));

        assert_eq!(machine.registers, registers);
        assert_eq!(machine.program_counter(), 0x0300);
    }

    #[test]
    fn test_set_opcode() {
        let mut machine = get_default_machine();
        let opcode = 0xA00A;
        write_opcode_to_memory(&mut machine.memory, machine.program_counter as usize, opcode);

        machine.set_opcode();

        assert_eq!(machine.opcode, opcode);
    }

    #[test]
    fn test_fetch_wraps_around_memory() {
        let mut machine = get_default_machine();
        machine.program_counter = 0x0FFF;
        machine.memory[0x0FFF] = 0x60;
        machine.memory[0x0000] = 0x2A;

        let cycle = machine.step();

        assert_eq!(cycle.opcode, 0x602A);
        assert_eq!(machine.registers[0], 0x2A);
        assert_eq!(machine.program_counter(), 0x0001);
    }
}

mod faults {
    use super::*;

    #[test]
    fn test_illegal_instruction() {
        let mut machine = get_default_machine();
        machine.delay_timer.set_value(5);
        let registers = machine.registers;

        let cycle = run(&mut machine, 0xFFFF);

        assert_eq!(
            cycle.fault,
            Some(ProcessError::Opcode(OpcodeError::IllegalInstruction(0xFFFF)))
        );
        assert_eq!(cycle.operation, Operation::None);
        assert_eq!(machine.program_counter(), PROGRAM_START + 2);
        assert_eq!(machine.delay_timer(), 4);
        assert_eq!(machine.registers, registers);
    }

    #[test]
    fn test_illegal_variants_keep_running() {
        let mut machine = get_default_machine();
        let illegal: [Opcode; 6] = [0x5121, 0x812F, 0x9129, 0xE100, 0xF1FF, 0xFFFF];
        load_opcodes(&mut machine, &illegal);

        for (i, opcode) in illegal.iter().enumerate() {
            let cycle = machine.step();
            assert_eq!(
                cycle.fault,
                Some(ProcessError::from(OpcodeError::IllegalInstruction(*opcode)))
            );
            assert_eq!(machine.program_counter(), PROGRAM_START + 2 * (i as u16 + 1));
        }
    }

    #[test]
    /// testing internal functionality of popping and pushing into the stack
    fn test_push_pop_stack() {
        let mut machine = get_default_machine();

        // check empty initial stack
        assert!(machine.stack().is_empty());

        let next_counter = 0x0133 + PROGRAM_START;

        for i in 0..cpu::stack::SIZE as u16 {
            assert_eq!(Ok(()), machine.push_stack(next_counter + i * 8));
        }
        // check for the correct error message
        assert_eq!(Err(StackError::Overflow), machine.push_stack(next_counter));

        // check if the stack pointer moved as expected
        assert_eq!(cpu::stack::SIZE, machine.stack_pointer());
        // pop the stack
        for i in (0..cpu::stack::SIZE as u16).rev() {
            assert_eq!(Ok(next_counter + i * 8), machine.pop_stack());
        }
        assert!(machine.stack().is_empty());
        // test if stack is now empty
        assert_eq!(Err(StackError::Underflow), machine.pop_stack());
    }

    #[test]
    fn test_nested_calls_and_returns() {
        let mut machine = get_default_machine();

        // every subroutine calls the next one, sixteen bytes apart
        let base = 0x0300;
        let mut call_sites = vec![];
        let mut pc = PROGRAM_START as usize;
        for depth in 0..=cpu::stack::SIZE {
            let target = base + depth * 0x10;
            write_opcode_to_memory(&mut machine.memory, pc, 0x2000 | target as Opcode);
            call_sites.push(pc as u16);
            pc = target;
        }

        for depth in 0..cpu::stack::SIZE {
            let cycle = machine.step();
            assert_eq!(cycle.fault, None);
            assert_eq!(machine.stack_pointer(), depth + 1);
        }
        assert_eq!(machine.stack(), &call_sites[..cpu::stack::SIZE]);

        // the 17th call fails and changes nothing
        let pc = machine.program_counter();
        let cycle = machine.step();
        assert_eq!(cycle.fault, Some(ProcessError::Stack(StackError::Overflow)));
        assert_eq!(machine.program_counter(), pc);
        assert_eq!(machine.stack_pointer(), cpu::stack::SIZE);

        // returns unwind in reverse order
        for expected in call_sites[..cpu::stack::SIZE].iter().rev() {
            let cycle = run(&mut machine, 0x00EE);
            assert_eq!(cycle.fault, None);
            assert_eq!(machine.program_counter(), expected + 2);
        }
        assert_eq!(machine.stack_pointer(), 0);

        let pc = machine.program_counter();
        let cycle = run(&mut machine, 0x00EE);
        assert_eq!(
            cycle.fault,
            Some(ProcessError::Stack(StackError::Underflow))
        );
        assert_eq!(machine.program_counter(), pc);
        assert_eq!(machine.stack_pointer(), 0);
    }
}

mod timers {
    use super::*;

    #[test]
    fn test_sound_stop_is_one_shot() {
        let mut machine = get_default_machine();
        load_opcodes(&mut machine, &[0x1200]);
        machine.sound_timer.set_value(1);

        assert_eq!(machine.step().sound, Some(Sound::Stop));
        assert_eq!(machine.sound_timer(), 0);
        assert_eq!(machine.step().sound, None);
    }

    #[test]
    fn test_timers_count_down_per_cycle() {
        let mut machine = get_default_machine();
        load_opcodes(&mut machine, &[0x1200]);
        machine.delay_timer.set_value(3);
        machine.sound_timer.set_value(2);

        let sounds: Vec<_> = (0..4).map(|_| machine.step().sound).collect();

        assert_eq!(sounds, vec![None, Some(Sound::Stop), None, None]);
        assert_eq!(machine.delay_timer(), 0);
    }
}

mod zero {
    use super::*;

    #[test]
    /// `0x00E0`
    fn test_clear_display_opcode() {
        let mut machine = get_default_machine();
        machine.display = [1; display::RESOLUTION];

        let cycle = run(&mut machine, 0x00E0);

        assert_eq!(cycle.operation, Operation::Draw);
        assert!(machine.display().iter().all(|&pixel| pixel == 0));
        assert!(machine.draw_flag());
        assert_eq!(machine.program_counter(), PROGRAM_START + memory::opcodes::SIZE);
    }

    #[test]
    /// test return from subroutine
    /// `0x00EE`
    fn test_return_subroutine() {
        let mut machine = get_default_machine();
        let curr_pc = machine.program_counter();

        assert_eq!(run(&mut machine, 0x2234).fault, None);
        assert_eq!(machine.program_counter(), 0x0234);

        assert_eq!(run(&mut machine, 0x00EE).operation, Operation::None);

        assert_eq!(machine.program_counter(), curr_pc + memory::opcodes::SIZE);
    }

    #[test]
    /// `0NNN` is handled as a jump
    fn test_machine_code_routine() {
        let mut machine = get_default_machine();

        let cycle = run(&mut machine, 0x0456);

        assert_eq!(cycle.fault, None);
        assert_eq!(machine.program_counter(), 0x0456);
    }
}

mod one {
    use super::*;

    #[test]
    /// `1NNN`
    fn test_jump_address() {
        let mut machine = get_default_machine();
        let opcode = 0x1234;
        let instruction = Instruction::try_from(opcode).expect("a jump is a legal opcode");

        assert_eq!(machine.calc(&instruction), Ok(Operation::None));

        assert_eq!(machine.program_counter(), 0x0234);
    }
}

mod two {
    use super::*;

    #[test]
    /// `2NNN`
    fn test_call_subroutine() {
        let mut machine = get_default_machine();
        let curr_pc = machine.program_counter();

        assert_eq!(run(&mut machine, 0x2234).operation, Operation::None);

        assert_eq!(machine.program_counter(), 0x0234);
        assert_eq!(machine.stack(), &[curr_pc]);
    }
}

mod skips {
    use super::*;

    fn assert_skip(machine: &mut Machine, opcode: Opcode, skipped: bool) {
        let curr_pc = machine.program_counter();
        run(machine, opcode);
        let by = if skipped { 2 } else { 1 };
        assert_eq!(
            machine.program_counter(),
            curr_pc + by * memory::opcodes::SIZE,
            "opcode {:#06X}",
            opcode
        );
    }

    #[test]
    /// `3XNN`
    fn test_skip_if_const_equals() {
        let mut machine = get_default_machine();
        machine.registers[0x1] = 0x02;
        assert_skip(&mut machine, 0x3103, false);
        machine.registers[0x1] = 0x03;
        assert_skip(&mut machine, 0x3103, true);
    }

    #[test]
    /// `4XNN`
    fn test_skip_if_const_not_equals() {
        let mut machine = get_default_machine();
        machine.registers[0x1] = 0x03;
        assert_skip(&mut machine, 0x4103, false);
        machine.registers[0x1] = 0x66;
        assert_skip(&mut machine, 0x4103, true);
    }

    #[test]
    /// `5XY0`
    fn test_skip_if_register_equals() {
        let mut machine = get_default_machine();
        machine.registers[0x2] = 0x06;
        machine.registers[0x1] = 0x66;
        assert_skip(&mut machine, 0x5210, false);
        machine.registers[0x2] = 0x66;
        assert_skip(&mut machine, 0x5210, true);
    }

    #[test]
    /// `9XY0`
    fn test_skip_if_register_not_equals() {
        let mut machine = get_default_machine();
        machine.registers[0x2] = 0x66;
        machine.registers[0x1] = 0x66;
        assert_skip(&mut machine, 0x9210, false);
        machine.registers[0x2] = 0x06;
        assert_skip(&mut machine, 0x9210, true);
    }

    #[test]
    /// `EX9E` and `EXA1`
    fn test_skip_on_key() {
        let mut machine = get_default_machine();
        machine.registers[0x4] = 0xB;

        assert_skip(&mut machine, 0xE49E, false);
        assert_skip(&mut machine, 0xE4A1, true);

        machine.set_key(0xB, true);
        assert_skip(&mut machine, 0xE49E, true);
        assert_skip(&mut machine, 0xE4A1, false);
    }
}

mod registers {
    use super::*;

    #[test]
    /// `6XNN`
    fn test_set_vx_to_nn() {
        let mut machine = get_default_machine();

        run(&mut machine, 0x632A);

        assert_eq!(machine.registers()[0x3], 0x2A);
        assert_eq!(machine.program_counter(), PROGRAM_START + memory::opcodes::SIZE);
    }

    #[test]
    /// `7XNN`
    fn test_add_nn_to_vx() {
        let mut machine = get_default_machine();
        machine.registers[0x1] = 0xFA;
        let flag = machine.registers[FLAG];

        run(&mut machine, 0x7166);

        assert_eq!(machine.registers()[0x1], 0x60);
        // carry flag is not changed
        assert_eq!(machine.registers()[FLAG], flag);
    }

    #[test]
    /// `ANNN`
    fn test_set_index() {
        let mut machine = get_default_machine();

        run(&mut machine, 0xA123);

        assert_eq!(machine.index_register(), 0x0123);
    }

    #[test]
    /// `BNNN`
    fn test_jump_with_offset() {
        let mut machine = get_default_machine();
        machine.registers[0] = 0x10;

        run(&mut machine, 0xB300);
        assert_eq!(machine.program_counter(), 0x0310);

        // the target is wrapped into the address space
        machine.registers[0] = 0x02;
        run(&mut machine, 0xBFFF);
        assert_eq!(machine.program_counter(), 0x0001);
    }

    #[test]
    /// `CXNN`
    fn test_random_is_masked() {
        let mut machine = get_default_machine();
        machine.rng = Box::new(StepRng::new(0xAB, 0));

        run(&mut machine, 0xC10F);

        assert_eq!(machine.registers()[0x1], 0x0B);
    }

    #[test]
    /// `CXNN` with the same seed produces the same values
    fn test_random_is_seeded() {
        let program: Vec<Opcode> = (0..8).map(|i| 0xC0FF | (i << 8)).collect();
        let mut first = Machine::with_seed(7);
        let mut second = Machine::with_seed(7);
        load_opcodes(&mut first, &program);
        load_opcodes(&mut second, &program);

        for _ in 0..program.len() {
            first.step();
            second.step();
        }
        assert_eq!(first.registers(), second.registers());

        second.reset(7);
        load_opcodes(&mut second, &program);
        for _ in 0..program.len() {
            second.step();
        }
        assert_eq!(first.registers(), second.registers());
    }
}

mod eight {
    use super::*;

    /// runs the `8XYT` opcode with the given register values and
    /// returns `(VX, VF)`
    fn calculate(command: Opcode, val_reg_x: u8, val_reg_y: u8) -> (u8, u8) {
        let mut machine = get_default_machine();
        let reg_x = 0x1;
        let reg_y = 0xE;
        machine.registers[reg_x] = val_reg_x;
        machine.registers[reg_y] = val_reg_y;
        machine.registers[FLAG] = 0x42;

        let opcode = 0x8 << (3 * 4) | (reg_x as Opcode) << (2 * 4) | (reg_y as Opcode) << 4 | command;
        let cycle = run(&mut machine, opcode);

        assert_eq!(cycle.fault, None);
        assert_eq!(machine.program_counter(), PROGRAM_START + memory::opcodes::SIZE);
        assert_eq!(machine.registers[reg_y], val_reg_y);
        (machine.registers[reg_x], machine.registers[FLAG])
    }

    #[test]
    // 8XY0
    fn test_move_value() {
        assert_eq!(calculate(0x0, 0x14, 0xFA), (0xFA, 0x42));
    }

    #[test]
    // 8XY1 8XY2 8XY3
    fn test_bitwise() {
        assert_eq!(calculate(0x1, 0x14, 0xFA), (0xFE, 0x42));
        assert_eq!(calculate(0x2, 0x14, 0xFA), (0x10, 0x42));
        assert_eq!(calculate(0x3, 0x14, 0xFA), (0xEE, 0x42));
    }

    #[test]
    // 8XY4
    fn test_addition_with_carry() {
        assert_eq!(calculate(0x4, 0xFF, 0x01), (0x00, 1));
        assert_eq!(calculate(0x4, 0x14, 0xFA), (0x0E, 1));
        assert_eq!(calculate(0x4, 0x14, 0x0A), (0x1E, 0));
    }

    #[test]
    // 8XY5
    fn test_subtraction_with_borrow() {
        assert_eq!(calculate(0x5, 0x01, 0x02), (0xFF, 0));
        assert_eq!(calculate(0x5, 0x14, 0xFA), (0x1A, 0));
        assert_eq!(calculate(0x5, 0xFA, 0x14), (0xE6, 1));
        assert_eq!(calculate(0x5, 0x14, 0x14), (0x00, 1));
    }

    #[test]
    // 8XY6
    fn test_least_sig_bit_and_shift_right() {
        assert_eq!(calculate(0x6, 0x15, 0xFA), (0x0A, 1));
        assert_eq!(calculate(0x6, 0x14, 0xFB), (0x0A, 0));
    }

    #[test]
    // 8XY7
    fn test_reverse_subtraction() {
        assert_eq!(calculate(0x7, 0x14, 0xFA), (0xE6, 1));
        assert_eq!(calculate(0x7, 0xFA, 0x14), (0x1A, 0));
    }

    #[test]
    // 8XYE
    fn test_most_sig_bit_and_shift_left() {
        assert_eq!(calculate(0xE, 0x81, 0x00), (0x02, 1));
        assert_eq!(calculate(0xE, 0x41, 0xFF), (0x82, 0));
    }

    #[test]
    /// the flag wins when VF is the target register
    fn test_flag_as_target() {
        let mut machine = get_default_machine();
        machine.registers[FLAG] = 0xFF;
        machine.registers[0x1] = 0x01;

        run(&mut machine, 0x8F14);

        assert_eq!(machine.registers[FLAG], 1);
    }
}

mod draw {
    use super::*;

    /// places a two row sprite at `0x300` and points I at it
    fn setup(machine: &mut Machine, x: u8, y: u8) {
        write_slice_to_memory(&mut machine.memory, 0x300, &[0b1100_0001, 0b1000_0000]);
        machine.index_register = 0x300;
        machine.registers[0x1] = x;
        machine.registers[0x2] = y;
    }

    fn pixel(machine: &Machine, row: usize, col: usize) -> u8 {
        machine.display()[row * display::WIDTH + col]
    }

    #[test]
    /// `DXYN`
    fn test_draw_and_collide() {
        let mut machine = get_default_machine();
        setup(&mut machine, 4, 3);

        let cycle = run(&mut machine, 0xD122);

        assert_eq!(cycle.operation, Operation::Draw);
        assert!(machine.draw_flag());
        assert_eq!(machine.registers[FLAG], 0);
        assert_eq!(pixel(&machine, 3, 4), 1);
        assert_eq!(pixel(&machine, 3, 5), 1);
        assert_eq!(pixel(&machine, 3, 6), 0);
        assert_eq!(pixel(&machine, 3, 11), 1);
        assert_eq!(pixel(&machine, 4, 4), 1);
        assert_eq!(machine.display().iter().filter(|&&p| p == 1).count(), 4);

        machine.clear_draw_flag();
        run(&mut machine, 0xD122);

        assert!(machine.draw_flag());
        assert_eq!(machine.registers[FLAG], 1);
        assert!(machine.display().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_draw_wraps_right_edge() {
        let mut machine = get_default_machine();
        setup(&mut machine, 63, 0);

        run(&mut machine, 0xD121);

        assert_eq!(pixel(&machine, 0, 63), 1);
        assert_eq!(pixel(&machine, 0, 0), 1);
        // last bit of the row lands on column 6
        assert_eq!(pixel(&machine, 0, 6), 1);
    }

    #[test]
    fn test_draw_wraps_bottom_edge_and_origin() {
        let mut machine = get_default_machine();
        // the origin itself is taken modulo the display size
        setup(&mut machine, 64 + 2, 32 + 31);

        run(&mut machine, 0xD122);

        assert_eq!(pixel(&machine, 31, 2), 1);
        assert_eq!(pixel(&machine, 0, 2), 1);
    }

    #[test]
    fn test_draw_partial_collision() {
        let mut machine = get_default_machine();
        setup(&mut machine, 0, 0);
        machine.display[display::WIDTH * 5] = 1;
        machine.display[0] = 1;

        run(&mut machine, 0xD121);

        assert_eq!(machine.registers[FLAG], 1);
        assert_eq!(pixel(&machine, 0, 0), 0);
        assert_eq!(pixel(&machine, 0, 1), 1);
        assert_eq!(pixel(&machine, 5, 0), 1);
    }

    #[test]
    fn test_draw_font_glyph() {
        let mut machine = get_default_machine();
        machine.registers[0x0] = 0x0;
        machine.registers[0x1] = 0x0;
        machine.registers[0x2] = 0x8;
        load_opcodes(&mut machine, &[0xF229, 0xD015]);

        machine.step();
        machine.step();

        // the glyph 8 starts with `0xF0`
        let row: Vec<u8> = machine.display()[..8].to_vec();
        assert_eq!(row, vec![1, 1, 1, 1, 0, 0, 0, 0]);
    }
}

mod fifteen {
    use super::*;

    #[test]
    /// `FX07` `FX15` `FX18`
    fn test_timers() {
        let mut machine = get_default_machine();
        machine.registers[0x2] = 0x20;
        machine.registers[0x3] = 0x30;

        run(&mut machine, 0xF215);
        run(&mut machine, 0xF318);
        // both timers ticked once after being set
        assert_eq!(machine.delay_timer(), 0x1E);
        assert_eq!(machine.sound_timer(), 0x2F);

        run(&mut machine, 0xF407);
        assert_eq!(machine.registers[0x4], 0x1E);
    }

    #[test]
    /// `FX0A`
    fn test_await_key_press() {
        let mut machine = get_default_machine();
        load_opcodes(&mut machine, &[0xF50A]);
        machine.delay_timer.set_value(10);

        for _ in 0..3 {
            let cycle = machine.step();
            assert_eq!(cycle.operation, Operation::Wait);
            assert_eq!(machine.program_counter(), PROGRAM_START);
        }
        // timers keep running while waiting
        assert_eq!(machine.delay_timer(), 7);

        let mut keys = [false; keyboard::SIZE];
        keys[0xC] = true;
        keys[0x9] = true;
        machine.set_keyboard(&keys);

        let cycle = machine.step();
        assert_eq!(cycle.operation, Operation::None);
        assert_eq!(machine.registers[0x5], 0x9);
        assert_eq!(machine.program_counter(), PROGRAM_START + memory::opcodes::SIZE);
    }

    #[test]
    /// `FX0A` with a key toggled by the host
    fn test_await_toggled_key() {
        let mut machine = get_default_machine();
        load_opcodes(&mut machine, &[0xF60A, 0xF60A]);

        machine.toggle_key(0xE);
        machine.step();
        assert_eq!(machine.registers[0x6], 0xE);

        machine.toggle_key(0xE);
        assert_eq!(machine.step().operation, Operation::Wait);
        assert_eq!(machine.program_counter(), PROGRAM_START + memory::opcodes::SIZE);
        assert!(machine.get_keyboard().iter().all(|&down| !down));
    }

    #[test]
    /// `FX1E`
    fn test_add_vx_to_index() {
        let mut machine = get_default_machine();
        machine.index_register = 0x0FF0;
        machine.registers[0x1] = 0x20;
        machine.registers[FLAG] = 0;

        run(&mut machine, 0xF11E);
        assert_eq!(machine.index_register(), 0x1010);
        assert_eq!(machine.registers[FLAG], 0);

        machine.index_register = 0xFFF0;
        run(&mut machine, 0xF11E);
        assert_eq!(machine.index_register(), 0x0010);
        assert_eq!(machine.registers[FLAG], 1);
    }

    #[test]
    /// `FX29`
    fn test_set_index_to_sprite() {
        let mut machine = get_default_machine();
        for glyph in 0..0x10u8 {
            machine.registers[0x7] = glyph;
            run(&mut machine, 0xF729);
            assert_eq!(
                machine.index_register() as usize,
                display::fontset::LOCATION + glyph as usize * display::fontset::GLYPH_SIZE
            );
        }
    }

    #[test]
    /// `FX33`
    fn test_store_bcd() {
        let mut machine = get_default_machine();
        machine.index_register = 0x0400;
        machine.registers[0x6] = 246;

        run(&mut machine, 0xF633);

        assert_eq!(&machine.memory()[0x400..0x403], &[2, 4, 6]);
        assert_eq!(machine.index_register(), 0x0400);
    }

    #[test]
    /// `FX55` and `FX65` include VX
    fn test_store_and_fill_registers() {
        let mut machine = get_default_machine();
        let values: Vec<u8> = (0..cpu::register::SIZE as u8).map(|v| v * 3).collect();
        machine.registers.copy_from_slice(&values);
        machine.index_register = 0x0500;

        run(&mut machine, 0xF455);

        assert_eq!(&machine.memory()[0x500..0x505], &values[..=4]);
        assert_eq!(machine.memory()[0x505], 0);
        assert_eq!(machine.index_register(), 0x0500);

        machine.registers = [0; cpu::register::SIZE];
        run(&mut machine, 0xF365);

        assert_eq!(&machine.registers()[..=3], &values[..=3]);
        assert_eq!(machine.registers()[4], 0);
    }

    #[test]
    fn test_store_wraps_around_memory() {
        let mut machine = get_default_machine();
        machine.index_register = 0x0FFF;
        machine.registers[0x0] = 0xAA;
        machine.registers[0x1] = 0xBB;

        run(&mut machine, 0xF155);

        assert_eq!(machine.memory()[0x0FFF], 0xAA);
        assert_eq!(machine.memory()[0x0000], 0xBB);
    }
}
