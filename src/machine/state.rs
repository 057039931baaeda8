use std::convert::TryFrom;

use rand::{
    rngs::{OsRng, StdRng},
    RngCore, SeedableRng,
};

use crate::{
    definitions::{cpu, display, keyboard, memory},
    devices::Keyboard,
    opcode::{
        self, ChipOpcodes, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep,
    },
    timer::{Timed, Timer},
    LoadError, ProcessError, StackError,
};

/// The one shot sound events a cycle can produce.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Sound {
    /// The sound timer just reached zero
    Stop,
}

/// Describes everything that happened during a single
/// [`step`](Machine::step) of the machine.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Cycle {
    /// The opcode that was fetched this cycle
    pub opcode: Opcode,
    /// What the host is expected to do after this cycle
    pub operation: Operation,
    /// The diagnostic of this cycle, faults never stop the machine
    pub fault: Option<ProcessError>,
    /// Set on the single cycle where the sound timer moved onto zero
    pub sound: Option<Sound>,
}

/// The Machine struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instance of the
/// Chip8 CPU.
pub struct Machine {
    /// the last fetched opcode, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x0A0` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: [u8; memory::SIZE],
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: u16,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; here we are using `16`.
    pub(super) stack: [u16; cpu::stack::SIZE],
    /// Points at the next free stack entry
    pub(super) stack_pointer: usize,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: Timer,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`, stored row-major with one byte per pixel `(1 or 0)`.
    pub(super) display: [u8; display::RESOLUTION],
    /// Raised whenever the display changed, cleared by the host after rendering
    pub(super) draw_flag: bool,
    pub(super) keyboard: Keyboard,
    /// This stores the random number generator, used by the machine.
    /// It is stored as a trait object, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl Machine {
    /// will create a new machine seeded from the operating system
    pub fn new() -> Self {
        Self::with_seed(OsRng.next_u64())
    }

    /// will create a new machine with a reproducible random number generator
    pub fn with_seed(seed: u64) -> Self {
        let mut machine = Self {
            opcode: 0,
            memory: [0; memory::SIZE],
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: 0,
            stack: [0; cpu::stack::SIZE],
            stack_pointer: 0,
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            display: [0; display::RESOLUTION],
            draw_flag: false,
            keyboard: Keyboard::new(),
            rng: Box::new(StdRng::seed_from_u64(seed)),
        };
        machine.reset(seed);
        machine
    }

    /// Will bring the machine back into its power on state and
    /// install the font set. Can be called any amount of times.
    pub fn reset(&mut self, seed: u64) {
        log::debug!("resetting machine with seed {:#X}", seed);

        self.opcode = 0;
        self.memory = [0; memory::SIZE];

        // load fonts
        let font = display::fontset::LOCATION;
        self.memory[font..(font + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER as u16;
        self.stack = [0; cpu::stack::SIZE];
        self.stack_pointer = 0;
        self.delay_timer.set_value(0);
        self.sound_timer.set_value(0);
        self.display = [0; display::RESOLUTION];
        self.draw_flag = false;
        self.keyboard.reset();
        self.rng = Box::new(StdRng::seed_from_u64(seed));
    }

    /// Will copy the program image into the program area, nothing else is
    /// touched. Call [`reset`](Machine::reset) first when reloading.
    pub fn load(&mut self, image: &[u8]) -> Result<(), LoadError> {
        if image.len() > cpu::PROGRAM_CAPACITY {
            log::warn!(
                "Refusing program image of {} bytes, only {} bytes are available",
                image.len(),
                cpu::PROGRAM_CAPACITY
            );
            return Err(LoadError::TooLarge {
                size: image.len(),
                capacity: cpu::PROGRAM_CAPACITY,
            });
        }

        // write the rom data into memory
        self.memory[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + image.len())]
            .copy_from_slice(image);

        log::info!("loaded program image of {} bytes", image.len());
        Ok(())
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter);
    }

    /// will advance the program by a single fetch, decode, execute and
    /// timer cycle
    pub fn step(&mut self) -> Cycle {
        let pointer = self.program_counter;
        self.set_opcode();
        log::trace!("opcode {:#06X} at {:#06X}", self.opcode, pointer);

        let result = Instruction::try_from(self.opcode)
            .map_err(|err| {
                // unknown opcodes are skipped
                self.advance(ProgramCounterStep::Next);
                ProcessError::from(err)
            })
            .and_then(|instruction| self.calc(&instruction));

        let (operation, fault) = match result {
            Ok(operation) => (operation, None),
            Err(err) => {
                self.report(pointer, err);
                (Operation::None, Some(err))
            }
        };

        let sound = self.update_timers();

        Cycle {
            opcode: self.opcode,
            operation,
            fault,
            sound,
        }
    }

    fn report(&self, pointer: u16, err: ProcessError) {
        log::warn!(
            "Bad opcode {:#06X} at {:#06X} ({:#06X}): {}",
            self.opcode,
            pointer,
            pointer.wrapping_sub(cpu::PROGRAM_COUNTER as u16),
            err
        );
    }

    /// Both timers count down once per cycle, only the sound timer
    /// reports reaching zero.
    fn update_timers(&mut self) -> Option<Sound> {
        self.delay_timer.tick();
        if self.sound_timer.tick() {
            Some(Sound::Stop)
        } else {
            None
        }
    }

    /// Will write keyboard data into interncal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keyboard.set_mult(keys);
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keyboard.set_key(key, to)
    }

    /// Will flip the state of the given key
    pub fn toggle_key(&mut self, key: usize) {
        self.keyboard.toggle_key(key)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &[bool] {
        self.keyboard.get_keys()
    }

    /// will return the sound timer
    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// Will return a immutable slice of the current display configuration,
    /// addressed as `row * 64 + col`
    pub fn display(&self) -> &[u8] {
        &self.display
    }

    /// Whether the display changed since the flag was last cleared
    pub fn draw_flag(&self) -> bool {
        self.draw_flag
    }

    /// To be called by the host after it rendered the display
    pub fn clear_draw_flag(&mut self) {
        self.draw_flag = false;
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn index_register(&self) -> u16 {
        self.index_register
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    /// Will return the return addresses currently on the stack, oldest first
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer]
    }

    /// Will push the current pointer to the stack
    /// stack_pointer is always one bigger then the
    /// entry it points to
    pub(super) fn push_stack(&mut self, pointer: u16) -> Result<(), StackError> {
        let entry = self
            .stack
            .get_mut(self.stack_pointer)
            .ok_or(StackError::Overflow)?;
        *entry = pointer;
        self.stack_pointer += 1;
        Ok(())
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<u16, StackError> {
        if self.stack_pointer == 0 {
            return Err(StackError::Underflow);
        }
        self.stack_pointer -= 1;
        Ok(self.stack[self.stack_pointer])
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramCounter for Machine {
    fn advance(&mut self, step: ProgramCounterStep) {
        self.program_counter = step.apply(self.program_counter);
    }
}
