//! Opcode abstractions, functionality and constants.
use std::convert::TryFrom;

use crate::{
    definitions::memory::{self, opcodes},
    OpcodeError, ProcessError,
};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a single byte
const BYTE_SIZE: u16 = 0x8;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from memory at the given pointer
/// # Arguments
///
/// - `memory` - The machine memory the opcode is read from
/// - `pointer` - Where in memory the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up. Both addresses wrap around the end of memory.
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::definitions::memory;
///  let mut ram = [0u8; memory::SIZE];
///  ram[0x200..0x204].copy_from_slice(&[0x00, 0xEE, 0x1E, 0xDA]);
///  assert_eq!(build_opcode(&ram, 0x200), 0x00EE);
///  assert_eq!(build_opcode(&ram, 0x202), 0x1EDA);
///
///  ram[0xFFF] = 0x12;
///  ram[0x000] = 0x34;
///  assert_eq!(build_opcode(&ram, 0xFFF), 0x1234);
/// ```
pub fn build_opcode(data: &[u8; memory::SIZE], pointer: u16) -> Opcode {
    let high = data[pointer as usize % memory::SIZE];
    let low = data[(pointer as usize + 1) % memory::SIZE];
    Opcode::from_be_bytes([high, low])
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// this is an opcode extractor that will return the
    /// opcode family (the high nibble) of any opcode
    /// - `T` is the opcode type
    fn t(&self) -> u8;

    /// this is an opcode extractor for the opcode type `TNNN`
    /// - `T` is the opcode type
    /// - `NNN` is an address
    fn nnn(&self) -> u16;

    /// this is an opcode extractor for the opcode type `TXNN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `NN` is a constant
    fn xnn(&self) -> (usize, u8);

    /// this is an opcode extractor for the opcode type `TXYN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `Y` is a register index
    /// - `N` is a nibble constant or opcode subtype
    fn xyn(&self) -> (usize, usize, u8);

    /// this is an opcode extractor for the opcode type `TXYT`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `Y` is a register index
    fn xy(&self) -> (usize, usize);

    /// this is an opcode extractor for the opcode type `TXTT`
    /// - `T` is the opcode type
    /// - `X` is a register index
    fn x(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TTYT`
    /// - `T` is the opcode type
    /// - `Y` is a register index
    fn y(&self) -> usize;

    /// the low nibble of the opcode
    fn n(&self) -> u8;

    /// the low byte of the opcode
    fn nn(&self) -> u8;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        const SHIFT: u16 = BYTE_SIZE + BYTE_SIZE / 2;
        ((self & OPCODE_MASK_F000) >> SHIFT) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> u16 {
        self & OPCODE_MASK_0FFF
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        (self.x(), self.nn())
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, u8) {
        let (x, y) = self.xy();
        (x, y, self.n())
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xy(), (0xE, 0xD));
    /// ```
    fn xy(&self) -> (usize, usize) {
        (self.x(), self.y())
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> BYTE_SIZE) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.y(), 0xD);
    /// ```
    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        const NIBBLE: u16 = BYTE_SIZE / 2;
        ((self & MASK) >> NIBBLE) as usize
    }

    fn n(&self) -> u8 {
        (self & OPCODE_MASK_000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will not change the program counter
    None,
    /// Will move the program counter to the next instruction
    Next,
    /// Will skip the next instruction
    Skip,
    /// Will simply move the program counter to the given location,
    /// masked to the 12 bit address space.
    Jump(u16),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Applies the step to the given program counter.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next.apply(0x200), 0x202);
    /// assert_eq!(ProgramCounterStep::Skip.apply(0x200), 0x204);
    /// assert_eq!(ProgramCounterStep::None.apply(0x200), 0x200);
    /// assert_eq!(ProgramCounterStep::Jump(0x1234).apply(0x200), 0x234);
    /// ```
    #[inline]
    pub fn apply(&self, program_counter: u16) -> u16 {
        let next = match *self {
            ProgramCounterStep::None => program_counter,
            ProgramCounterStep::Next => program_counter.wrapping_add(opcodes::SIZE),
            ProgramCounterStep::Skip => program_counter.wrapping_add(2 * opcodes::SIZE),
            ProgramCounterStep::Jump(pointer) => pointer,
        };
        next & memory::ADDRESS_MASK
    }
}

/// Decodes a single part of an instruction from a raw opcode.
trait Decode: Sized {
    fn decode(opcode: Opcode) -> Option<Self>;
}

/// Generates the decoder for a sub opcode table selected by one of the
/// [`OpcodeTrait`](OpcodeTrait) extractors.
macro_rules! implDecodeEnum {
    ($type_name:ty : $field:ident : $( $key:literal => $val:expr ),+ $(,)? ) => {
        impl Decode for $type_name {
            fn decode(opcode: Opcode) -> Option<Self> {
                match opcode.$field() {
                    $(
                        $key => Some($val),
                    )+
                    _ => None,
                }
            }
        }
    };
}

/// Generates the decoder for an opcode that carries a sub opcode table
/// and the given register operands.
///
/// Every operand field is filled by the [`OpcodeTrait`](OpcodeTrait) extractor of the same name.
macro_rules! implDecodeOps {
    ($type_name:ident : $( $field:ident ),+ ) => {
        impl Decode for $type_name {
            fn decode(opcode: Opcode) -> Option<Self> {
                let ops = Decode::decode(opcode)?;
                Some($type_name { ops, $( $field: opcode.$field() ),+ })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The operand of the `TNNN` opcodes
pub struct Address {
    pub nnn: u16,
}

impl Decode for Address {
    fn decode(opcode: Opcode) -> Option<Self> {
        Some(Address { nnn: opcode.nnn() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The operands of the `TXNN` opcodes
pub struct RegisterConst {
    pub x: usize,
    pub nn: u8,
}

impl Decode for RegisterConst {
    fn decode(opcode: Opcode) -> Option<Self> {
        let (x, nn) = opcode.xnn();
        Some(RegisterConst { x, nn })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The operands of the `TXY0` opcodes, any other low nibble is illegal
pub struct RegisterPair {
    pub x: usize,
    pub y: usize,
}

impl Decode for RegisterPair {
    fn decode(opcode: Opcode) -> Option<Self> {
        match opcode.xyn() {
            (x, y, 0) => Some(RegisterPair { x, y }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The operands of the `DXYN` opcode
pub struct Sprite {
    pub x: usize,
    pub y: usize,
    pub n: u8,
}

impl Decode for Sprite {
    fn decode(opcode: Opcode) -> Option<Self> {
        let (x, y, n) = opcode.xyn();
        Some(Sprite { x, y, n })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// Clears the display
    Clear,
    /// Returns from the subroutine
    Return,
    /// Calls a machine code routine, handled as a jump
    MachineCall { nnn: u16 },
}

impl Decode for System {
    fn decode(opcode: Opcode) -> Option<Self> {
        // the full word matches take precedence over the generic 0NNN
        let system = match opcode {
            0x00E0 => System::Clear,
            0x00EE => System::Return,
            _ => System::MachineCall { nnn: opcode.nnn() },
        };
        Some(system)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOpcode {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
}

implDecodeEnum!(ArithmeticOpcode : n :
    // 8XY0
    0x0 => ArithmeticOpcode::Assign,
    // 8XY1
    0x1 => ArithmeticOpcode::Or,
    // 8XY2
    0x2 => ArithmeticOpcode::And,
    // 8XY3
    0x3 => ArithmeticOpcode::Xor,
    // 8XY4
    0x4 => ArithmeticOpcode::Add,
    // 8XY5
    0x5 => ArithmeticOpcode::Sub,
    // 8XY6
    0x6 => ArithmeticOpcode::ShiftRight,
    // 8XY7
    0x7 => ArithmeticOpcode::SubReverse,
    // 8XYE
    0xE => ArithmeticOpcode::ShiftLeft,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub ops: ArithmeticOpcode,
    pub x: usize,
    pub y: usize,
}

implDecodeOps!(Arithmetic : x, y);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOpcode {
    Pressed,
    Released,
}

implDecodeEnum!(KeyOpcode : nn :
    // EX9E
    0x9E => KeyOpcode::Pressed,
    // EXA1
    0xA1 => KeyOpcode::Released,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCheck {
    pub ops: KeyOpcode,
    pub x: usize,
}

implDecodeOps!(KeyCheck : x);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOpcode {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddVxToI,
    SetIToSprite,
    StoreBCD,
    StoreV0ToVx,
    FillV0ToVx,
}

implDecodeEnum!(MiscOpcode : nn :
    // FX07
    0x07 => MiscOpcode::GetDelayTimer,
    // FX0A
    0x0A => MiscOpcode::AwaitKeyPress,
    // FX15
    0x15 => MiscOpcode::SetDelayTimer,
    // FX18
    0x18 => MiscOpcode::SetSoundTimer,
    // FX1E
    0x1E => MiscOpcode::AddVxToI,
    // FX29
    0x29 => MiscOpcode::SetIToSprite,
    // FX33
    0x33 => MiscOpcode::StoreBCD,
    // FX55
    0x55 => MiscOpcode::StoreV0ToVx,
    // FX65
    0x65 => MiscOpcode::FillV0ToVx,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub ops: MiscOpcode,
    pub x: usize,
}

implDecodeOps!(Misc : x);

/// A fully decoded instruction word.
///
/// # Example
/// ```rust
/// # use std::convert::TryFrom;
/// # use chip::opcode::*;
/// let add = Instruction::try_from(0x8124 as Opcode);
/// assert_eq!(
///     add,
///     Ok(Instruction::Arithmetic(Arithmetic {
///         ops: ArithmeticOpcode::Add,
///         x: 0x1,
///         y: 0x2
///     }))
/// );
///
/// let key = Instruction::try_from(0xE3A1 as Opcode);
/// assert_eq!(
///     key,
///     Ok(Instruction::Key(KeyCheck {
///         ops: KeyOpcode::Released,
///         x: 0x3
///     }))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    System(System),
    Jump(Address),
    Call(Address),
    SkipEqualConst(RegisterConst),
    SkipNotEqualConst(RegisterConst),
    SkipEqualRegister(RegisterPair),
    SetConst(RegisterConst),
    AddConst(RegisterConst),
    Arithmetic(Arithmetic),
    SkipNotEqualRegister(RegisterPair),
    SetIndex(Address),
    JumpOffset(Address),
    Random(RegisterConst),
    Draw(Sprite),
    Key(KeyCheck),
    Misc(Misc),
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let decoded = match value.t() {
            0x0 => Decode::decode(value).map(Instruction::System),
            0x1 => Decode::decode(value).map(Instruction::Jump),
            0x2 => Decode::decode(value).map(Instruction::Call),
            0x3 => Decode::decode(value).map(Instruction::SkipEqualConst),
            0x4 => Decode::decode(value).map(Instruction::SkipNotEqualConst),
            0x5 => Decode::decode(value).map(Instruction::SkipEqualRegister),
            0x6 => Decode::decode(value).map(Instruction::SetConst),
            0x7 => Decode::decode(value).map(Instruction::AddConst),
            0x8 => Decode::decode(value).map(Instruction::Arithmetic),
            0x9 => Decode::decode(value).map(Instruction::SkipNotEqualRegister),
            0xA => Decode::decode(value).map(Instruction::SetIndex),
            0xB => Decode::decode(value).map(Instruction::JumpOffset),
            0xC => Decode::decode(value).map(Instruction::Random),
            0xD => Decode::decode(value).map(Instruction::Draw),
            0xE => Decode::decode(value).map(Instruction::Key),
            0xF => Decode::decode(value).map(Instruction::Misc),
            _ => None,
        };
        decoded.ok_or(OpcodeError::IllegalInstruction(value))
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step.
    fn advance(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The machine is waiting for a key press, the same
    /// instruction will run again on the next cycle
    Wait,
    /// The framebuffer changed and shall be redrawn
    Draw,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the  [`ProgramCounter`](ProgramCounter) trait, as
/// every handler only reports how the program counter shall move and
/// [`calc`](ChipOpcodes::calc) applies it.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute a single decoded instruction and move the program counter
    ///
    /// If the handler fails the program counter is left untouched.
    fn calc(&mut self, instruction: &Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step_op = |(step, op): (ProgramCounterStep, Operation)| {
            operation = op;
            step
        };

        let step = match instruction {
            Instruction::System(opcode) => self.system(opcode).map(step_op),
            Instruction::Jump(opcode) => self.jump(opcode),
            Instruction::Call(opcode) => self.call(opcode),
            Instruction::SkipEqualConst(opcode) => self.skip_equal_const(opcode),
            Instruction::SkipNotEqualConst(opcode) => self.skip_not_equal_const(opcode),
            Instruction::SkipEqualRegister(opcode) => self.skip_equal_register(opcode),
            Instruction::SetConst(opcode) => self.set_const(opcode),
            Instruction::AddConst(opcode) => self.add_const(opcode),
            Instruction::Arithmetic(opcode) => self.arithmetic(opcode),
            Instruction::SkipNotEqualRegister(opcode) => self.skip_not_equal_register(opcode),
            Instruction::SetIndex(opcode) => self.set_index(opcode),
            Instruction::JumpOffset(opcode) => self.jump_offset(opcode),
            Instruction::Random(opcode) => self.random(opcode),
            Instruction::Draw(opcode) => self.draw(opcode).map(step_op),
            Instruction::Key(opcode) => self.key(opcode),
            Instruction::Misc(opcode) => self.misc(opcode).map(step_op),
        }?;

        self.advance(step);
        Ok(operation)
    }

    /// A multiuse opcode base for type `0NNN`
    ///
    /// - `0NNN` - Call     -                       - Calls machine code routine ([RCA 1802](https://en.wikipedia.org/wiki/RCA_1802) for COSMAC VIP) at address `NNN`. Handled as a jump.
    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, opcode: &System)
        -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn skip_equal_const(&self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_not_equal_const(
        &self,
        opcode: &RegisterConst,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn skip_equal_register(&self, opcode: &RegisterPair)
        -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn set_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// A mutiuse opcode base for type `8XYT` (T is a sub obcode)
    ///
    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_not_equal_register(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to the result of a bitwise and operation on a random byte and `NN`.
    fn random(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen
    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// A multiuse opcode base for type `EXTT` (T is a sub opcode)
    ///
    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, opcode: &KeyCheck) -> Result<ProgramCounterStep, ProcessError>;

    /// A multiuse opcode base for type `FXTT` (T is a sub opcode)
    ///
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`. The instruction is repeated until a key is down.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is set to `1` if the 16 bit index overflows.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the sprite for the character in `VX`. Characters `0-F` (in hexadecimal) are represented by a `4x5` font.
    /// - `FX33` - BCD      - `246 / 100 => 2` `246 / 10 => 24 % 10 => 4` `246 % 10 => 6` - Stores the [binary-coded decimal](https://en.wikipedia.org/wiki/Binary-coded_decimal) representation of `VX` at `I`, `I+1` and `I+2`, most significant digit first.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`. `I` itself is left unmodified.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`. `I` itself is left unmodified.
    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}
