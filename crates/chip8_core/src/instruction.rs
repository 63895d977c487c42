use std::fmt;

use crate::{
    errors::ChipError,
    utils::{nibbles, u8_from_two, u16_from_three},
};

/// Register index (0x0 - 0xF)
pub type Reg = u8;

/// A decoded CHIP-8 instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipEqImm(Reg, u8),
    /// 4XNN
    SkipNeImm(Reg, u8),
    /// 5XY0
    SkipEqReg(Reg, Reg),
    /// 6XNN
    LoadImm(Reg, u8),
    /// 7XNN
    AddImm(Reg, u8),
    /// 8XY0
    Move(Reg, Reg),
    /// 8XY1
    Or(Reg, Reg),
    /// 8XY2
    And(Reg, Reg),
    /// 8XY3
    Xor(Reg, Reg),
    /// 8XY4
    AddReg(Reg, Reg),
    /// 8XY5
    SubReg(Reg, Reg),
    /// 8XY6
    ShiftRight(Reg, Reg),
    /// 8XY7
    SubNeg(Reg, Reg),
    /// 8XYE
    ShiftLeft(Reg, Reg),
    /// 9XY0
    SkipNeReg(Reg, Reg),
    /// ANNN
    LoadIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXNN
    Random(Reg, u8),
    /// DXYN
    Draw(Reg, Reg, u8),
    /// EX9E
    SkipKey(Reg),
    /// EXA1
    SkipNotKey(Reg),
    /// FX07
    GetDelay(Reg),
    /// FX0A
    WaitKey(Reg),
    /// FX15
    SetDelay(Reg),
    /// FX18
    SetSound(Reg),
    /// FX1E
    AddIndex(Reg),
    /// FX29
    Glyph(Reg),
    /// FX33
    Bcd(Reg),
    /// FX55
    Store(Reg),
    /// FX65
    Restore(Reg),
}

impl Instruction {
    pub fn decode(opcode: u16) -> Result<Self, ChipError> {
        use Instruction::*;
        let inst = match nibbles(opcode) {
            (0, 0, 0xE, 0) => Cls,
            (0, 0, 0xE, 0xE) => Ret,
            (1, n0, n1, n2) => Jump(u16_from_three(n0, n1, n2)),
            (2, n0, n1, n2) => Call(u16_from_three(n0, n1, n2)),
            (3, x, n0, n1) => SkipEqImm(x, u8_from_two(n0, n1)),
            (4, x, n0, n1) => SkipNeImm(x, u8_from_two(n0, n1)),
            (5, x, y, 0) => SkipEqReg(x, y),
            (6, x, n0, n1) => LoadImm(x, u8_from_two(n0, n1)),
            (7, x, n0, n1) => AddImm(x, u8_from_two(n0, n1)),
            (8, x, y, 0) => Move(x, y),
            (8, x, y, 1) => Or(x, y),
            (8, x, y, 2) => And(x, y),
            (8, x, y, 3) => Xor(x, y),
            (8, x, y, 4) => AddReg(x, y),
            (8, x, y, 5) => SubReg(x, y),
            (8, x, y, 6) => ShiftRight(x, y),
            (8, x, y, 7) => SubNeg(x, y),
            (8, x, y, 0xE) => ShiftLeft(x, y),
            (9, x, y, 0) => SkipNeReg(x, y),
            (0xA, n0, n1, n2) => LoadIndex(u16_from_three(n0, n1, n2)),
            (0xB, n0, n1, n2) => JumpOffset(u16_from_three(n0, n1, n2)),
            (0xC, x, n0, n1) => Random(x, u8_from_two(n0, n1)),
            (0xD, x, y, n) => Draw(x, y, n),
            (0xE, x, 9, 0xE) => SkipKey(x),
            (0xE, x, 0xA, 1) => SkipNotKey(x),
            (0xF, x, 0, 7) => GetDelay(x),
            (0xF, x, 0, 0xA) => WaitKey(x),
            (0xF, x, 1, 5) => SetDelay(x),
            (0xF, x, 1, 8) => SetSound(x),
            (0xF, x, 1, 0xE) => AddIndex(x),
            (0xF, x, 2, 9) => Glyph(x),
            (0xF, x, 3, 3) => Bcd(x),
            (0xF, x, 5, 5) => Store(x),
            (0xF, x, 6, 5) => Restore(x),
            _ => return Err(ChipError::DecodeError { opcode }),
        };
        Ok(inst)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump(addr) => write!(f, "JP {:#05X}", addr),
            Call(addr) => write!(f, "CALL {:#05X}", addr),
            SkipEqImm(x, nn) => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipNeImm(x, nn) => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipEqReg(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm(x, nn) => write!(f, "LD V{:X}, {:#04X}", x, nn),
            AddImm(x, nn) => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            SubReg(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x, y) => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubNeg(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x, y) => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNeReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(addr) => write!(f, "LD I, {:#05X}", addr),
            JumpOffset(addr) => write!(f, "JP V0, {:#05X}", addr),
            Random(x, nn) => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKey(x) => write!(f, "SKP V{:X}", x),
            SkipNotKey(x) => write!(f, "SKNP V{:X}", x),
            GetDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            Glyph(x) => write!(f, "LD F, V{:X}", x),
            Bcd(x) => write!(f, "LD B, V{:X}", x),
            Store(x) => write!(f, "LD [I], V{:X}", x),
            Restore(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
