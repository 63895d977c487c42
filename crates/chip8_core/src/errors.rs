use thiserror::Error;

/// Faults raised by the interpreter and the key-input interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChipError {
    #[error("unrecognized opcode {opcode:#06X}")]
    DecodeError { opcode: u16 },
    #[error("call stack overflow")]
    StackOverflow,
    #[error("return with an empty call stack")]
    StackUnderflow,
    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },
    #[error("invalid key index {index}")]
    InvalidKeyIndex { index: u8 },
}

/// Returned by `load` when the program did not fit into program space.
/// The first `written` bytes were still loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("program truncated: {written} bytes loaded, {dropped} bytes dropped")]
pub struct Truncated {
    pub written: usize,
    pub dropped: usize,
}
