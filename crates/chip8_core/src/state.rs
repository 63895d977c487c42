use crate::{
    display::Framebuffer,
    font::FONT,
    globals::{FONT_ADDR, PROGRAM_START, RAM_SIZE, REG_COUNT, STACK_SIZE},
    keypad::Keypad,
    timers::Timers,
};

/// Complete machine state. A plain record: the interpreter is responsible
/// for bounds-checking every access it makes into it.
#[derive(Clone, PartialEq, Eq)]
pub struct VmState {
    pub memory: [u8; RAM_SIZE],
    pub v: [u8; REG_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_SIZE],
    pub timers: Timers,
    pub display: Framebuffer,
    pub keys: Keypad,
    pub redraw: bool,
}
impl VmState {
    /// Power-on state: everything zeroed, font installed, pc at program start
    pub fn new() -> Self {
        let mut state = VmState {
            memory: [0; RAM_SIZE],
            v: [0; REG_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            timers: Timers::default(),
            display: Framebuffer::new(),
            keys: Keypad::new(),
            redraw: false,
        };
        let font = FONT_ADDR as usize;
        state.memory[font..font + FONT.len()].copy_from_slice(&FONT);
        state
    }
}
impl Default for VmState {
    fn default() -> Self {
        Self::new()
    }
}
impl std::fmt::Debug for VmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VmState")
            .field("pc", &format_args!("{:#06X}", self.pc))
            .field("i", &format_args!("{:#06X}", self.i))
            .field("v", &self.v)
            .field("stack", &&self.stack[..self.sp])
            .field("timers", &self.timers)
            .field("redraw", &self.redraw)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn power_on_state() {
        let state = VmState::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.i, 0);
        assert_eq!(&state.memory[..0x50], &FONT);
        assert!(state.memory[0x50..].iter().all(|&b| b == 0));
        assert!(!state.redraw);
    }
}
