pub const RAM_SIZE: usize = 4096;
pub const STACK_SIZE: usize = 16;
pub const REG_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

/// Programs are loaded and start executing here
pub const PROGRAM_START: u16 = 0x200;
pub const PROGRAM_SPACE: usize = RAM_SIZE - PROGRAM_START as usize;

pub const FONT_ADDR: u16 = 0x000;
pub const FONT_GLYPH_SIZE: usize = 5;

/// Index of the flag register
pub const VF: usize = 0xF;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_BUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Logical rate of the delay and sound timers
pub const TIMER_HZ: u32 = 60;
pub const DEFAULT_CYCLES_PER_FRAME: usize = 10;
