//! CHIP-8 virtual machine core.
//!
//! `Cpu` executes one instruction per `step()`; `Driver` batches steps and
//! ticks the 60 Hz timers once per frame. Rendering, input, sound and ROM
//! files belong to the host, which talks to the core through `load`,
//! `set_key`, `framebuffer`, `consume_redraw_flag` and `tick_timers`.
mod cpu;
mod display;
mod driver;
mod errors;
mod font;
pub mod globals;
mod instruction;
mod keypad;
mod state;
mod timers;
mod utils;

pub use cpu::Cpu;
pub use display::Framebuffer;
pub use driver::{Driver, DriverConfig, Frame};
pub use errors::{ChipError, Truncated};
pub use font::FONT;
pub use instruction::{Instruction, Reg};
pub use keypad::Keypad;
pub use state::VmState;
pub use timers::{Timers, ToneEnd};
