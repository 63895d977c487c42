use std::path::PathBuf;

use clap::Parser;

use chip8_core::{DriverConfig, globals::DEFAULT_CYCLES_PER_FRAME};

#[derive(Parser, Debug)]
#[command(version, about = "CHIP-8 interpreter", long_about = None)]
pub struct Args {
    /// Path to a raw CHIP-8 program
    pub rom: PathBuf,

    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_FRAME, help = "Instructions executed per 60 Hz frame")]
    pub cycles: usize,

    #[arg(short, long, default_value_t = 8, help = "Window pixels per CHIP-8 pixel")]
    pub scale: usize,

    #[arg(long, help = "Seed for the random number opcode")]
    pub seed: Option<u64>,

    #[arg(long, help = "Stop on unrecognized opcodes instead of skipping them")]
    pub halt_on_decode_error: bool,

    #[arg(long, help = "Disable the tone")]
    pub mute: bool,
}

/// Host settings derived from the command line
#[derive(Debug, Clone)]
pub struct Config {
    pub rom: PathBuf,
    pub scale: usize,
    pub seed: Option<u64>,
    pub mute: bool,
    pub driver: DriverConfig,
}
impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            rom: args.rom,
            scale: args.scale.max(1),
            seed: args.seed,
            mute: args.mute,
            driver: DriverConfig {
                cycles_per_frame: args.cycles,
                halt_on_decode_error: args.halt_on_decode_error,
            },
        }
    }
}
