use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use chip8_core::{
    Cpu, Driver, Framebuffer,
    globals::{SCREEN_WIDTH, SCREEN_HEIGHT, TIMER_HZ}
};

mod audio;
mod config;
mod input;

use config::{Args, Config};

const ON: u32 = 0x00FF_FFFF;
const OFF: u32 = 0x0000_0000;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::from(Args::parse());

    let rom = std::fs::read(&config.rom)
        .with_context(|| format!("could not read {}", config.rom.display()))?;
    let mut cpu = match config.seed {
        Some(seed) => Cpu::with_seed(seed),
        None => Cpu::new()
    };
    if let Err(truncated) = cpu.load(&rom) {
        warn!("{}: {}", config.rom.display(), truncated);
    }
    info!("loaded {} ({} bytes)", config.rom.display(), rom.len());
    let mut driver = Driver::new(cpu, config.driver);

    let (w, h) = (config.scale * SCREEN_WIDTH, config.scale * SCREEN_HEIGHT);
    let mut window = Window::new("CHIP-8", w, h, WindowOptions::default())
        .context("could not open window")?;
    window.set_target_fps(TIMER_HZ as usize);

    let mut buffer = vec![OFF; w * h];
    let mut sound = (!config.mute).then(audio::get_device);
    let mut reported = false;
    let mut dirty = true;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if window.is_key_pressed(Key::Backspace, KeyRepeat::No) {
            info!("reset");
            driver.reset();
            reported = false;
            dirty = true;
        }
        for (index, pressed) in input::read_keys(&window).into_iter().enumerate() {
            driver.cpu_mut().set_key(index as u8, pressed)?;
        }

        let frame = driver.run_frame();
        if let (Some(device), Some(_)) = (sound.as_mut(), frame.tone_end) {
            device.stop();
        }
        dirty |= frame.redraw;
        // the driver stays halted until reset, report once
        if let Some(e) = frame.fault.filter(|_| !reported) {
            error!("halted: {} (backspace to restart)", e);
            reported = true;
        }
        if let Some(device) = sound.as_mut() {
            if driver.cpu().tone_active() {
                device.beep();
            } else if device.is_playing() {
                device.stop();
            }
        }

        if dirty {
            read_buffer(&mut buffer, driver.cpu().framebuffer(), config.scale);
            dirty = false;
            window.update_with_buffer(&buffer, w, h)?;
        } else {
            window.update();
        }
    }
    Ok(())
}

fn read_buffer(buffer: &mut [u32], input: &Framebuffer, scale: usize) {
    let w = scale * SCREEN_WIDTH;
    for (y, row) in input.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let val = if px == 1 { ON } else { OFF };
            for sy in 0..scale {
                let start = (y * scale + sy) * w + x * scale;
                buffer[start..start + scale].fill(val);
            }
        }
    }
}
