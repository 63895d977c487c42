use log::{debug, warn};

use crate::{
    cpu::Cpu,
    errors::ChipError,
    globals::DEFAULT_CYCLES_PER_FRAME,
    timers::ToneEnd,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Instructions executed before each timer tick
    pub cycles_per_frame: usize,
    /// Stop on unrecognized opcodes instead of logging and skipping them
    pub halt_on_decode_error: bool,
}
impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            halt_on_decode_error: false,
        }
    }
}

/// Outcome of a single driven frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub executed: usize,
    pub tone_end: Option<ToneEnd>,
    pub redraw: bool,
    /// Set while the driver is halted, including the frame that faulted
    pub fault: Option<ChipError>,
}

/// Runs a fixed batch of instructions followed by one timer tick per frame,
/// keeping instruction throughput independent of the 60 Hz timers.
pub struct Driver {
    cpu: Cpu,
    config: DriverConfig,
    fault: Option<ChipError>,
}
impl Driver {
    pub fn new(cpu: Cpu, config: DriverConfig) -> Self {
        Driver { cpu, config, fault: None }
    }
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }
    /// The fault that stopped execution, if any
    pub fn halted(&self) -> Option<ChipError> {
        self.fault
    }
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.fault = None;
    }
    /// Executes up to `cycles_per_frame` instructions, then ticks the timers once.
    /// The batch ends early while the program waits for a key. A halted driver
    /// skips the batch but still ticks the timers.
    pub fn run_frame(&mut self) -> Frame {
        let mut frame = Frame::default();
        if self.fault.is_none() {
            self.run_batch(&mut frame);
        }
        frame.tone_end = self.cpu.tick_timers();
        frame.redraw = self.cpu.consume_redraw_flag();
        frame.fault = self.fault;
        frame
    }
    fn run_batch(&mut self, frame: &mut Frame) {
        for _ in 0..self.config.cycles_per_frame {
            match self.cpu.step() {
                Ok(()) if self.cpu.awaiting_key() => break,
                Ok(()) => frame.executed += 1,
                Err(e @ ChipError::DecodeError { .. }) if !self.config.halt_on_decode_error => {
                    warn!("{}, skipping", e);
                    frame.executed += 1;
                },
                Err(e) => {
                    debug!("halted: {} at {:?}", e, self.cpu.state());
                    self.fault = Some(e);
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn driver_with(ops: &[u16], config: DriverConfig) -> Driver {
        let rom: Vec<u8> = ops.iter().flat_map(|op| op.to_be_bytes()).collect();
        let mut cpu = Cpu::with_seed(1);
        cpu.load(&rom).unwrap();
        Driver::new(cpu, config)
    }

    #[test]
    fn runs_batch_then_ticks() {
        // ADD V0, 1 ; JP 0x200
        let mut driver = driver_with(&[0x7001, 0x1200], DriverConfig::default());
        driver.cpu_mut().state_mut().timers.delay = 10;
        let frame = driver.run_frame();
        assert_eq!(frame.executed, 10);
        assert_eq!(driver.cpu().state().v[0], 5);
        assert_eq!(driver.cpu().state().timers.delay, 9);
        assert!(!frame.redraw);
    }
    #[test]
    fn cycles_per_frame_is_configurable() {
        let config = DriverConfig { cycles_per_frame: 3, ..Default::default() };
        let mut driver = driver_with(&[0x7001, 0x7001, 0x7001, 0x7001], config);
        driver.run_frame();
        assert_eq!(driver.cpu().state().v[0], 3);
        assert_eq!(driver.cpu().state().pc, 0x206);
    }
    #[test]
    fn reports_tone_end_and_redraw() {
        // LD V0, 1 ; LD ST, V0 ; CLS ; JP 0x206
        let mut driver = driver_with(&[0x6001, 0xF018, 0x00E0, 0x1206], DriverConfig::default());
        let frame = driver.run_frame();
        assert_eq!(frame.tone_end, Some(ToneEnd));
        assert!(frame.redraw);
        let frame = driver.run_frame();
        assert_eq!(frame.tone_end, None);
        assert!(!frame.redraw);
    }
    #[test]
    fn waiting_for_key_ends_batch() {
        let mut driver = driver_with(&[0xF30A, 0x7101], DriverConfig::default());
        driver.cpu_mut().state_mut().timers.delay = 2;
        let frame = driver.run_frame();
        assert_eq!(frame.executed, 0);
        assert_eq!(driver.cpu().state().pc, 0x200);
        assert_eq!(driver.cpu().state().timers.delay, 1);

        driver.cpu_mut().set_key(0x4, true).unwrap();
        let frame = driver.run_frame();
        assert_eq!(frame.executed, 10);
        assert_eq!(driver.cpu().state().v[3], 0x4);
    }
    #[test]
    fn decode_errors_are_skipped() {
        let mut driver = driver_with(&[0x0123, 0x6005], DriverConfig { cycles_per_frame: 2, ..Default::default() });
        let frame = driver.run_frame();
        assert_eq!(frame.executed, 2);
        assert_eq!(driver.cpu().state().v[0], 5);
        assert_eq!(driver.halted(), None);
    }
    #[test]
    fn decode_errors_can_halt() {
        let config = DriverConfig { halt_on_decode_error: true, ..Default::default() };
        let mut driver = driver_with(&[0x0123, 0x6005], config);
        let err = ChipError::DecodeError { opcode: 0x0123 };
        assert_eq!(driver.run_frame().fault, Some(err));
        assert_eq!(driver.halted(), Some(err));
        assert_eq!(driver.cpu().state().v[0], 0);
    }
    #[test]
    fn fault_halts_until_reset() {
        // RET with an empty stack
        let mut driver = driver_with(&[0x00EE], DriverConfig::default());
        driver.cpu_mut().state_mut().timers.sound = 1;
        let frame = driver.run_frame();
        assert_eq!(frame.fault, Some(ChipError::StackUnderflow));
        assert_eq!(frame.executed, 0);
        // timers still ticked
        assert_eq!(frame.tone_end, Some(ToneEnd));
        assert_eq!(driver.cpu().state().timers.sound, 0);
        assert_eq!(driver.run_frame().fault, Some(ChipError::StackUnderflow));
        assert_eq!(driver.cpu().state().pc, 0x200);

        driver.reset();
        assert_eq!(driver.halted(), None);
        assert_eq!(driver.cpu().state().pc, 0x200);
        assert_eq!(driver.cpu().current_instruction(), Ok(crate::Instruction::Ret));
        assert_eq!(driver.run_frame().fault, Some(ChipError::StackUnderflow));
    }
    #[test]
    fn halted_driver_keeps_timers_running() {
        // LD V0, 30 ; LD ST, V0 ; RET with an empty stack
        let mut driver = driver_with(&[0x601E, 0xF018, 0x00EE], DriverConfig::default());
        let mut tone_ends = 0;
        for _ in 0..120 {
            let frame = driver.run_frame();
            assert_eq!(frame.fault, Some(ChipError::StackUnderflow));
            if frame.tone_end.is_some() {
                tone_ends += 1;
            }
        }
        assert_eq!(tone_ends, 1);
        assert_eq!(driver.cpu().state().timers.sound, 0);
        assert!(!driver.cpu().tone_active());
        assert_eq!(driver.cpu().state().pc, 0x204);
    }
}
