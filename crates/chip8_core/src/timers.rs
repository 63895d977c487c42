/// Emitted when the sound timer runs out, the host should stop its tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneEnd;

/// Delay and sound counters, decremented at 60 Hz by `tick`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}
impl Timers {
    pub fn tick(&mut self) -> Option<ToneEnd> {
        self.delay = self.delay.saturating_sub(1);
        if self.sound == 0 { return None }
        self.sound -= 1;
        if self.sound == 0 { Some(ToneEnd) } else { None }
    }
    pub fn tone_active(&self) -> bool {
        self.sound > 0
    }
}
