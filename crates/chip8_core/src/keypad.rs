use crate::{errors::ChipError, globals::KEY_COUNT};

/// Latched state of the 16 hex keys, written by the input layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT]
}
impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set(&mut self, index: u8, pressed: bool) -> Result<(), ChipError> {
        let key = self.keys.get_mut(index as usize)
            .ok_or(ChipError::InvalidKeyIndex { index })?;
        *key = pressed;
        Ok(())
    }
    pub fn is_pressed(&self, index: u8) -> Result<bool, ChipError> {
        self.keys.get(index as usize)
            .copied()
            .ok_or(ChipError::InvalidKeyIndex { index })
    }
    /// Lowest pressed key, if any
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|i| i as u8)
    }
}
