use minifb::{Key, Window};

/// QWERTY block mapped onto the hex keypad:
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D      Q W E R
/// 7 8 9 E      A S D F
/// A 0 B F      Z X C V
/// ```
pub const KEYMAP: [(Key, u8); 16] = [
    (Key::Key1, 0x1), (Key::Key2, 0x2), (Key::Key3, 0x3), (Key::Key4, 0xC),
    (Key::Q, 0x4), (Key::W, 0x5), (Key::E, 0x6), (Key::R, 0xD),
    (Key::A, 0x7), (Key::S, 0x8), (Key::D, 0x9), (Key::F, 0xE),
    (Key::Z, 0xA), (Key::X, 0x0), (Key::C, 0xB), (Key::V, 0xF),
];

/// Current state of every keypad key, indexed by hex value
pub fn read_keys(window: &Window) -> [bool; 16] {
    let mut keys = [false; 16];
    for (key, index) in KEYMAP {
        keys[index as usize] = window.is_key_down(key);
    }
    keys
}
