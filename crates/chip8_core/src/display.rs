use crate::globals::{SCREEN_WIDTH, SCREEN_HEIGHT, SCREEN_BUFFER_SIZE};

/// Monochrome 64x32 framebuffer, one cell (0 or 1) per pixel, row-major
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: [u8; SCREEN_BUFFER_SIZE]
}
impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            buffer: [0; SCREEN_BUFFER_SIZE]
        }
    }
    pub fn clear(&mut self) {
        self.buffer = [0x0; SCREEN_BUFFER_SIZE];
    }
    pub fn as_slice(&self) -> &[u8; SCREEN_BUFFER_SIZE] {
        &self.buffer
    }
    /// Value of the pixel at (x, y), coordinates wrap around the screen
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.buffer[Self::index(x, y)]
    }
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.chunks(SCREEN_WIDTH)
    }
    /// XORs a sprite at (x, y), one byte per row, msb leftmost.
    /// Every pixel coordinate wraps, so drawing never leaves the screen.
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;
        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..8 {
                if row & (0x80 >> dx) == 0 { continue }
                let i = Self::index(x + dx, y + dy);
                collision |= self.buffer[i] == 1;
                self.buffer[i] ^= 1;
            }
        }
        collision
    }
    #[inline(always)]
    fn index(x: usize, y: usize) -> usize {
        (y % SCREEN_HEIGHT) * SCREEN_WIDTH + x % SCREEN_WIDTH
    }
}
impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&p| if p == 1 { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
