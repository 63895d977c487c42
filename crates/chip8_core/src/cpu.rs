use std::ops::Range;

use log::{debug, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    display::Framebuffer,
    errors::{ChipError, Truncated},
    font::glyph_addr,
    globals::{PROGRAM_SPACE, PROGRAM_START, RAM_SIZE, STACK_SIZE, VF},
    instruction::{Instruction, Reg},
    state::VmState,
    timers::ToneEnd,
    utils::{bcd, u16_from_two},
};

pub struct Cpu {
    state: VmState,
    rng: StdRng,
    // last loaded program, re-installed on reset
    program: Vec<u8>,
    awaiting_key: bool,
}
impl Cpu {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
    /// Deterministic random sequence for CXNN
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
    fn with_rng(rng: StdRng) -> Self {
        Cpu {
            state: VmState::new(),
            rng,
            program: Vec::new(),
            awaiting_key: false,
        }
    }
    /// Returns the machine to its power-on state.
    /// The last loaded program is written back to program space.
    pub fn reset(&mut self) {
        self.state = VmState::new();
        self.awaiting_key = false;
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + self.program.len()].copy_from_slice(&self.program);
        debug!("reset, {} program bytes restored", self.program.len());
    }
    /// Copies a program into memory at 0x200.
    /// Input that does not fit is dropped and reported as `Truncated`.
    pub fn load(&mut self, data: &[u8]) -> Result<usize, Truncated> {
        let written = data.len().min(PROGRAM_SPACE);
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + written].copy_from_slice(&data[..written]);
        self.program = data[..written].to_vec();
        debug!("loaded {} program bytes", written);
        if written < data.len() {
            let truncated = Truncated { written, dropped: data.len() - written };
            warn!("{}", truncated);
            return Err(truncated);
        }
        Ok(written)
    }
    pub fn state(&self) -> &VmState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut VmState {
        &mut self.state
    }
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.state.display
    }
    /// Checks and clears the redraw flag
    pub fn consume_redraw_flag(&mut self) -> bool {
        std::mem::take(&mut self.state.redraw)
    }
    pub fn set_key(&mut self, index: u8, pressed: bool) -> Result<(), ChipError> {
        self.state.keys.set(index, pressed)
    }
    /// Advances both timers by one 60 Hz tick
    pub fn tick_timers(&mut self) -> Option<ToneEnd> {
        self.state.timers.tick()
    }
    pub fn tone_active(&self) -> bool {
        self.state.timers.tone_active()
    }
    /// True if the last step was blocked on FX0A with no key pressed
    pub fn awaiting_key(&self) -> bool {
        self.awaiting_key
    }
    /// Decodes the instruction at pc without executing it
    pub fn current_instruction(&self) -> Result<Instruction, ChipError> {
        Instruction::decode(self.fetch()?)
    }
    /// Executes a single instruction.
    /// On a decode error pc still moves past the bad opcode. Any other
    /// error leaves the state untouched, with pc at the faulting instruction.
    pub fn step(&mut self) -> Result<(), ChipError> {
        let pc = self.state.pc;
        let opcode = self.fetch()?;
        let inst = match Instruction::decode(opcode) {
            Ok(inst) => inst,
            Err(e) => {
                self.state.pc = pc.wrapping_add(2);
                return Err(e);
            }
        };
        trace!("{:#05X}: {:04X}  {}", pc, opcode, inst);
        let next = self.execute(inst)?;
        // FX0A leaves pc in place until a key is down
        self.awaiting_key = matches!(inst, Instruction::WaitKey(_)) && next == pc;
        self.state.pc = next;
        Ok(())
    }
    fn fetch(&self) -> Result<u16, ChipError> {
        let range = mem_range(self.state.pc, 2)?;
        let bytes = &self.state.memory[range];
        Ok(u16_from_two(bytes[0], bytes[1]))
    }
    /// Runs the instruction and returns the next pc.
    /// Every fallible check happens before the first mutation.
    fn execute(&mut self, inst: Instruction) -> Result<u16, ChipError> {
        use Instruction::*;
        let pc = self.state.pc;
        let next = pc.wrapping_add(2);
        match inst {
            Cls => {
                self.state.display.clear();
                self.state.redraw = true;
            },
            Ret => return self.pop_stack(),
            Jump(addr) => return Ok(addr),
            Call(addr) => {
                self.push_stack(next)?;
                return Ok(addr);
            },
            SkipEqImm(x, nn) => return Ok(self.skip_if(self.reg(x) == nn)),
            SkipNeImm(x, nn) => return Ok(self.skip_if(self.reg(x) != nn)),
            SkipEqReg(x, y) => return Ok(self.skip_if(self.reg(x) == self.reg(y))),
            SkipNeReg(x, y) => return Ok(self.skip_if(self.reg(x) != self.reg(y))),
            LoadImm(x, nn) => self.set_reg(x, nn),
            AddImm(x, nn) => self.set_reg(x, self.reg(x).wrapping_add(nn)),
            Move(x, y) => self.set_reg(x, self.reg(y)),
            Or(x, y) => self.set_reg(x, self.reg(x) | self.reg(y)),
            And(x, y) => self.set_reg(x, self.reg(x) & self.reg(y)),
            Xor(x, y) => self.set_reg(x, self.reg(x) ^ self.reg(y)),
            AddReg(x, y) => {
                let (val, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_flag_then_reg(carry, x, val);
            },
            SubReg(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_flag_then_reg(vx >= vy, x, vx.wrapping_sub(vy));
            },
            ShiftRight(x, _) => {
                let vx = self.reg(x);
                self.set_flag_then_reg(vx & 0x01 != 0, x, vx >> 1);
            },
            SubNeg(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_flag_then_reg(vy >= vx, x, vy.wrapping_sub(vx));
            },
            ShiftLeft(x, _) => {
                let vx = self.reg(x);
                self.set_flag_then_reg(vx & 0x80 != 0, x, vx << 1);
            },
            LoadIndex(addr) => self.state.i = addr,
            JumpOffset(addr) => return Ok(addr.wrapping_add(self.reg(0) as u16)),
            Random(x, nn) => {
                let val = self.rng.gen::<u8>() & nn;
                self.set_reg(x, val);
            },
            Draw(x, y, n) => {
                let range = mem_range(self.state.i, n as usize)?;
                let (vx, vy) = (self.reg(x) as usize, self.reg(y) as usize);
                let collision = self.state.display.draw_sprite(vx, vy, &self.state.memory[range]);
                self.state.v[VF] = collision as u8;
                self.state.redraw = true;
            },
            SkipKey(x) => {
                let pressed = self.state.keys.is_pressed(self.reg(x))?;
                return Ok(self.skip_if(pressed));
            },
            SkipNotKey(x) => {
                let pressed = self.state.keys.is_pressed(self.reg(x))?;
                return Ok(self.skip_if(!pressed));
            },
            GetDelay(x) => self.set_reg(x, self.state.timers.delay),
            WaitKey(x) => match self.state.keys.first_pressed() {
                Some(key) => self.set_reg(x, key),
                None => return Ok(pc),
            },
            SetDelay(x) => self.state.timers.delay = self.reg(x),
            SetSound(x) => self.state.timers.sound = self.reg(x),
            AddIndex(x) => self.state.i = self.state.i.wrapping_add(self.reg(x) as u16),
            Glyph(x) => self.state.i = glyph_addr(self.reg(x)),
            Bcd(x) => {
                let range = mem_range(self.state.i, 3)?;
                let digits = bcd(self.reg(x));
                self.state.memory[range].copy_from_slice(&digits);
            },
            Store(x) => {
                let count = x as usize + 1;
                let range = mem_range(self.state.i, count)?;
                self.state.memory[range].copy_from_slice(&self.state.v[..count]);
            },
            Restore(x) => {
                let count = x as usize + 1;
                let range = mem_range(self.state.i, count)?;
                self.state.v[..count].copy_from_slice(&self.state.memory[range]);
            },
        };
        Ok(next)
    }
    fn skip_if(&self, cond: bool) -> u16 {
        let step = if cond { 4 } else { 2 };
        self.state.pc.wrapping_add(step)
    }
    #[inline(always)]
    fn reg(&self, i: Reg) -> u8 {
        self.state.v[i as usize]
    }
    #[inline(always)]
    fn set_reg(&mut self, i: Reg, val: u8) {
        self.state.v[i as usize] = val;
    }
    /// VF is written first, so for X == F the result overwrites the flag
    fn set_flag_then_reg(&mut self, flag: bool, i: Reg, val: u8) {
        self.state.v[VF] = flag as u8;
        self.set_reg(i, val);
    }
    fn push_stack(&mut self, val: u16) -> Result<(), ChipError> {
        if self.state.sp >= STACK_SIZE { return Err(ChipError::StackOverflow) };
        self.state.stack[self.state.sp] = val;
        self.state.sp += 1;
        Ok(())
    }
    fn pop_stack(&mut self) -> Result<u16, ChipError> {
        if self.state.sp == 0 { return Err(ChipError::StackUnderflow) }
        self.state.sp -= 1;
        Ok(self.state.stack[self.state.sp])
    }
}
impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

/// Checked memory range `addr..addr + len`
fn mem_range(addr: u16, len: usize) -> Result<Range<usize>, ChipError> {
    let start = addr as usize;
    let end = start + len;
    if end > RAM_SIZE {
        return Err(ChipError::MemoryOutOfBounds { address: start.max(RAM_SIZE) });
    }
    Ok(start..end)
}
