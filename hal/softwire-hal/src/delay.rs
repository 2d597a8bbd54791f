//! Inter-transition delay
//!
//! The engine waits a number of loop iterations before every line change.
//! How long one iteration takes depends entirely on the board and its core
//! clock, so the primitive is injected rather than fixed.

/// Delay primitive taking an iteration count
pub trait DelayLoop {
    /// Block for `loops` board-calibrated units
    fn delay_loops(&mut self, loops: u16);
}

/// Default busy-loop delay
///
/// One spin hint per iteration. On a 72 MHz Cortex-M3 the standard preset
/// lands around 90 kHz and the fast preset around 240 kHz; faster cores
/// should supply their own [`DelayLoop`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinDelay;

impl DelayLoop for SpinDelay {
    #[inline]
    fn delay_loops(&mut self, loops: u16) {
        for _ in 0..loops {
            core::hint::spin_loop();
        }
    }
}

/// Any `FnMut(u16)` works as a delay, e.g. a closure over a cycle counter
impl<F: FnMut(u16)> DelayLoop for F {
    #[inline]
    fn delay_loops(&mut self, loops: u16) {
        self(loops)
    }
}
