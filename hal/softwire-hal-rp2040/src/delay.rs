//! Cycle-counted inter-transition delay
//!
//! One delay loop is calibrated to roughly 1.1 µs, which puts the standard
//! preset near 100 kHz and the fast preset near 300 kHz once pin overhead
//! is included.

use softwire_hal::DelayLoop;

/// Default RP2040 system clock
pub const RP2040_SYS_CLOCK_HZ: u32 = 125_000_000;

/// Delay loops per second targeted by [`CycleDelay::for_clock`]
const LOOPS_PER_SECOND: u32 = 900_000;

/// Busy-wait delay counted in core clock cycles
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleDelay {
    cycles_per_loop: u32,
}

impl CycleDelay {
    /// Use an explicit cycle count per delay loop
    pub const fn new(cycles_per_loop: u32) -> Self {
        Self { cycles_per_loop }
    }

    /// Calibrate for a system clock frequency
    pub const fn for_clock(sys_clock_hz: u32) -> Self {
        let cycles = sys_clock_hz / LOOPS_PER_SECOND;
        Self::new(if cycles == 0 { 1 } else { cycles })
    }

    /// Cycles spent per delay loop
    pub const fn cycles_per_loop(&self) -> u32 {
        self.cycles_per_loop
    }
}

impl Default for CycleDelay {
    fn default() -> Self {
        Self::for_clock(RP2040_SYS_CLOCK_HZ)
    }
}

impl DelayLoop for CycleDelay {
    #[inline]
    fn delay_loops(&mut self, loops: u16) {
        if loops > 0 {
            cortex_m::asm::delay(self.cycles_per_loop.saturating_mul(loops as u32));
        }
    }
}
