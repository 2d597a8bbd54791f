//! Softwire - I2C Bus Scanner Firmware
//!
//! Bit-bangs an I2C master on two ordinary RP2040 GPIOs and probes every
//! 7-bit address on a fixed interval, logging the devices that answer.
//!
//! Wiring: SDA on GPIO4, SCL on GPIO5, both with external pull-ups.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use softwire_core::bus::{SCAN_FIRST, SCAN_LAST};
use softwire_core::{BusEngine, SoftWire, TransferStatus, WireConfig};
use softwire_hal_rp2040::{CycleDelay, FlexLine};

/// Time between scans
const SCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Bus frequency requested from the engine
const BUS_FREQUENCY_HZ: u32 = 400_000;

/// Give up on a device holding SCL low after this many polls
const STRETCH_LIMIT: u32 = 100_000;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Softwire scanner starting...");

    let p = embassy_rp::init(Default::default());

    let sda = FlexLine::new(p.PIN_4);
    let scl = FlexLine::new(p.PIN_5);
    let config = WireConfig::default().with_stretch_limit(STRETCH_LIMIT);
    let engine = BusEngine::with_delay(sda, scl, CycleDelay::default(), config);

    let mut wire: SoftWire<_, _, _> = SoftWire::new(engine);
    if let Err(e) = wire.begin() {
        error!("Bus did not come up: {}", e);
        return;
    }
    wire.set_speed(BUS_FREQUENCY_HZ);
    info!(
        "Bus ready on GPIO4/GPIO5, {} delay loops per transition",
        wire.engine().delay_loops()
    );

    let mut ticker = Ticker::every(SCAN_INTERVAL);
    loop {
        let mut found = 0u8;

        for address in SCAN_FIRST..=SCAN_LAST {
            wire.begin_transaction(address);
            match wire.end_transaction() {
                TransferStatus::Success => {
                    info!("Device found at {=u8:#x}", address);
                    found += 1;
                }
                TransferStatus::AddressNack => {}
                status => {
                    warn!("Probe of {=u8:#x} failed: {}", address, status);
                }
            }
        }

        if found == 0 {
            info!("No devices found");
        } else {
            info!("Scan complete, {} device(s)", found);
        }

        ticker.next().await;
    }
}
