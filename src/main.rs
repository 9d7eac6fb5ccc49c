//! prox-menu firmware - rotary-encoder menu for a VCNL4040 proximity/lux
//! sensor, rendered over a USB serial console.
//!
//! Board: Adafruit Feather nRF52840 Express with a seesaw I²C rotary
//! encoder and a VCNL4040 breakout on the STEMMA QT connector.
//!
//! Tasks:
//!   - main          - 30 Hz event loop (encoder, menu, sensor, LED)
//!   - usb_device    - embassy-usb device runner
//!   - usb_console   - drains console output into the CDC endpoint

#![no_std]
#![no_main]

mod usb;

use core::cell::RefCell;

use defmt::{debug, info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::config::HfclkSource;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Delay, Timer};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::UsbDevice;
use embedded_hal_bus::i2c::RefCellDevice;
use panic_probe as _;
use static_cell::StaticCell;

use prox_menu::config;
use prox_menu::indicator::LedIndicator;
use prox_menu::sensors::seesaw::SeesawEncoder;
use prox_menu::sensors::vcnl4040::Vcnl4040;
use prox_menu::App;

use crate::usb::serial::{PipeConsole, UsbDriver};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static I2C_BUS: StaticCell<RefCell<Twim<'static, peripherals::TWISPI0>>> = StaticCell::new();

#[embassy_executor::task]
async fn usb_device(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::serial::run_usb_device(device).await
}

#[embassy_executor::task]
async fn usb_console(class: CdcAcmClass<'static, UsbDriver>) -> ! {
    usb::serial::console_writer_task(class).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("prox-menu starting");

    // USB needs the external 32 MHz crystal.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(nrf_config);

    let console = usb::serial::init(p.USBD);
    unwrap!(spawner.spawn(usb_device(console.device)));
    unwrap!(spawner.spawn(usb_console(console.class)));

    // STEMMA QT bus, shared by the encoder and the sensor.
    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_12, p.P0_11, twim_config);
    let bus = I2C_BUS.init(RefCell::new(twim));

    let encoder = match SeesawEncoder::init(RefCellDevice::new(bus), Delay, config::ENCODER_I2C_ADDR)
    {
        Ok(enc) => enc,
        Err(e) => defmt::panic!("Encoder init failed: {}", e),
    };
    info!("Encoder ready at {=u8:#x}", config::ENCODER_I2C_ADDR);

    let sensor = match Vcnl4040::init(
        RefCellDevice::new(bus),
        config::SENSOR_I2C_ADDR,
        config::SENSOR_ALS_INTEGRATION,
    ) {
        Ok(dev) => dev,
        Err(e) => defmt::panic!("VCNL4040 init failed: {}", e),
    };
    info!("VCNL4040 ready at {=u8:#x}", config::SENSOR_I2C_ADDR);

    let led = LedIndicator::new(
        Output::new(p.P1_15, Level::Low, OutputDrive::Standard),
        false,
    );

    let mut app = App::new(encoder, sensor, led, PipeConsole);
    info!(
        "Event loop running every {=u64} ms",
        config::POLL_INTERVAL_MS
    );

    loop {
        Timer::after_millis(config::POLL_INTERVAL_MS).await;

        if usb::serial::take_host_attached() || usb::serial::take_frame_dropped() {
            app.request_redraw();
        }

        let before = app.state().threshold();
        match app.step() {
            Ok(Some(t)) => info!("Screen: {} -> {}", t.from, t.to),
            Ok(None) => {}
            // Bus faults are not retried; panic-probe reports and halts.
            Err(e) => defmt::panic!("Event loop fault: {}", e),
        }

        let after = app.state().threshold();
        if after != before {
            debug!("Threshold: {=u16}", after.get());
        }
    }
}
