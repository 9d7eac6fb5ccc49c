//! USB CDC-ACM console.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one serial port.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, trace, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config, UsbDevice};
use prox_menu::config;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// Concrete USB driver type for this board.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static CDC_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Console bytes produced by the event loop, waiting for the USB writer.
static CONSOLE_PIPE: Pipe<CriticalSectionRawMutex, { config::CONSOLE_PIPE_SIZE }> = Pipe::new();

/// Raised when a terminal opens the port (DTR asserted).
static HOST_ATTACHED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Set when a console frame had to be dropped.
static FRAME_DROPPED: AtomicBool = AtomicBool::new(false);

/// How often the writer checks for DTR while no terminal is open (ms).
const DTR_POLL_MS: u64 = 50;

/// Build result containing the USB device runner and the serial class.
pub struct UsbConsole {
    pub device: UsbDevice<'static, UsbDriver>,
    pub class: CdcAcmClass<'static, UsbDriver>,
}

/// Initialise the USB stack and create the serial device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbConsole {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Composite device with IADs for the CDC function.
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 64]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let state = CDC_STATE.init(State::new());
    let class = CdcAcmClass::new(&mut builder, state, config::USB_CDC_PACKET_SIZE);

    let device = builder.build();

    info!("USB CDC-ACM serial console initialised");

    UsbConsole { device, class }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Console forwarding task - drains the console pipe into the CDC
/// bulk-in endpoint while a terminal is attached.
pub async fn console_writer_task(mut class: CdcAcmClass<'static, UsbDriver>) -> ! {
    let mut buf = [0u8; config::USB_CDC_PACKET_SIZE as usize];

    loop {
        class.wait_connection().await;
        while !class.dtr() {
            Timer::after_millis(DTR_POLL_MS).await;
        }
        info!("USB serial: terminal attached");

        // Drop whatever piled up while nobody was listening.
        CONSOLE_PIPE.clear();
        HOST_ATTACHED.signal(());

        loop {
            let n = CONSOLE_PIPE.read(&mut buf).await;
            if class.write_packet(&buf[..n]).await.is_err() {
                warn!("USB serial: write failed, waiting for host");
                break;
            }
            // A full-size packet only ends the transfer after a ZLP.
            if n == buf.len() && CONSOLE_PIPE.is_empty() && class.write_packet(&[]).await.is_err() {
                break;
            }
            if !class.dtr() {
                info!("USB serial: terminal closed");
                break;
            }
        }
    }
}

/// `true` once after a terminal opened the port since the last call.
pub fn take_host_attached() -> bool {
    HOST_ATTACHED.try_take().is_some()
}

/// `true` once after a console frame was dropped since the last call.
pub fn take_frame_dropped() -> bool {
    FRAME_DROPPED.swap(false, Ordering::Relaxed)
}

/// `fmt::Write` sink used by the event loop, one frame per write.
///
/// Never blocks: a frame that does not fit in the pipe is dropped whole
/// and flagged for [`take_frame_dropped`].
pub struct PipeConsole;

impl fmt::Write for PipeConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if CONSOLE_PIPE.free_capacity() < bytes.len() {
            trace!("console pipe full, dropped {} bytes", bytes.len());
            FRAME_DROPPED.store(true, Ordering::Relaxed);
            return Ok(());
        }
        if CONSOLE_PIPE.try_write(bytes).is_err() {
            trace!("console pipe busy, dropped {} bytes", bytes.len());
            FRAME_DROPPED.store(true, Ordering::Relaxed);
        }
        Ok(())
    }
}
