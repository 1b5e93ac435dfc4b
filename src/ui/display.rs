//! ILI9341 TFT panel bring-up.
//!
//! The panel runs in RGB565 over write-only SPIM3. Once initialised it is
//! wrapped in a [`DrawTargetSink`] so the canvas can stream pixels into it.

use crate::canvas::{Canvas, DrawTargetSink};
use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::Error;
use defmt::info;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive};
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

static SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

type PanelSpi = ExclusiveDevice<Spim<'static, peripherals::SPI3>, Output<'static>, Delay>;

/// Concrete panel driver.
pub type Display =
    mipidsi::Display<SpiInterface<'static, PanelSpi, Output<'static>>, ILI9341Rgb565, Output<'static>>;

/// Canvas drawing straight onto the panel.
pub type PanelCanvas = Canvas<DrawTargetSink<Display>>;

/// Pins and bus for the panel.
pub struct DisplayPins {
    pub spi: peripherals::SPI3,
    pub sck: AnyPin,
    pub mosi: AnyPin,
    pub cs: AnyPin,
    pub dc: AnyPin,
    pub rst: AnyPin,
}

/// Initialise the panel. Must be called exactly once.
pub fn init(pins: DisplayPins) -> Result<PanelCanvas, Error> {
    let mut config = spim::Config::default();
    config.frequency = spim::Frequency::M8;
    let spi = Spim::new_txonly(pins.spi, Irqs, pins.sck, pins.mosi, config);

    let cs = Output::new(pins.cs, Level::High, OutputDrive::Standard);
    let dc = Output::new(pins.dc, Level::Low, OutputDrive::Standard);
    let rst = Output::new(pins.rst, Level::High, OutputDrive::Standard);

    let device = ExclusiveDevice::new(spi, cs, Delay).map_err(|_| Error::Transport)?;
    let buffer = SPI_BUFFER.init([0u8; 512]);
    let di = SpiInterface::new(device, dc, buffer);

    let display = mipidsi::Builder::new(ILI9341Rgb565, di)
        .reset_pin(rst)
        .display_size(DISPLAY_WIDTH as u16, DISPLAY_HEIGHT as u16)
        .init(&mut Delay)
        .map_err(|_| Error::Display)?;

    info!("Display: ILI9341 {}x{} ready", DISPLAY_WIDTH, DISPLAY_HEIGHT);
    Ok(Canvas::with_panel_size(DrawTargetSink::new(display)))
}
