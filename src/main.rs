//! healthgear firmware entry point (nRF52840 + ILI9341 TFT).
//!
//! Brings up the panel and the telemetry UART, then hands everything to
//! the Embassy tasks in `healthgear::tasks`.

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::{bind_interrupts, peripherals, uarte};
use healthgear::config::{DISPLAY_SPI_MHZ, TELEMETRY_BAUD};
use healthgear::tasks::{self, UartWriter};
use healthgear::telemetry::SerialTelemetry;
use healthgear::ui::display::{self, DisplayPins};
use healthgear::AppContext;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

static CONTEXT: AppContext = AppContext::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("healthgear starting");

    let canvas = unwrap!(display::init(DisplayPins {
        spi: p.SPI3,
        sck: p.P0_19.degrade(),
        mosi: p.P0_20.degrade(),
        cs: p.P0_17.degrade(),
        dc: p.P0_21.degrade(),
        rst: p.P0_22.degrade(),
    }));
    info!("Display: SPIM3 at {} MHz", DISPLAY_SPI_MHZ);

    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD9600;
    let tx = uarte::UarteTx::new(p.UARTE0, Irqs, p.P0_06, uart_config);
    let link = SerialTelemetry::new(UartWriter(tx));
    info!("Telemetry: UARTE0 at {} baud", TELEMETRY_BAUD);

    unwrap!(spawner.spawn(tasks::tick_task(&CONTEXT, p.P0_11.degrade())));
    unwrap!(spawner.spawn(tasks::input_task(&CONTEXT)));
    unwrap!(spawner.spawn(tasks::screen_task(&CONTEXT, canvas)));
    unwrap!(spawner.spawn(tasks::telemetry_task(&CONTEXT, link)));
    unwrap!(spawner.spawn(tasks::power_task(p.P0_12.degrade(), p.P0_23.degrade())));

    info!("healthgear running");
}
