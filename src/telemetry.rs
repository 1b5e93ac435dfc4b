//! Vital-sign reporting over the serial link.
//!
//! One record per period, fixed layout: `#HHH+OOO+TTT+SSSS+~` where each
//! field is right-aligned to its width (wider values simply widen the
//! record).

use core::fmt::Write;

use heapless::String;

use crate::config::TELEMETRY_RECORD_LEN;
use crate::error::Error;
use crate::sensors::{SensorField, SensorSnapshot};

/// The four readings in report order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vitals {
    pub heart_rate: i32,
    pub blood_oxygen: i32,
    pub body_temperature: i32,
    pub step_count: i32,
}

impl From<&SensorSnapshot> for Vitals {
    fn from(s: &SensorSnapshot) -> Self {
        Self {
            heart_rate: s.value(SensorField::HeartRate),
            blood_oxygen: s.value(SensorField::BloodOxygen),
            body_temperature: s.value(SensorField::BodyTemperature),
            step_count: s.value(SensorField::StepCount),
        }
    }
}

pub type Record = String<TELEMETRY_RECORD_LEN>;

pub fn format_record(v: &Vitals) -> Result<Record, Error> {
    let mut out = Record::new();
    write!(
        out,
        "#{:3}+{:3}+{:3}+{:4}+~",
        v.heart_rate, v.blood_oxygen, v.body_temperature, v.step_count
    )?;
    Ok(out)
}

/// Destination of telemetry records.
pub trait TelemetrySink {
    fn report(&mut self, vitals: &Vitals) -> Result<(), Error>;
}

/// Writes formatted records to a character stream (UART wrapper).
pub struct SerialTelemetry<W> {
    writer: W,
}

impl<W: Write> SerialTelemetry<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> TelemetrySink for SerialTelemetry<W> {
    fn report(&mut self, vitals: &Vitals) -> Result<(), Error> {
        let record = format_record(vitals)?;
        self.writer
            .write_str(&record)
            .map_err(|_| Error::Transport)
    }
}
