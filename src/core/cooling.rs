//! Server cooling check.

use bon::Builder;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    core::{
        form::{Field, FieldErrors, Form, parse_number, round_half_up},
        severity::Severity,
    },
    prelude::*,
    quantity::{rotation::Rpm, temperature::Celsius},
};

const CRITICAL_TEMPERATURE: Celsius = Celsius(85.0);

/// Critical when combined with a fan slower than [`STALLING_FAN_SPEED`].
const HIGH_TEMPERATURE: Celsius = Celsius(80.0);

const WARNING_TEMPERATURE: Celsius = Celsius(75.0);

const STALLING_FAN_SPEED: Rpm = Rpm(1200);

const MIN_FAN_SPEED: Rpm = Rpm(1500);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum CoolingField {
    CpuTemperature,
    FanSpeed,
}

impl Field for CoolingField {
    const ALL: &'static [Self] = &[Self::CpuTemperature, Self::FanSpeed];

    fn key(self) -> &'static str {
        match self {
            Self::CpuTemperature => "cpuTemp",
            Self::FanSpeed => "fanSpeed",
        }
    }

    fn required_message(self) -> Option<&'static str> {
        Some(match self {
            Self::CpuTemperature => "Current CPU temperature is required.",
            Self::FanSpeed => "Current fan speed is required.",
        })
    }
}

#[derive(Builder, Clone, Debug, Default)]
#[builder(on(String, into))]
pub struct CoolingForm {
    #[builder(default)]
    pub cpu_temperature: String,

    #[builder(default)]
    pub fan_speed: String,
}

impl Form for CoolingForm {
    type Field = CoolingField;
    type Report = CoolingReport;

    fn raw(&self, field: Self::Field) -> &str {
        match field {
            CoolingField::CpuTemperature => &self.cpu_temperature,
            CoolingField::FanSpeed => &self.fan_speed,
        }
    }

    fn raw_mut(&mut self, field: Self::Field) -> &mut String {
        match field {
            CoolingField::CpuTemperature => &mut self.cpu_temperature,
            CoolingField::FanSpeed => &mut self.fan_speed,
        }
    }

    fn evaluate(&self) -> Result<Self::Report, FieldErrors<Self::Field>> {
        self.validate()?;
        let readings = CoolingReadings {
            cpu_temperature: Celsius(parse_number(&self.cpu_temperature)),
            fan_speed: Rpm(round_half_up(parse_number(&self.fan_speed))),
        };
        Ok(readings.evaluate())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CoolingReadings {
    pub cpu_temperature: Celsius,
    pub fan_speed: Rpm,
}

impl CoolingReadings {
    #[instrument(skip_all)]
    pub fn evaluate(&self) -> CoolingReport {
        let Self { cpu_temperature, fan_speed } = *self;
        let mut severity = Severity::Good;
        let mut advice = Vec::new();

        if cpu_temperature >= CRITICAL_TEMPERATURE
            || (cpu_temperature >= HIGH_TEMPERATURE && fan_speed < STALLING_FAN_SPEED)
        {
            severity = Severity::Critical;
            advice.push(CoolingAdvice::Overheating);
        } else if cpu_temperature >= WARNING_TEMPERATURE {
            severity = Severity::Warning;
            advice.push(CoolingAdvice::AboveOptimal);
        }

        if fan_speed < MIN_FAN_SPEED {
            severity = severity.escalate(Severity::Warning);
            advice.push(CoolingAdvice::SlowFan);
        }

        if cpu_temperature < WARNING_TEMPERATURE && fan_speed >= MIN_FAN_SPEED {
            advice.push(CoolingAdvice::Optimal);
        }

        // Independent of the severity, may accompany the overheating advice:
        if cpu_temperature >= HIGH_TEMPERATURE {
            advice.push(CoolingAdvice::SustainedHeat);
        }

        debug!(?cpu_temperature, ?fan_speed, %severity, n_advice = advice.len(), "evaluated");
        CoolingReport { severity, advice }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum CoolingAdvice {
    #[display(
        "High temperature detected — immediate maintenance recommended: clean fans/filters and replace thermal paste."
    )]
    Overheating,

    #[display(
        "CPU temperature is above optimal (>=75°C). Consider cleaning the case and checking thermal paste."
    )]
    AboveOptimal,

    #[display(
        "Fan speed is lower than expected (<1500 RPM). Fan cleaning or bearing check recommended."
    )]
    SlowFan,

    #[display("Readings are within optimal ranges. Schedule routine cleaning every 6-12 months.")]
    Optimal,

    #[display(
        "Risk: sustained temperatures >=80°C increase throttling and hardware wear. Perform maintenance soon."
    )]
    SustainedHeat,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CoolingReport {
    #[serde(rename = "status")]
    pub severity: Severity,

    #[serde(rename = "messages")]
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub advice: Vec<CoolingAdvice>,
}
