//! Battery state-of-health check.

use bon::Builder;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    core::{
        form::{Field, FieldErrors, Form, parse_number, round_half_up},
        severity::Severity,
    },
    prelude::*,
    quantity::{capacity::MilliampHours, count::Cycles, percent::Percent, temperature::Celsius},
};

/// Below this the capacity is considered severely degraded.
const CRITICAL_BELOW: Percent = Percent(70.0);

/// Below this the battery is aging.
const WARNING_BELOW: Percent = Percent(85.0);

/// Typical lifespan of a battery.
const MAX_CYCLES: Cycles = Cycles(500);

const MAX_AVERAGE_TEMPERATURE: Celsius = Celsius(35.0);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum BatteryField {
    DesignCapacity,
    CurrentCapacity,
    Cycles,
    AverageTemperature,
}

impl Field for BatteryField {
    const ALL: &'static [Self] =
        &[Self::DesignCapacity, Self::CurrentCapacity, Self::Cycles, Self::AverageTemperature];

    fn key(self) -> &'static str {
        match self {
            Self::DesignCapacity => "designCapacity",
            Self::CurrentCapacity => "currentCapacity",
            Self::Cycles => "cycles",
            Self::AverageTemperature => "avgTemp",
        }
    }

    fn required_message(self) -> Option<&'static str> {
        Some(match self {
            Self::DesignCapacity => "Initial design capacity is required.",
            Self::CurrentCapacity => "Current capacity is required.",
            Self::Cycles => "Number of cycles is required.",
            Self::AverageTemperature => "Average temperature is required.",
        })
    }
}

/// Battery details as entered by the user.
#[derive(Builder, Clone, Debug, Default)]
#[builder(on(String, into))]
pub struct BatteryForm {
    #[builder(default)]
    pub design_capacity: String,

    #[builder(default)]
    pub current_capacity: String,

    #[builder(default)]
    pub cycles: String,

    #[builder(default)]
    pub average_temperature: String,
}

impl BatteryForm {
    fn readings(&self) -> BatteryReadings {
        BatteryReadings {
            design_capacity: MilliampHours(parse_number(&self.design_capacity)),
            current_capacity: MilliampHours(parse_number(&self.current_capacity)),
            cycles: Cycles(round_half_up(parse_number(&self.cycles))),
            average_temperature: Celsius(parse_number(&self.average_temperature)),
        }
    }
}

impl Form for BatteryForm {
    type Field = BatteryField;
    type Report = BatteryReport;

    fn raw(&self, field: Self::Field) -> &str {
        match field {
            BatteryField::DesignCapacity => &self.design_capacity,
            BatteryField::CurrentCapacity => &self.current_capacity,
            BatteryField::Cycles => &self.cycles,
            BatteryField::AverageTemperature => &self.average_temperature,
        }
    }

    fn raw_mut(&mut self, field: Self::Field) -> &mut String {
        match field {
            BatteryField::DesignCapacity => &mut self.design_capacity,
            BatteryField::CurrentCapacity => &mut self.current_capacity,
            BatteryField::Cycles => &mut self.cycles,
            BatteryField::AverageTemperature => &mut self.average_temperature,
        }
    }

    fn evaluate(&self) -> Result<Self::Report, FieldErrors<Self::Field>> {
        self.validate()?;
        Ok(self.readings().evaluate())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatteryReadings {
    pub design_capacity: MilliampHours,
    pub current_capacity: MilliampHours,
    pub cycles: Cycles,
    pub average_temperature: Celsius,
}

impl BatteryReadings {
    /// Current capacity as a share of the design one, zero for a non-positive design capacity.
    pub fn state_of_health(&self) -> Percent {
        if self.design_capacity > MilliampHours::ZERO {
            Percent::from_proportion(self.current_capacity / self.design_capacity)
        } else {
            Percent::ZERO
        }
    }

    #[instrument(skip_all)]
    pub fn evaluate(&self) -> BatteryReport {
        // Thresholds apply to the exact value, only the reported one gets rounded:
        let state_of_health = self.state_of_health();

        let (severity, health_advice) = if state_of_health < CRITICAL_BELOW {
            (Severity::Critical, BatteryAdvice::Degraded)
        } else if state_of_health < WARNING_BELOW {
            (Severity::Warning, BatteryAdvice::Aging)
        } else {
            (Severity::Good, BatteryAdvice::GoodCondition)
        };

        let mut advice = vec![health_advice];
        if self.cycles > MAX_CYCLES {
            advice.push(BatteryAdvice::CyclesExceeded);
        }
        if self.average_temperature > MAX_AVERAGE_TEMPERATURE {
            advice.push(BatteryAdvice::HighTemperature);
        }

        debug!(?state_of_health, %severity, n_advice = advice.len(), "evaluated");
        BatteryReport { state_of_health: state_of_health.round_to_tenth(), severity, advice }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum BatteryAdvice {
    #[display("Capacity is significantly degraded. Consider replacing the battery.")]
    Degraded,

    #[display("Battery is aging. Consider power-saving mode.")]
    Aging,

    #[display("Battery is in good condition.")]
    GoodCondition,

    #[display("The number of cycles has exceeded the typical lifespan.")]
    CyclesExceeded,

    #[display("Warning: High temperature damages the battery. Clean the ventilation.")]
    HighTemperature,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryReport {
    /// Rounded to one decimal.
    pub state_of_health: Percent,

    #[serde(rename = "status")]
    pub severity: Severity,

    #[serde(rename = "messages")]
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub advice: Vec<BatteryAdvice>,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn evaluate(design: &str, current: &str, cycles: &str, temperature: &str) -> BatteryReport {
        BatteryForm::builder()
            .design_capacity(design)
            .current_capacity(current)
            .cycles(cycles)
            .average_temperature(temperature)
            .build()
            .evaluate()
            .unwrap()
    }

    #[test]
    fn degraded_and_hot() {
        let report = evaluate("5000", "3200", "450", "40");
        assert_abs_diff_eq!(report.state_of_health.0, 64.0);
        assert_eq!(report.severity, Severity::Critical);
        assert_eq!(report.advice, [BatteryAdvice::Degraded, BatteryAdvice::HighTemperature]);
    }

    #[test]
    fn warning_starts_at_70() {
        let report = evaluate("1000", "700", "0", "20");
        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(report.advice, [BatteryAdvice::Aging]);
    }

    #[test]
    fn good_starts_at_85() {
        let report = evaluate("1000", "850", "0", "20");
        assert_eq!(report.severity, Severity::Good);
        assert_eq!(report.advice, [BatteryAdvice::GoodCondition]);
    }

    #[test]
    fn severity_uses_unrounded_value() {
        // 69.96% is reported as 70.0% but is still critical:
        let report = evaluate("10000", "6996", "0", "20");
        assert_abs_diff_eq!(report.state_of_health.0, 70.0);
        assert_eq!(report.severity, Severity::Critical);
    }

    #[test]
    fn advice_order() {
        let report = evaluate("4000", "4000", "501", "35.5");
        assert_eq!(
            report.advice,
            [
                BatteryAdvice::GoodCondition,
                BatteryAdvice::CyclesExceeded,
                BatteryAdvice::HighTemperature,
            ]
        );
    }

    #[test]
    fn cycles_are_rounded_before_comparison() {
        assert_eq!(evaluate("1000", "900", "500.4", "20").advice, [BatteryAdvice::GoodCondition]);
        assert_eq!(
            evaluate("1000", "900", "500.5", "20").advice,
            [BatteryAdvice::GoodCondition, BatteryAdvice::CyclesExceeded],
        );
    }

    #[test]
    fn boundaries_are_exclusive() {
        assert_eq!(evaluate("1000", "900", "500", "35").advice, [BatteryAdvice::GoodCondition]);
    }

    #[test]
    fn zero_design_capacity() {
        let report = evaluate("0", "3200", "10", "20");
        assert_eq!(report.state_of_health, Percent::ZERO);
        assert_eq!(report.severity, Severity::Critical);
    }

    #[test]
    fn negative_design_capacity() {
        let report = evaluate("-100", "3200", "10", "20");
        assert_eq!(report.state_of_health, Percent::ZERO);
        assert_eq!(report.severity, Severity::Critical);
    }

    #[test]
    fn reported_value_rounds_exact_binary_value() {
        assert_eq!(evaluate("4000", "2562", "0", "20").state_of_health, Percent(64.0));
        assert_eq!(evaluate("2000", "9", "0", "20").state_of_health, Percent(0.4));
    }

    #[test]
    fn non_numeric_text_is_zero() {
        let report = evaluate("abc", "3200", "10", "20");
        assert_eq!(report.state_of_health, Percent::ZERO);
    }

    #[test]
    fn missing_cycles() {
        let errors = BatteryForm::builder()
            .design_capacity("5000")
            .current_capacity("3200")
            .average_temperature("40")
            .build()
            .evaluate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(BatteryField::Cycles), Some("Number of cycles is required."));
    }

    #[test]
    fn all_missing() {
        let errors = BatteryForm::builder().cycles("  ").build().evaluate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get(BatteryField::DesignCapacity),
            Some("Initial design capacity is required."),
        );
        assert_eq!(errors.get(BatteryField::CurrentCapacity), Some("Current capacity is required."));
        assert_eq!(
            errors.get(BatteryField::AverageTemperature),
            Some("Average temperature is required."),
        );
    }

    #[test]
    fn idempotent() {
        let form = BatteryForm::builder()
            .design_capacity("5000")
            .current_capacity("4100")
            .cycles("620")
            .average_temperature("30")
            .build();
        assert_eq!(form.evaluate().unwrap(), form.evaluate().unwrap());
    }

    #[test]
    fn literal_messages() {
        let report = evaluate("5000", "3200", "450", "40");
        let messages: Vec<String> = report.advice.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            [
                "Capacity is significantly degraded. Consider replacing the battery.",
                "Warning: High temperature damages the battery. Clean the ventilation.",
            ]
        );
    }

    #[test]
    fn serialize_ok() {
        let report = evaluate("5000", "3200", "450", "30");
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"stateOfHealth":64.0,"status":"CRITICAL","messages":["Capacity is significantly degraded. Consider replacing the battery."]}"#,
        );
    }
}
