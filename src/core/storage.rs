//! Smartphone storage saturation check.
//!
//! Unlike the other checks, nothing is required here: missing values count as zero.

use std::fmt::{Display, Formatter};

use bon::Builder;
use comfy_table::Color;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    core::form::{Field, FieldErrors, Form, parse_number, parse_optional_number},
    prelude::*,
    quantity::{percent::Percent, storage::Gigabytes, time::Milliseconds},
};

const CRITICAL_AT: Percent = Percent(90.0);

const WARNING_AT: Percent = Percent(80.0);

/// Usage the «space to free» is computed against.
const TARGET_USAGE: f64 = 0.9;

/// Free space the user is advised to keep.
pub const RECOMMENDED_FREE: Percent = Percent(10.0);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum StorageField {
    Total,
    Used,
    ResponseTime,
    Cache,
}

impl Field for StorageField {
    const ALL: &'static [Self] = &[Self::Total, Self::Used, Self::ResponseTime, Self::Cache];

    fn key(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Used => "used",
            Self::ResponseTime => "responseMs",
            Self::Cache => "cacheGb",
        }
    }

    fn required_message(self) -> Option<&'static str> {
        None
    }
}

#[derive(Builder, Clone, Debug, Default)]
#[builder(on(String, into))]
pub struct StorageForm {
    #[builder(default)]
    pub total: String,

    #[builder(default)]
    pub used: String,

    #[builder(default)]
    pub response_time: String,

    #[builder(default)]
    pub cache: String,
}

impl Form for StorageForm {
    type Field = StorageField;
    type Report = StorageReport;

    fn raw(&self, field: Self::Field) -> &str {
        match field {
            StorageField::Total => &self.total,
            StorageField::Used => &self.used,
            StorageField::ResponseTime => &self.response_time,
            StorageField::Cache => &self.cache,
        }
    }

    fn raw_mut(&mut self, field: Self::Field) -> &mut String {
        match field {
            StorageField::Total => &mut self.total,
            StorageField::Used => &mut self.used,
            StorageField::ResponseTime => &mut self.response_time,
            StorageField::Cache => &mut self.cache,
        }
    }

    fn evaluate(&self) -> Result<Self::Report, FieldErrors<Self::Field>> {
        self.validate()?;
        let readings = StorageReadings::builder()
            .total(Gigabytes(parse_number(&self.total)))
            .used(Gigabytes(parse_number(&self.used)))
            .maybe_response_time(parse_optional_number(&self.response_time).map(Milliseconds))
            .maybe_cache(parse_optional_number(&self.cache).map(Gigabytes))
            .build();
        Ok(readings.evaluate())
    }
}

#[derive(Builder, Copy, Clone, Debug, Eq, PartialEq)]
pub struct StorageReadings {
    pub total: Gigabytes,
    pub used: Gigabytes,
    pub response_time: Option<Milliseconds>,
    pub cache: Option<Gigabytes>,
}

impl StorageReadings {
    /// Non-positive total capacity makes the saturation meaningless.
    pub fn is_valid(&self) -> bool {
        self.total > Gigabytes::ZERO
    }

    pub fn used_percent(&self) -> Percent {
        if self.total > Gigabytes::ZERO {
            Percent::from_proportion(self.used / self.total)
        } else {
            Percent::ZERO
        }
    }

    /// Space to free so that at most `usage` of the total is taken.
    fn space_to_free(&self, usage: f64) -> Gigabytes {
        (self.used - self.total * usage).max(Gigabytes::ZERO)
    }

    #[instrument(skip_all)]
    pub fn evaluate(&self) -> StorageReport {
        let used_percent = self.used_percent();
        let saturation = if used_percent >= CRITICAL_AT {
            Saturation::Critical
        } else if used_percent >= WARNING_AT {
            Saturation::Warning
        } else {
            Saturation::Ok
        };

        let mut notes = Vec::new();
        if let Some(cache) = self.cache.filter(|cache| *cache != Gigabytes::ZERO) {
            notes.push(StorageNote::Cache(cache));
        }
        if let Some(response_time) =
            self.response_time.filter(|response_time| *response_time != Milliseconds::ZERO)
        {
            notes.push(StorageNote::ResponseTime(response_time));
        }

        let space_to_free_to_90 = self.space_to_free(TARGET_USAGE);
        let space_to_free_to_recommended =
            self.space_to_free(1.0 - RECOMMENDED_FREE.to_proportion());
        let alert = if self.is_valid() {
            match saturation {
                Saturation::Critical => StorageAlert::NearlyFull {
                    to_90: space_to_free_to_90,
                    to_recommended: space_to_free_to_recommended,
                    recommended_free: RECOMMENDED_FREE,
                },
                Saturation::Warning => {
                    StorageAlert::ApproachingCapacity { to_90: space_to_free_to_90 }
                }
                Saturation::Ok => StorageAlert::SufficientSpace,
            }
        } else {
            StorageAlert::InvalidInput
        };

        debug!(?used_percent, %saturation, %alert, "evaluated");
        StorageReport {
            total: self.total,
            used: self.used,
            used_percent,
            saturation,
            alert,
            space_to_free_to_90,
            space_to_free_to_recommended,
            recommended_free: RECOMMENDED_FREE,
            recommendations: Recommendation::ALL.to_vec(),
            notes,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Saturation {
    #[display("ok")]
    Ok,

    #[display("warning")]
    Warning,

    #[display("critical")]
    Critical,
}

impl Saturation {
    pub const fn color(self) -> Color {
        match self {
            Self::Ok => Color::Green,
            Self::Warning => Color::DarkYellow,
            Self::Critical => Color::Red,
        }
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageReport {
    pub total: Gigabytes,
    pub used: Gigabytes,
    pub used_percent: Percent,

    #[serde(rename = "status")]
    pub saturation: Saturation,

    /// Shown in place of the bare status, including the invalid input.
    pub alert: StorageAlert,

    #[serde(rename = "spaceToFreeTo90Gb")]
    pub space_to_free_to_90: Gigabytes,

    /// Kept apart from [`StorageReport::space_to_free_to_90`] since [`RECOMMENDED_FREE`] may change.
    #[serde(rename = "spaceToFreeToRecommendedGb")]
    pub space_to_free_to_recommended: Gigabytes,

    #[serde(rename = "recommendedFreePercent")]
    pub recommended_free: Percent,

    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub recommendations: Vec<Recommendation>,

    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub notes: Vec<StorageNote>,
}

/// What the user sees in place of the bare saturation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum StorageAlert {
    #[display("Invalid Input")]
    InvalidInput,

    #[display("Critical: Storage Nearly Full")]
    NearlyFull { to_90: Gigabytes, to_recommended: Gigabytes, recommended_free: Percent },

    #[display("Warning: Approaching Critical Capacity")]
    ApproachingCapacity { to_90: Gigabytes },

    #[display("OK: Sufficient Free Space")]
    SufficientSpace,
}

impl StorageAlert {
    pub const fn kind(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalidInput",
            Self::NearlyFull { .. } => "critical",
            Self::ApproachingCapacity { .. } => "warning",
            Self::SufficientSpace => "ok",
        }
    }

    pub fn description(&self) -> Vec<String> {
        match self {
            Self::InvalidInput => vec!["Please enter a valid total storage value.".to_string()],
            Self::NearlyFull { to_90, to_recommended, recommended_free } => vec![
                "Your smartphone storage is nearly full. When storage exceeds ~90%, the operating system may not have enough space for temporary files and caches, causing slowdowns even when hardware is fine.".to_string(),
                format!("Space to free to reach 90%: {to_90:.2}"),
                format!("Recommended target (≥{recommended_free} free): free {to_recommended:.2}"),
            ],
            Self::ApproachingCapacity { to_90 } => vec![
                "You're using a large portion of your storage. Performance may degrade as space becomes scarce.".to_string(),
                format!("Space to free to reach 90%: {to_90:.2}"),
            ],
            Self::SufficientSpace => vec![
                "Storage state looks healthy — low available space is unlikely to be causing slowdowns.".to_string(),
            ],
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::InvalidInput | Self::NearlyFull { .. } => Color::Red,
            Self::ApproachingCapacity { .. } => Color::DarkYellow,
            Self::SufficientSpace => Color::Green,
        }
    }
}

impl Serialize for StorageAlert {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut alert = serializer.serialize_struct("StorageAlert", 3)?;
        alert.serialize_field("kind", self.kind())?;
        alert.serialize_field("title", &self.to_string())?;
        alert.serialize_field("description", &self.description())?;
        alert.end()
    }
}

/// Advice given regardless of the saturation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum Recommendation {
    #[display("Clear app caches (browsers, social apps) to quickly free space.")]
    ClearCaches,

    #[display("Uninstall unused applications and delete old downloads.")]
    UninstallUnused,

    #[display("Move photos, videos, and attachments to cloud storage or external backup.")]
    OffloadMedia,

    #[display("Keep at least 10–20% free storage for stable performance.")]
    KeepFreeSpace,
}

impl Recommendation {
    pub const ALL: [Self; 4] =
        [Self::ClearCaches, Self::UninstallUnused, Self::OffloadMedia, Self::KeepFreeSpace];
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StorageNote {
    Cache(Gigabytes),
    ResponseTime(Milliseconds),
}

impl Display for StorageNote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache(cache) => write!(
                f,
                "Estimated cache: {cache} — clearing caches could reclaim part of the required space."
            ),
            Self::ResponseTime(response_time) => write!(
                f,
                "Reported response time: {response_time} — high values are consistent with IO bottlenecks."
            ),
        }
    }
}
