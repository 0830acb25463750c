use comfy_table::Color;
use serde::Serialize;

/// How bad the readings are. Ordered, so that escalation is simply [`Ord::max`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, derive_more::Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[display("GOOD")]
    Good,

    #[display("WARNING")]
    Warning,

    #[display("CRITICAL")]
    Critical,
}

impl Severity {
    /// Raise the severity to at least `floor`, never lowering it.
    #[must_use]
    pub fn escalate(self, floor: Self) -> Self {
        self.max(floor)
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Good => Color::Green,
            Self::Warning => Color::DarkYellow,
            Self::Critical => Color::Red,
        }
    }
}
