quantity!(Percent, f64, "%");

impl Percent {
    /// Build a percentage out of a proportion, so that `0.5` becomes `50%`.
    pub fn from_proportion(proportion: f64) -> Self {
        Self(proportion * 100.0)
    }

    pub fn to_proportion(self) -> f64 {
        0.01 * self.0
    }

    /// Round the exact value to a single decimal, ties away from zero.
    ///
    /// Scaling by ten first would round twice: `64.0499…` would become `640.5` and then `64.1`.
    pub fn round_to_tenth(self) -> Self {
        // Quarters are the only representable ties, and multiplying them by ten is exact:
        if (self.0 * 4.0).fract() == 0.0 {
            return Self((self.0 * 10.0).round() / 10.0);
        }
        // Formatting rounds the exact binary value:
        Self(format!("{:.1}", self.0).parse().unwrap_or(self.0))
    }
}
