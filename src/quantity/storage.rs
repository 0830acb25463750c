use std::ops::{Div, Mul};

quantity!(Gigabytes, f64, " GB");

impl Mul<f64> for Gigabytes {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div for Gigabytes {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}
