use std::fmt;

use serde::{Deserialize, Serialize};

/// A complex number with `f64` components.
///
/// `NaN` in either component stands for an undefined value (a divergent
/// iteration, a division by zero...). Arithmetic never guards against it,
/// the IEEE rules carry it through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn zero() -> Self {
        Self { re: 0.0, im: 0.0 }
    }

    pub fn nan() -> Self {
        Self {
            re: f64::NAN,
            im: f64::NAN,
        }
    }

    pub fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn arg_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `|Δre| + |Δim|`, the distance used for convergence and root matching.
    pub fn l1_distance(self, other: Self) -> f64 {
        (self.re - other.re).abs() + (self.im - other.im).abs()
    }

    /// Integer power by repeated multiplication.
    ///
    /// Only the rounded real part of `exponent` counts. An exponent that
    /// rounds to 1 or less leaves `self` unchanged, so `z.pow(0)` is `z`.
    pub fn pow(self, exponent: Self) -> Self {
        let mut times = round_half_up(exponent.re) - 1.0;
        let mut result = self;
        while times > 0.0 {
            result = result * self;
            times -= 1.0;
        }
        result
    }

    /// Rounds both components to `decimals` places, ties towards +∞.
    pub fn round_to(self, decimals: i32) -> Self {
        let scale = 10f64.powi(decimals);
        Self {
            re: round_half_up(self.re * scale) / scale,
            im: round_half_up(self.im * scale) / scale,
        }
    }

    /// Renders the number rounded to three decimals, e.g. `1 + 2 i` or `- 0.5 i`.
    ///
    /// Returns `None` when there is no textual form, i.e. either component is `NaN`.
    pub fn format(&self) -> Option<String> {
        if self.is_nan() {
            return None;
        }

        let rounded = self.round_to(3);
        if rounded.re == 0.0 && rounded.im == 0.0 {
            return Some("0".to_string());
        }

        let mut parts = Vec::with_capacity(2);
        if rounded.re != 0.0 {
            parts.push(format!("{}", rounded.re));
        }
        if rounded.im != 0.0 {
            let sign = if rounded.im < 0.0 { '-' } else { '+' };
            parts.push(format!("{} {} i", sign, rounded.im.abs()));
        }
        Some(parts.join(" "))
    }
}

/// `floor(value + 0.5)`: halves always round up, also for negative values.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Some(text) => f.write_str(&text),
            None => f.write_str("NaN"),
        }
    }
}

impl From<(f64, f64)> for Complex {
    fn from((re, im): (f64, f64)) -> Self {
        Self { re, im }
    }
}

impl std::ops::Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl std::ops::Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl std::ops::Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Complex {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl std::ops::Div for Complex {
    type Output = Self;

    // no zero guard: a zero divisor yields NaN components
    fn div(self, rhs: Self) -> Self {
        let base = rhs.re * rhs.re + rhs.im * rhs.im;
        Complex {
            re: (rhs.re * self.re + rhs.im * self.im) / base,
            im: (rhs.re * self.im - rhs.im * self.re) / base,
        }
    }
}
