use std::fmt;

/// Number of fractional units in one whole unit.
const SCALE: i64 = 100;

/// Decimal value with two fractional digits stored as an integer count of
/// hundredths.
///
/// Prices and ratings are persisted in this form and only converted to a
/// floating-point number when a response is rendered (see [`FixedPoint::to_f64`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedPoint(i64);

impl FixedPoint {
    /// Wrap a raw count of hundredths, as stored in the database.
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Raw count of hundredths.
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Convert a floating-point amount, rounding half away from zero to two
    /// fractional digits.
    ///
    /// Returns `None` for NaN, infinities, or values outside the `i64` range.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * SCALE as f64).round();
        if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Self(scaled as i64))
    }

    /// The conversion used at the serialization boundary: every decimal
    /// field of every rendered product goes through here.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;
        write!(f, "{sign}{}.{:02}", abs / scale, abs % scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_fractional_digits() {
        assert_eq!(FixedPoint::from_f64(9.99).map(FixedPoint::hundredths), Some(999));
        assert_eq!(FixedPoint::from_f64(7.49).map(FixedPoint::hundredths), Some(749));
        assert_eq!(FixedPoint::from_f64(0.005).map(FixedPoint::hundredths), Some(1));
        assert_eq!(FixedPoint::from_f64(-1.5).map(FixedPoint::hundredths), Some(-150));
    }

    #[test]
    fn converts_back_to_the_input_value() {
        for input in [0.0, 0.01, 9.99, 7.49, 1299.5, 4.8] {
            let value = FixedPoint::from_f64(input).expect("finite input");
            assert_eq!(value.to_f64(), input);
        }
    }

    #[test]
    fn rejects_non_finite_and_out_of_range_values() {
        assert_eq!(FixedPoint::from_f64(f64::NAN), None);
        assert_eq!(FixedPoint::from_f64(f64::INFINITY), None);
        assert_eq!(FixedPoint::from_f64(1e300), None);
    }

    #[test]
    fn displays_with_two_digits() {
        assert_eq!(FixedPoint::from_hundredths(999).to_string(), "9.99");
        assert_eq!(FixedPoint::from_hundredths(5).to_string(), "0.05");
        assert_eq!(FixedPoint::from_hundredths(-150).to_string(), "-1.50");
    }
}
