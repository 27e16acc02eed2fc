//! Simplified gamma transfer curve.
//!
//! Uses a pure power law with exponent 2.2 rather than the piecewise sRGB
//! curve. Alpha goes through the same curve as color.

/// Exponent of the power-law approximation of sRGB.
pub const GAMMA: f64 = 2.2;

/// Map an encoded byte to linear light in `[0, 1]`.
#[inline]
#[must_use]
pub fn to_linear(value: u8) -> f64 {
    (f64::from(value) / 255.0).powf(GAMMA)
}

/// Map linear light back to an encoded byte, truncating toward zero.
///
/// NaN and negative inputs map to 0; inputs above 1 saturate at 255.
#[inline]
#[must_use]
pub fn to_encoded(linear: f64) -> u8 {
    // `as` saturates and sends NaN to 0
    (linear.powf(1.0 / GAMMA) * 255.0).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(to_linear(0), 0.0);
        assert_eq!(to_linear(255), 1.0);
        assert_eq!(to_encoded(0.0), 0);
        assert_eq!(to_encoded(1.0), 255);
    }

    #[test]
    fn round_trip_within_one() {
        for v in 0..=255u8 {
            let back = to_encoded(to_linear(v));
            assert!(
                v.abs_diff(back) <= 1,
                "{v} came back as {back}"
            );
        }
    }

    #[test]
    fn midtone_is_darker_in_linear_space() {
        assert!(to_linear(128) < 0.25);
    }

    #[test]
    fn nan_stores_as_zero() {
        assert_eq!(to_encoded(f64::NAN), 0);
    }
}
