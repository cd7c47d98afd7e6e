//! Price adjustment.
//!
//! Raw price cells go through three stages: decay above the ceiling
//! (repeated 10% discounts until at or below it), a low-price fixup to
//! psychological price points, and rounding to 2 decimals.
//!
//! The decay is computed in closed form. A literal `while price > ceiling
//! { price *= 0.9 }` loop needs one iteration per discount step, which
//! grows with the logarithm of the input but with a large constant for
//! pathological values; instead the step count is estimated from a
//! logarithm, backed off, and finished with the literal loop so the stop
//! condition is evaluated on the actual running value.

use std::num::ParseFloatError;

/// Adjust a raw price cell to its final value.
///
/// An empty cell means the price is unknown and gets `default_price`
/// before adjustment. A non-empty cell that does not parse as a number
/// is an error for the caller to wrap with row context.
pub fn adjust_price(raw: &str, ceiling: f64, default_price: f64) -> Result<f64, ParseFloatError> {
    let price = if raw.is_empty() {
        default_price
    } else {
        raw.trim().parse::<f64>()?
    };

    Ok(finalize(decay(price, ceiling)))
}

/// Apply 10% discounts until the price is at or below the ceiling.
fn decay(price: f64, ceiling: f64) -> f64 {
    if !price.is_finite() || price <= ceiling {
        return price;
    }

    // Smallest n with price * 0.9^n <= ceiling, estimated via logarithms.
    // Backed off two steps: the estimate may overshoot by an ulp, and the
    // final value must come from the same comparison the loop would make.
    let estimate = ((ceiling / price).ln() / 0.9f64.ln()).ceil() as i64;
    let head = (estimate - 2).max(0);

    let mut price = price * 0.9f64.powi(head as i32);
    while price > ceiling {
        price *= 0.9;
    }
    price
}

/// Low-price fixup and rounding.
fn finalize(price: f64) -> f64 {
    let adjusted = if price < 10.0 && price > 5.0 {
        9.99
    } else if price <= 5.0 {
        4.99
    } else {
        price * 0.95
    };
    round2(adjusted)
}

/// Round to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const CEILING: f64 = 200.0;
    const DEFAULT: f64 = 99.0;

    /// Reference implementation with the literal discount loop.
    fn adjust_price_naive(raw: &str) -> f64 {
        let mut price = if raw.is_empty() {
            DEFAULT
        } else {
            raw.trim().parse::<f64>().unwrap()
        };
        while price > CEILING {
            price *= 0.9;
        }
        finalize(price)
    }

    fn adjust(raw: &str) -> f64 {
        adjust_price(raw, CEILING, DEFAULT).unwrap()
    }

    #[test]
    fn test_empty_price_uses_default() {
        // 99 is under the ceiling and above 10, so only the 5% cut applies.
        assert_eq!(adjust(""), 94.05);
    }

    #[test]
    fn test_whitespace_only_is_invalid() {
        assert!(adjust_price("   ", CEILING, DEFAULT).is_err());
    }

    #[test]
    fn test_non_numeric_is_invalid() {
        assert!(adjust_price("abc", CEILING, DEFAULT).is_err());
    }

    #[test]
    fn test_low_price_fixups() {
        assert_eq!(adjust("6"), 9.99);
        assert_eq!(adjust("9.5"), 9.99);
        assert_eq!(adjust("5"), 4.99);
        assert_eq!(adjust("0"), 4.99);
        assert_eq!(adjust("5.01"), 9.99);
    }

    #[test]
    fn test_exactly_ten_gets_discount_only() {
        assert_eq!(adjust("10"), 9.5);
    }

    #[test]
    fn test_at_ceiling_no_decay() {
        assert_eq!(adjust("200"), 190.0);
    }

    #[test]
    fn test_decay_above_ceiling() {
        // 1000 * 0.9^16 = 185.302..., then the 5% cut.
        assert_eq!(adjust("1000"), 176.04);
        assert_eq!(adjust("1000"), adjust_price_naive("1000"));
    }

    #[test]
    fn test_just_above_ceiling_single_step() {
        // 201 * 0.9 = 180.9, then * 0.95.
        assert_eq!(adjust("201"), adjust_price_naive("201"));
        assert_eq!(adjust("201"), 171.86);
    }

    #[test]
    fn test_closed_form_matches_naive_across_range() {
        // Inputs spanning [0, 10^6].
        let mut cases: Vec<f64> = vec![
            0.0, 0.01, 1.0, 4.99, 5.0, 5.5, 6.0, 9.99, 10.0, 42.0, 99.0, 150.0, 199.99, 200.0,
            200.01, 201.0, 222.0, 250.0, 500.0, 999.0, 1000.0, 12345.67, 99999.0, 1_000_000.0,
        ];
        for i in 1..1000 {
            cases.push(i as f64 * 997.03);
        }

        for value in cases {
            let raw = format!("{}", value);
            assert_eq!(
                adjust(&raw),
                adjust_price_naive(&raw),
                "closed form diverged from the naive loop for input {}",
                raw
            );
        }
    }

    #[test]
    fn test_result_has_two_decimals() {
        for raw in ["", "1000", "123.456", "77.7", "314159.2"] {
            let value = adjust(raw);
            assert_eq!(round2(value), value);
        }
    }
}
