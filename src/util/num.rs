/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converts a number to an array index if it is a non-negative integer.
///
/// Returns `None` for negative, fractional, non-finite values and values
/// beyond [`MAX_SAFE_INTEGER`]; callers decide whether that is an error
/// (index assignment) or yields `undefined` (index reads).
///
/// ## Example
/// ```
/// use desiscript::util::num::f64_to_index;
///
/// assert_eq!(f64_to_index(2.0), Some(2));
/// assert_eq!(f64_to_index(-1.0), None);
/// assert_eq!(f64_to_index(1.5), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_index(value: f64) -> Option<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_SAFE_INTEGER {
        usize::try_from(value as u64).ok()
    } else {
        None
    }
}

/// Converts a length or count into the language's number type.
///
/// Lengths never approach `2^53`, so the conversion is exact in practice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Renders a number the way the language prints it.
///
/// Integral values print without a fractional part, other finite values use
/// the shortest representation that round-trips. Negative zero prints as `0`
/// and non-finite values as `Infinity`, `-Infinity` or `NaN`.
///
/// ## Example
/// ```
/// use desiscript::util::num::format_number;
///
/// assert_eq!(format_number(10.0), "10");
/// assert_eq!(format_number(3.14159), "3.14159");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(f64::INFINITY), "Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
