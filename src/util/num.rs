/// Returns `true` if the value is finite and has no fractional part.
///
/// Used by the value model to decide whether a real carries a discrete value,
/// for example when validating vector indices.
///
/// # Examples
/// ```
/// use mathlang::util::num::is_integral;
///
/// assert!(is_integral(4.0));
/// assert!(!is_integral(4.5));
/// assert!(!is_integral(f64::NAN));
/// ```
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Converts a signed index candidate to `usize`, rejecting negative values.
///
/// # Returns
/// - `Some(usize)`: The index if it is non-negative and representable.
/// - `None`: If the value is negative or out of range.
#[must_use]
pub fn to_index(value: i64) -> Option<usize> {
    usize::try_from(value).ok()
}

/// Converts an `i64` to `f64` for numeric promotion.
///
/// Magnitudes beyond `2^53` lose precision; promotion accepts that,
/// matching the usual integer-to-double cast.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn discrete_to_real(value: i64) -> f64 {
    value as f64
}
