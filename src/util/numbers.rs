//! Number and duration formatting.

/// Rounds `num` to `places` decimal places, halves rounding up.
pub fn round(num: f64, places: i32) -> f64 {
    if num == 0.0 || !num.is_finite() {
        return if num.is_nan() { 0.0 } else { num };
    }
    let multiplier = 10f64.powi(places);
    (num * multiplier + 0.5).floor() / multiplier
}

/// Pads single-digit values with a leading zero.
pub fn zpad(val: u64) -> String {
    format!("{val:02}")
}

/// Formats a duration in seconds as `HH:MM:SS`, dropping fractional seconds.
///
/// Hours are not wrapped, so 100 hours renders as `100:00:00`.
pub fn timefmt(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{}:{}", zpad(hours), zpad(minutes), zpad(secs))
}
