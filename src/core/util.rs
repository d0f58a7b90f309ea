//! Common numeric utilities

/// Round to one decimal place, ties to even
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// `numerator / denominator` rounded to one decimal; 0 when the denominator is 0
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round_one_decimal(numerator as f64 / denominator as f64)
}
