/// Round to the nearest integer, halves toward positive infinity (2.5 → 3, -2.5 → -2).
pub fn round_total(val: f64) -> i64 {
    if !val.is_finite() {
        return 0;
    }
    let floor = val.floor();
    let rounded = if val - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Display form of a total: rounded, no decimals.
pub fn total(val: f64) -> String {
    round_total(val).to_string()
}
