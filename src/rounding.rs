/// Rounds to `places` decimal digits.
///
/// Goes through the float formatter, which rounds the exact stored binary
/// value and breaks exact ties to even. `1.15` is stored just below 1.15 and
/// so rounds to `1.1`, while `0.125` is an exact tie and rounds to `0.12`.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
