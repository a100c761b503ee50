/// Render a share or lift as a percentage with two decimals.
///
/// `0.1234` renders as `12.34%`. Undefined values (`NaN`, infinities from a
/// zero control share) render as `n/a`.
pub fn format_percentage(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value * 100.0)
    } else {
        "n/a".to_string()
    }
}
