//! Small numeric helpers shared by the grammar compiler, template renderer
//! and validator, so the three components agree on exactly what "the
//! textual form of a float" and "close enough" mean.

/// Absolute tolerance used when comparing a candidate value against a
/// `ConstantFloat`.
pub const FLOAT_EPSILON: f64 = 1e-4;

/// Renders `v` as a fixed-point decimal with at least one fractional
/// digit and no exponent, matching the shape the grammar compiler emits
/// for `ConstantFloat` and the integer-part-plus-fraction shape for
/// `Float`.
pub fn format_fixed_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        let s = format!("{v}");
        if s.contains('e') || s.contains('E') {
            format!("{v:.10}")
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else if s.contains('.') {
            s
        } else {
            format!("{s}.0")
        }
    }
}

/// Whether `value` is within [`FLOAT_EPSILON`] of `target`.
pub fn float_close(value: f64, target: f64) -> bool {
    (value - target).abs() <= FLOAT_EPSILON
}
