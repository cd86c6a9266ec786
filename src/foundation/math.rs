/// `value mod len` as a list index.
///
/// Uses Euclidean remainder so negative seeds still land inside the list, and floors so a
/// fractional seed picks a real element. Non-finite values and empty lists map to `0`.
pub(crate) fn wrap_index(value: f64, len: usize) -> usize {
    if len == 0 || !value.is_finite() {
        return 0;
    }
    let r = value.rem_euclid(len as f64).floor();
    (r as usize).min(len - 1)
}

/// Magnitude of the x basis vector of `t`, i.e. how many device units one local unit covers
/// horizontally. Rotation does not change it.
pub(crate) fn x_axis_scale(t: kurbo::Affine) -> f64 {
    let [a, b, _c, _d, _e, _f] = t.as_coeffs();
    (a * a + b * b).sqrt()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
