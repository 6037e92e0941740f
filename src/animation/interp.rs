/// Map `input` from `[in_start, in_end]` onto `[out_start, out_end]`, clamping on both sides.
///
/// A degenerate input range (`in_end <= in_start`) behaves as a step at `in_start`: anything
/// before it yields `out_start`, anything at or after it yields `out_end`.
pub fn interpolate_clamped(input: f64, input_range: [f64; 2], output_range: [f64; 2]) -> f64 {
    let [in_start, in_end] = input_range;
    let [out_start, out_end] = output_range;
    if input.is_nan() {
        return out_start;
    }
    if in_end <= in_start {
        return if input < in_start { out_start } else { out_end };
    }
    let t = ((input - in_start) / (in_end - in_start)).clamp(0.0, 1.0);
    out_start + (out_end - out_start) * t
}

/// Normalized progress of `input` across `[start, end]`, clamped to `[0, 1]`.
pub fn progress(input: f64, start: f64, end: f64) -> f64 {
    interpolate_clamped(input, [start, end], [0.0, 1.0])
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
