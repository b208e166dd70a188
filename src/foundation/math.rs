/// Smoothstep `t^2 (3 - 2t)`, clamped to `[0, 1]`.
pub(crate) fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Sum of the geometric series `1 + r + r^2 + ... + r^(n-1)`.
pub(crate) fn geometric_sum(ratio: f64, n: usize) -> f64 {
    let mut acc = 0.0;
    let mut term = 1.0;
    for _ in 0..n {
        acc += term;
        term *= ratio;
    }
    acc
}

/// Mix a base seed with a stream index (SplitMix64 finalizer).
pub(crate) fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
