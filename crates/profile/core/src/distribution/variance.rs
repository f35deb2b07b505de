//! Variance applicator: base value plus symmetric uniform noise.

use rand::Rng;

use super::ValueDomain;

/// Perturbs `base` by uniform noise in `[-half_width, +half_width]` and clamps
/// the result into `domain`.
///
/// A non-positive (or non-finite) half-width means "no perturbation" and
/// returns `base` unchanged without consuming randomness.
pub fn apply_variance<R: Rng + ?Sized>(
    base: f64,
    half_width: f64,
    domain: ValueDomain,
    rng: &mut R,
) -> f64 {
    if half_width <= 0.0 || !half_width.is_finite() {
        return base;
    }

    let noise = rng.gen_range(-half_width..=half_width);
    domain.clamp(base + noise)
}
