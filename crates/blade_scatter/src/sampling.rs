//! Random draws shared by blade generation and placement.
//!
//! Every sampler takes the random source explicitly as `&mut dyn Rng`, so callers
//! choose between a process-wide generator and a seeded one for reproducible runs.
use rand::Rng;

/// Upper bound (exclusive) of sampled rotations in degrees.
pub const FULL_TURN_DEGREES: f32 = 360.0;

/// Generate a random float in the range [0, 1].
#[inline]
pub fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Sample uniformly from the closed range `[min, max]`.
///
/// A degenerate range (`min == max`) always yields `min`.
#[inline]
pub fn uniform(rng: &mut dyn Rng, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "range min must not exceed max");
    (min + rand01(rng) * (max - min)).clamp(min, max)
}

/// Sample a rotation uniformly from `[0, 360)` degrees.
#[inline]
pub fn random_degrees(rng: &mut dyn Rng) -> f32 {
    (rand01(rng) * FULL_TURN_DEGREES).min(next_down(FULL_TURN_DEGREES))
}

/// Compute the next smaller representable float value.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}
