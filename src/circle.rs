//! Arithmetic on the zodiac circle.
//!
//! Positions are plain `f64` degrees (or radians for the `_radians` variants).
//! Inputs do not have to be normalized; every result that denotes a position
//! is returned in `[0, 360)` (or `[0, 2π)`). NaN propagates.

use crate::consts::{DEGREES_HALF, DEGREES_PER_CIRCLE, DEGREES_QUARTER};
use std::f64::consts::{PI, TAU};

/// Packed minutes are written as hundredths: `10.30` means 10°30'.
const PACKED_MINUTES_SCALE: f64 = 100.0;
const MINUTES_PER_DEGREE: f64 = 60.0;

/// Brings any angle in degrees into `[0, 360)`.
///
/// Values already in range come back unchanged (negative zero becomes zero).
pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap(degrees, DEGREES_PER_CIRCLE)
}

/// Brings any angle in radians into `[0, 2π)`.
pub fn normalize_radians(radians: f64) -> f64 {
    wrap(radians, TAU)
}

fn wrap(value: f64, period: f64) -> f64 {
    // Nearly every caller is at most one period out of range.
    let mut v = value;
    if v >= period {
        v -= period;
    } else if v < 0.0 {
        v += period;
    }
    if (0.0..period).contains(&v) {
        return v + 0.0;
    }

    // Floored remainder; a tiny negative remainder can round up to a full period.
    let r = v.rem_euclid(period);
    if r >= period { 0.0 } else { r }
}

/// Direction of the vector from the origin to `(x, y)`, in degrees `[0, 360)`.
///
/// The origin itself maps to 0.
pub fn polar_angle(x: f64, y: f64) -> f64 {
    polar(x, y, DEGREES_HALF, |t| t.atan().to_degrees())
}

/// Direction of the vector from the origin to `(x, y)`, in radians `[0, 2π)`.
pub fn polar_angle_radians(x: f64, y: f64) -> f64 {
    polar(x, y, PI, f64::atan)
}

fn polar(x: f64, y: f64, half_turn: f64, atan: impl Fn(f64) -> f64) -> f64 {
    if x == 0.0 {
        return if y > 0.0 {
            half_turn / 2.0
        } else if y < 0.0 {
            half_turn * 1.5
        } else {
            0.0
        };
    }
    if y == 0.0 {
        return if x < 0.0 { half_turn } else { 0.0 };
    }

    // atan only covers (-90, 90); shift by half turns into the right quadrant.
    let mut a = atan(y / x);
    if a < 0.0 {
        a += half_turn;
    }
    if y < 0.0 {
        a += half_turn;
    }
    if a >= 2.0 * half_turn { a - 2.0 * half_turn } else { a }
}

/// Non-directional distance between two zodiac positions, in `[0, 180]`.
pub fn shortest_distance(deg1: f64, deg2: f64) -> f64 {
    let d = normalize_degrees((deg1 - deg2).abs());
    if d < DEGREES_HALF { d } else { DEGREES_PER_CIRCLE - d }
}

/// How far `deg2` is ahead of (positive) or behind (negative) `deg1`
/// going the short way round, in `(-180, 180]`.
pub fn signed_difference(deg1: f64, deg2: f64) -> f64 {
    let d = normalize_degrees(deg2 - deg1);
    if d > DEGREES_HALF { d - DEGREES_PER_CIRCLE } else { d }
}

/// Point halfway between two zodiac positions on the shorter arc.
///
/// When the two positions are exactly opposite both candidates are equally
/// near; the one on the far side of the arithmetic mean is returned.
pub fn midpoint(deg1: f64, deg2: f64) -> f64 {
    let mid = (deg1 + deg2) / 2.0;
    if shortest_distance(deg1, mid) < DEGREES_QUARTER {
        normalize_degrees(mid)
    } else {
        normalize_degrees(mid + DEGREES_HALF)
    }
}

/// Reads a packed degrees.minutes value: `10.30` is 10°30', i.e. `10.5`.
pub fn packed_dm_to_degrees(packed: f64) -> f64 {
    rescale_fraction(packed, PACKED_MINUTES_SCALE / MINUTES_PER_DEGREE)
}

/// Inverse of [`packed_dm_to_degrees`]: `10.5` becomes `10.30`.
pub fn degrees_to_packed_dm(degrees: f64) -> f64 {
    rescale_fraction(degrees, MINUTES_PER_DEGREE / PACKED_MINUTES_SCALE)
}

fn rescale_fraction(value: f64, factor: f64) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs();
    value.signum() * (magnitude.trunc() + magnitude.fract() * factor)
}
