// shadevec/vector/src/math.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! GLSL-style shading functions over `Vec4`.
//!
//! Functions that accept a scalar in place of a vector take any `Broadcast` argument. A scalar
//! is splatted across all four lanes first, so `clamp(v, 0.0, 1.0)` and
//! `clamp(v, Vec4::splat(0.0), Vec4::splat(1.0))` are the same computation.
//!
//! The reductions (`dot`, `length`, `distance`, `normalize`, and the ones built on them) always
//! add the lane products as `(x + z) + (y + w)`.

use crate::vector::Vec4;
use shadevec_simd::default::{F32x4, U32x4};
use shadevec_simd::SIGN_BIT;

/// A scalar or vector operand, widened to four lanes.
pub trait Broadcast: Copy {
    fn broadcast(self) -> Vec4;
}

impl Broadcast for f32 {
    #[inline]
    fn broadcast(self) -> Vec4 {
        Vec4::splat(self)
    }
}

impl Broadcast for Vec4 {
    #[inline]
    fn broadcast(self) -> Vec4 {
        self
    }
}

// Exponential

#[inline]
pub fn sqrt(v: Vec4) -> Vec4 {
    Vec4(v.0.sqrt())
}

/// `1 / sqrt(v)`, computed exactly rather than with the hardware estimate.
#[inline]
pub fn inverse_sqrt(v: Vec4) -> Vec4 {
    Vec4(v.0.sqrt().recip())
}

// Common

#[inline]
pub fn abs<V: Broadcast>(v: V) -> Vec4 {
    Vec4(v.broadcast().0.abs())
}

#[inline]
pub fn ceil(v: Vec4) -> Vec4 {
    Vec4(v.0.ceil())
}

#[inline]
pub fn floor(v: Vec4) -> Vec4 {
    Vec4(v.0.floor())
}

#[inline]
pub fn trunc(v: Vec4) -> Vec4 {
    Vec4(v.0.trunc())
}

#[inline]
pub fn fract(v: Vec4) -> Vec4 {
    Vec4(v.0 - v.0.floor())
}

/// Rounds to the nearest integer, half-way cases away from zero.
#[inline]
pub fn round(v: Vec4) -> Vec4 {
    Vec4(v.0.round())
}

/// Rounds to the nearest integer, half-way cases to even.
#[inline]
pub fn round_even(v: Vec4) -> Vec4 {
    Vec4(v.0.round_even())
}

/// -1, 0 or 1 per lane. Only zeroes map to 0; a NaN lane maps to 1 with the NaN's sign.
#[inline]
pub fn sign(v: Vec4) -> Vec4 {
    let nonzero = !v.0.packed_eq(F32x4::default());
    Vec4(nonzero.select(F32x4::splat(1.0).copysign(v.0), F32x4::default()))
}

#[inline]
pub fn clamp<L, H>(v: Vec4, lo: L, hi: H) -> Vec4
where
    L: Broadcast,
    H: Broadcast,
{
    Vec4(v.0.clamp(lo.broadcast().0, hi.broadcast().0))
}

#[inline]
pub fn max<V: Broadcast>(v: Vec4, other: V) -> Vec4 {
    Vec4(v.0.max(other.broadcast().0))
}

#[inline]
pub fn min<V: Broadcast>(v: Vec4, other: V) -> Vec4 {
    Vec4(v.0.min(other.broadcast().0))
}

/// `v0 * (1 - t) + v1 * t`.
#[inline]
pub fn mix<T: Broadcast>(v0: Vec4, v1: Vec4, t: T) -> Vec4 {
    let t = t.broadcast().0;
    Vec4(v0.0 * (F32x4::splat(1.0) - t) + v1.0 * t)
}

/// `v0 - v1 * floor(v0 / v1)`: the result takes the sign of the divisor.
#[inline]
pub fn modulo<V: Broadcast>(v0: Vec4, v1: V) -> Vec4 {
    let divisor = v1.broadcast().0;
    Vec4(v0.0 - divisor * (v0.0 / divisor).floor())
}

/// Splits `v` into whole and fractional parts, both with the sign of `v`.
///
/// The whole part goes to `int_part`; the fraction is returned. Infinities have a zero fraction.
#[inline]
pub fn modf(v: Vec4, int_part: &mut Vec4) -> Vec4 {
    let whole = v.0.trunc();
    *int_part = Vec4(whole);
    let infinite = v.0.abs().packed_eq(F32x4::splat(f32::INFINITY));
    Vec4(infinite.select(F32x4::default(), v.0 - whole).copysign(v.0))
}

/// Hermite interpolation between 0 and 1 as `v` moves from `edge0` to `edge1`.
#[inline]
pub fn smoothstep<E0, E1>(edge0: E0, edge1: E1, v: Vec4) -> Vec4
where
    E0: Broadcast,
    E1: Broadcast,
{
    let (edge0, edge1) = (edge0.broadcast().0, edge1.broadcast().0);
    let t = ((v.0 - edge0) / (edge1 - edge0)).clamp(F32x4::default(), F32x4::splat(1.0));
    Vec4(t * t * (F32x4::splat(3.0) - (t + t)))
}

/// 1 in the lanes where `v <= edge`, 0 elsewhere.
#[inline]
pub fn step<E: Broadcast>(edge: E, v: Vec4) -> Vec4 {
    let below = v.0.packed_le(edge.broadcast().0);
    Vec4(below.select(F32x4::splat(1.0), F32x4::default()))
}

// Geometric

/// The sum of the lane products, added as `(x + z) + (y + w)`.
#[inline]
pub fn dot(a: Vec4, b: Vec4) -> f32 {
    (a.0 * b.0).horizontal_sum()[0]
}

#[inline]
pub fn length(v: Vec4) -> f32 {
    dot(v, v).sqrt()
}

#[inline]
pub fn distance(a: Vec4, b: Vec4) -> f32 {
    length(a - b)
}

/// Scales `v` to unit length. A zero vector yields NaNs.
#[inline]
pub fn normalize(v: Vec4) -> Vec4 {
    Vec4(v.0 / (v.0 * v.0).horizontal_sum().sqrt())
}

/// `-n` where `dot(nref, i) < 0`, otherwise `n`. Chooses by masking the sign bit, not by
/// branching.
#[inline]
pub fn faceforward(n: Vec4, i: Vec4, nref: Vec4) -> Vec4 {
    let facing = (nref.0 * i.0).horizontal_sum().packed_lt(F32x4::default());
    Vec4(F32x4::from_bits(n.0.to_bits() ^ (facing & U32x4::splat(SIGN_BIT))))
}

/// Reflects the incident vector `i` about the normal `n`.
#[inline]
pub fn reflect(i: Vec4, n: Vec4) -> Vec4 {
    let d = (n.0 * i.0).horizontal_sum();
    Vec4(i.0 - (d + d) * n.0)
}

/// Refracts the incident vector `i` through a surface with normal `n` and index ratio `eta`.
///
/// Total internal reflection gives the zero vector.
#[inline]
pub fn refract(i: Vec4, n: Vec4, eta: f32) -> Vec4 {
    let (one, eta) = (F32x4::splat(1.0), F32x4::splat(eta));
    let d = (n.0 * i.0).horizontal_sum();
    let k = one - eta * eta * (one - d * d);
    let refracted = eta * i.0 - (eta * d + k.sqrt()) * n.0;
    Vec4(k.packed_lt(F32x4::default()).select(F32x4::default(), refracted))
}

#[cfg(test)]
mod test {
    use crate::math::*;
    use crate::vector::Vec4;

    fn random_vector(rng: &mut fastrand::Rng, scale: f32) -> Vec4 {
        let mut lane = || (rng.f32() - 0.5) * scale;
        Vec4::new(lane(), lane(), lane(), lane())
    }

    fn close(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() <= epsilon * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_sqrt_and_inverse_sqrt() {
        let v = Vec4::new(4.0, 16.0, 0.25, 2.0);
        assert_eq!(sqrt(v), Vec4::new(2.0, 4.0, 0.5, 2.0f32.sqrt()));
        assert_eq!(inverse_sqrt(v), Vec4::new(0.5, 0.25, 2.0, 1.0 / 2.0f32.sqrt()));
        assert_eq!(inverse_sqrt(Vec4::zero()), Vec4::splat(f32::INFINITY));
    }

    #[test]
    fn test_abs() {
        let v = abs(Vec4::new(-1.0, -0.0, 2.0, f32::NEG_INFINITY));
        assert_eq!(v, Vec4::new(1.0, 0.0, 2.0, f32::INFINITY));
        assert_eq!(v[1].to_bits(), 0);
        assert_eq!(abs(-3.0), Vec4::splat(3.0));
    }

    #[test]
    fn test_rounding() {
        let v = Vec4::new(-1.5, -0.25, 0.5, 2.5);
        assert_eq!(ceil(v), Vec4::new(-1.0, 0.0, 1.0, 3.0));
        assert_eq!(floor(v), Vec4::new(-2.0, -1.0, 0.0, 2.0));
        assert_eq!(trunc(v), Vec4::new(-1.0, 0.0, 0.0, 2.0));
        assert_eq!(round(v), Vec4::new(-2.0, 0.0, 1.0, 3.0));
        assert_eq!(round_even(v), Vec4::new(-2.0, 0.0, 0.0, 2.0));
        assert_eq!(
            round_even(Vec4::new(1.5, 3.5, -4.5, 5.4999)),
            Vec4::new(2.0, 4.0, -4.0, 5.0)
        );
        assert_eq!(fract(v), Vec4::new(0.5, 0.75, 0.5, 0.5));
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(Vec4::new(-3.0, 0.0, 1.0e-30, -0.0)), Vec4::new(-1.0, 0.0, 1.0, 0.0));
        assert_eq!(
            sign(Vec4::new(f32::NEG_INFINITY, 2.0, -1.0e-40, 7.0)),
            Vec4::new(-1.0, 1.0, -1.0, 1.0)
        );
    }

    #[test]
    fn test_clamp_min_max() {
        let v = Vec4::new(-2.0, 0.25, 0.75, 3.0);
        assert_eq!(clamp(v, 0.0, 1.0), Vec4::new(0.0, 0.25, 0.75, 1.0));
        assert_eq!(
            clamp(v, Vec4::new(-3.0, 0.5, 0.0, 0.0), Vec4::new(-1.0, 1.0, 0.5, 4.0)),
            Vec4::new(-2.0, 0.5, 0.5, 3.0)
        );
        assert_eq!(max(v, 0.5), Vec4::new(0.5, 0.5, 0.75, 3.0));
        assert_eq!(min(v, 0.5), Vec4::new(-2.0, 0.25, 0.5, 0.5));
        assert_eq!(max(v, Vec4::new(0.0, 0.0, 1.0, 1.0)), Vec4::new(0.0, 0.25, 1.0, 3.0));
        assert_eq!(min(v, Vec4::new(0.0, 0.0, 1.0, 1.0)), Vec4::new(-2.0, 0.0, 0.75, 1.0));
    }

    #[test]
    fn test_clamp_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..256 {
            let v = random_vector(&mut rng, 8.0);
            let clamped = clamp(v, -1.0, 2.0);
            for lane in 0..4 {
                assert!(clamped[lane] >= -1.0 && clamped[lane] <= 2.0);
                if v[lane] >= -1.0 && v[lane] <= 2.0 {
                    assert_eq!(clamped[lane], v[lane]);
                }
            }
        }
    }

    #[test]
    fn test_scalar_forms_match_broadcast() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..256 {
            let v0 = random_vector(&mut rng, 10.0);
            let v1 = random_vector(&mut rng, 10.0);
            let (a, b) = ((rng.f32() - 0.5) * 10.0, (rng.f32() - 0.5) * 10.0);
            let (sa, sb) = (Vec4::splat(a), Vec4::splat(b));
            assert_eq!(abs(a), abs(sa));
            let (lo, hi) = (a.min(b), a.max(b));
            assert_eq!(clamp(v0, lo, hi), clamp(v0, Vec4::splat(lo), Vec4::splat(hi)));
            assert_eq!(min(v0, a), min(v0, sa));
            assert_eq!(max(v0, a), max(v0, sa));
            assert_eq!(mix(v0, v1, a), mix(v0, v1, sa));
            assert_eq!(step(a, v0), step(sa, v0));
            if a != 0.0 {
                assert_eq!(modulo(v0, a), modulo(v0, sa));
            }
            if a != b {
                assert_eq!(smoothstep(a, b, v0), smoothstep(sa, sb, v0));
            }
        }
    }

    #[test]
    fn test_mix() {
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..256 {
            let v0 = random_vector(&mut rng, 100.0);
            let v1 = random_vector(&mut rng, 100.0);
            assert_eq!(mix(v0, v1, 0.0), v0);
            assert_eq!(mix(v0, v1, 1.0), v1);
        }
        let halfway = mix(Vec4::splat(2.0), Vec4::new(4.0, 0.0, 2.0, -2.0), 0.5);
        assert_eq!(halfway, Vec4::new(3.0, 1.0, 2.0, 0.0));
        let per_lane = mix(Vec4::zero(), Vec4::splat(8.0), Vec4::new(0.0, 0.25, 0.5, 1.0));
        assert_eq!(per_lane, Vec4::new(0.0, 2.0, 4.0, 8.0));
    }

    #[test]
    fn test_modulo_follows_divisor_sign() {
        let v = Vec4::new(5.5, -5.5, 5.5, -5.5);
        assert_eq!(modulo(v, Vec4::new(2.0, 2.0, -2.0, -2.0)), Vec4::new(1.5, 0.5, -0.5, -1.5));
        assert_eq!(modulo(Vec4::new(7.0, -1.0, 0.0, 3.0), 3.0), Vec4::new(1.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn test_modf() {
        let mut whole = Vec4::zero();
        let fraction = modf(Vec4::new(2.75, -2.75, -0.5, 3.0), &mut whole);
        assert_eq!(whole, Vec4::new(2.0, -2.0, -0.0, 3.0));
        assert_eq!(fraction, Vec4::new(0.75, -0.75, -0.5, 0.0));
        assert_eq!(whole[2].to_bits(), 0x8000_0000);

        let fraction = modf(Vec4::new(f32::INFINITY, -1.0, f32::NEG_INFINITY, -7.0), &mut whole);
        assert_eq!(whole, Vec4::new(f32::INFINITY, -1.0, f32::NEG_INFINITY, -7.0));
        assert_eq!(fraction, Vec4::zero());
        assert_eq!(fraction[2].to_bits(), 0x8000_0000);
        assert_eq!(fraction[3].to_bits(), 0x8000_0000);
    }

    #[test]
    fn test_smoothstep() {
        let v = Vec4::new(-1.0, 0.0, 0.5, 2.0);
        assert_eq!(smoothstep(0.0, 1.0, v), Vec4::new(0.0, 0.0, 0.5, 1.0));
        assert_eq!(smoothstep(0.0, 4.0, Vec4::splat(1.0)), Vec4::splat(0.15625));
        assert_eq!(
            smoothstep(Vec4::zero(), Vec4::new(1.0, 2.0, 4.0, 8.0), Vec4::splat(2.0)),
            Vec4::new(1.0, 1.0, 0.5, 0.15625)
        );
    }

    #[test]
    fn test_step() {
        assert_eq!(step(0.0, Vec4::new(-1.0, 0.0, 1.0, 2.0)), Vec4::new(1.0, 1.0, 0.0, 0.0));
        assert_eq!(
            step(Vec4::new(0.0, 1.0, 2.0, 3.0), Vec4::splat(1.5)),
            Vec4::new(0.0, 0.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_dot_and_length() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(5.0, -6.0, 7.0, 0.5);
        assert_eq!(dot(a, b), 16.0);
        assert_eq!(length(Vec4::new(2.0, 4.0, 4.0, 0.0)), 6.0);
        assert_eq!(distance(Vec4::new(1.0, 1.0, 1.0, 1.0), Vec4::new(2.0, 2.0, 2.0, 2.0)), 2.0);

        // The products are summed as (x + z) + (y + w).
        assert_eq!(dot(Vec4::new(1.0e8, 1.0, -1.0e8, 1.0), Vec4::splat(1.0)), 2.0);

        let mut rng = fastrand::Rng::with_seed(23);
        for _ in 0..256 {
            let v = random_vector(&mut rng, 100.0);
            let w = random_vector(&mut rng, 100.0);
            assert!(close(dot(v, v), length(v) * length(v), 1.0e-5));
            assert_eq!(distance(v, w), distance(w, v));
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Vec4::new(0.0, 3.0, 0.0, 4.0)), Vec4::new(0.0, 0.6, 0.0, 0.8));
        let mut rng = fastrand::Rng::with_seed(31);
        for _ in 0..256 {
            let v = random_vector(&mut rng, 50.0);
            if length(v) > 0.0 {
                assert!(close(length(normalize(v)), 1.0, 1.0e-5), "{:?}", v);
            }
        }
        let degenerate = normalize(Vec4::zero());
        assert!((0..4).all(|lane| degenerate[lane].is_nan()));
    }

    #[test]
    fn test_faceforward() {
        let n = Vec4::new(0.0, 1.0, 0.0, 0.0);
        let i = Vec4::new(0.0, -1.0, 0.0, 0.0);
        assert_eq!(faceforward(n, i, n), -n);
        assert_eq!(faceforward(n, -i, n), n);
        assert_eq!(faceforward(n, Vec4::new(1.0, 0.0, 0.0, 0.0), n), n);
    }

    #[test]
    fn test_reflect() {
        let i = Vec4::new(1.0, -1.0, 0.0, 0.0);
        let n = Vec4::new(0.0, 1.0, 0.0, 0.0);
        assert_eq!(reflect(i, n), Vec4::new(1.0, 1.0, 0.0, 0.0));
        assert_eq!(reflect(n, n), -n);
    }

    #[test]
    fn test_refract() {
        let n = Vec4::new(0.0, 0.0, 1.0, 0.0);

        // Grazing incidence from the dense side: k = 1 - 4 * (1 - 0) < 0.
        let grazing = Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(refract(grazing, n, 2.0), Vec4::zero());
        assert_eq!(refract(Vec4::new(0.8, 0.0, -0.6, 0.0), n, 1.5), Vec4::zero());

        // A ray along the normal has k = 1 whatever the ratio, so it is never totally
        // reflected: 2 * i - (2 + 1) * n flips it.
        assert_eq!(refract(n, n, 2.0), Vec4::new(0.0, 0.0, -1.0, 0.0));

        // Head-on rays pass straight through at any ratio.
        let head_on = Vec4::new(0.0, 0.0, -1.0, 0.0);
        assert_eq!(refract(head_on, n, 1.0), head_on);
        assert_eq!(refract(head_on, n, 0.5), head_on);

        // A ratio of 1 leaves any unit ray unchanged.
        let oblique = Vec4::new(0.6, 0.0, -0.8, 0.0);
        assert!(refract(oblique, n, 1.0).0.approx_eq(oblique.0, 1.0e-6));
    }
}
