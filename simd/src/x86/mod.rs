// shadevec/simd/src/x86/mod.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! SSE2 backend. Everything here sticks to the x86-64 baseline instruction set, so rounding is
//! built from truncating conversions instead of the SSE4.1 `roundps` family.

use crate::SIGN_BIT;
use std::arch::x86_64::{self, __m128, __m128i};
use std::cmp::PartialEq;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ops::{Add, AddAssign, BitAnd, BitOr, BitXor, Div, DivAssign, Index, IndexMut, Mul};
use std::ops::{MulAssign, Neg, Not, Sub, SubAssign};

// Floats of at least this magnitude have no fractional bits.
const INTEGRAL_MAGNITUDE: f32 = 8388608.0;

// 32-bit floats

#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x4(pub __m128);

impl F32x4 {
    // Constructors

    #[inline]
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_setr_ps(a, b, c, d)) }
    }

    #[inline]
    pub fn splat(x: f32) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_set1_ps(x)) }
    }

    /// Loads four consecutive floats.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of four `f32` values. No alignment is required.
    #[inline]
    pub unsafe fn load_unaligned(ptr: *const f32) -> F32x4 {
        F32x4(x86_64::_mm_loadu_ps(ptr))
    }

    // Raw access

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        *self.as_array()
    }

    #[inline]
    pub fn as_array(&self) -> &[f32; 4] {
        unsafe { mem::transmute::<&__m128, &[f32; 4]>(&self.0) }
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 4] {
        unsafe { mem::transmute::<&mut __m128, &mut [f32; 4]>(&mut self.0) }
    }

    // Basic operations

    #[inline]
    pub fn recip(self) -> F32x4 {
        F32x4::splat(1.0) / self
    }

    #[inline]
    pub fn min(self, other: F32x4) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_min_ps(self.0, other.0)) }
    }

    #[inline]
    pub fn max(self, other: F32x4) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_max_ps(self.0, other.0)) }
    }

    #[inline]
    pub fn clamp(self, min: F32x4, max: F32x4) -> F32x4 {
        self.max(min).min(max)
    }

    #[inline]
    pub fn abs(self) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_andnot_ps(sign_mask(), self.0)) }
    }

    /// Takes the magnitude of each lane of `self` and the sign of the matching lane of `sign`.
    #[inline]
    pub fn copysign(self, sign: F32x4) -> F32x4 {
        unsafe {
            let mask = sign_mask();
            let magnitude = x86_64::_mm_andnot_ps(mask, self.0);
            F32x4(x86_64::_mm_or_ps(magnitude, x86_64::_mm_and_ps(mask, sign.0)))
        }
    }

    #[inline]
    pub fn trunc(self) -> F32x4 {
        unsafe {
            let integers = x86_64::_mm_cvttps_epi32(self.0);
            let truncated = F32x4(x86_64::_mm_cvtepi32_ps(integers)).copysign(self);
            // Large lanes, infinities and NaNs all fail this test and pass through unchanged.
            let fractional = self.abs().packed_lt(F32x4::splat(INTEGRAL_MAGNITUDE));
            fractional.select(truncated, self)
        }
    }

    #[inline]
    pub fn floor(self) -> F32x4 {
        let truncated = self.trunc();
        truncated - truncated.packed_gt(self).select(F32x4::splat(1.0), F32x4::default())
    }

    #[inline]
    pub fn ceil(self) -> F32x4 {
        let truncated = self.trunc();
        let adjust = truncated.packed_lt(self).select(F32x4::splat(1.0), F32x4::default());
        (truncated + adjust).copysign(self)
    }

    /// Rounds half-way cases away from zero.
    #[inline]
    pub fn round(self) -> F32x4 {
        let truncated = self.trunc();
        let away = (self - truncated).abs().packed_ge(F32x4::splat(0.5));
        (truncated.abs() + away.select(F32x4::splat(1.0), F32x4::default())).copysign(self)
    }

    /// Rounds half-way cases to the nearest even integer.
    #[inline]
    pub fn round_even(self) -> F32x4 {
        unsafe {
            let truncated = self.trunc();
            let one = x86_64::_mm_set1_epi32(1);
            let parity = x86_64::_mm_and_si128(x86_64::_mm_cvttps_epi32(truncated.0), one);
            let odd = U32x4(x86_64::_mm_cmpeq_epi32(parity, one));

            let half = F32x4::splat(0.5);
            let distance = (self - truncated).abs();
            let away = distance.packed_gt(half) | (distance.packed_eq(half) & odd);
            (truncated.abs() + away.select(F32x4::splat(1.0), F32x4::default())).copysign(self)
        }
    }

    #[inline]
    pub fn sqrt(self) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_sqrt_ps(self.0)) }
    }

    // Packed comparisons

    #[inline]
    pub fn packed_eq(self, other: F32x4) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_castps_si128(x86_64::_mm_cmpeq_ps(self.0, other.0))) }
    }

    #[inline]
    pub fn packed_gt(self, other: F32x4) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_castps_si128(x86_64::_mm_cmpgt_ps(self.0, other.0))) }
    }

    #[inline]
    pub fn packed_ge(self, other: F32x4) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_castps_si128(x86_64::_mm_cmpge_ps(self.0, other.0))) }
    }

    #[inline]
    pub fn packed_lt(self, other: F32x4) -> U32x4 {
        other.packed_gt(self)
    }

    #[inline]
    pub fn packed_le(self, other: F32x4) -> U32x4 {
        other.packed_ge(self)
    }

    // Bit casts

    #[inline]
    pub fn to_bits(self) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_castps_si128(self.0)) }
    }

    #[inline]
    pub fn from_bits(bits: U32x4) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_castsi128_ps(bits.0)) }
    }

    // Shuffles

    #[inline]
    pub fn zwxy(self) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_shuffle_ps(self.0, self.0, 0b0100_1110)) }
    }

    #[inline]
    pub fn yxyx(self) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_shuffle_ps(self.0, self.0, 0b0001_0001)) }
    }
}

#[inline]
unsafe fn sign_mask() -> __m128 {
    x86_64::_mm_castsi128_ps(x86_64::_mm_set1_epi32(SIGN_BIT as i32))
}

impl Default for F32x4 {
    #[inline]
    fn default() -> F32x4 {
        unsafe { F32x4(x86_64::_mm_setzero_ps()) }
    }
}

impl Index<usize> for F32x4 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.as_array()[index]
    }
}

impl IndexMut<usize> for F32x4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.as_mut_array()[index]
    }
}

impl Debug for F32x4 {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "<{}, {}, {}, {}>", self[0], self[1], self[2], self[3])
    }
}

impl PartialEq for F32x4 {
    #[inline]
    fn eq(&self, other: &F32x4) -> bool {
        self.packed_eq(*other).is_all_ones()
    }
}

impl Add<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn add(self, other: F32x4) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_add_ps(self.0, other.0)) }
    }
}

impl Sub<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn sub(self, other: F32x4) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_sub_ps(self.0, other.0)) }
    }
}

impl Mul<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn mul(self, other: F32x4) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_mul_ps(self.0, other.0)) }
    }
}

impl Div<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn div(self, other: F32x4) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_div_ps(self.0, other.0)) }
    }
}

impl Neg for F32x4 {
    type Output = F32x4;
    #[inline]
    fn neg(self) -> F32x4 {
        unsafe { F32x4(x86_64::_mm_xor_ps(self.0, sign_mask())) }
    }
}

impl AddAssign for F32x4 {
    #[inline]
    fn add_assign(&mut self, other: F32x4) {
        *self = *self + other
    }
}

impl SubAssign for F32x4 {
    #[inline]
    fn sub_assign(&mut self, other: F32x4) {
        *self = *self - other
    }
}

impl MulAssign for F32x4 {
    #[inline]
    fn mul_assign(&mut self, other: F32x4) {
        *self = *self * other
    }
}

impl DivAssign for F32x4 {
    #[inline]
    fn div_assign(&mut self, other: F32x4) {
        *self = *self / other
    }
}

// 32-bit unsigned integers

#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct U32x4(pub __m128i);

impl U32x4 {
    // Constructors

    #[inline]
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_setr_epi32(a as i32, b as i32, c as i32, d as i32)) }
    }

    #[inline]
    pub fn splat(x: u32) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_set1_epi32(x as i32)) }
    }

    // Basic operations

    #[inline]
    pub fn is_all_ones(self) -> bool {
        self.packed_eq(U32x4::splat(!0)).byte_mask() == 0xffff
    }

    #[inline]
    pub fn is_all_zeroes(self) -> bool {
        self.packed_eq(U32x4::default()).byte_mask() == 0xffff
    }

    /// Picks the bits of `if_true` where this mask is set and `if_false` elsewhere.
    #[inline]
    pub fn select(self, if_true: F32x4, if_false: F32x4) -> F32x4 {
        unsafe {
            let mask = x86_64::_mm_castsi128_ps(self.0);
            F32x4(x86_64::_mm_or_ps(
                x86_64::_mm_and_ps(mask, if_true.0),
                x86_64::_mm_andnot_ps(mask, if_false.0),
            ))
        }
    }

    #[inline]
    fn byte_mask(self) -> i32 {
        unsafe { x86_64::_mm_movemask_epi8(self.0) }
    }

    // Packed comparisons

    #[inline]
    pub fn packed_eq(self, other: U32x4) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_cmpeq_epi32(self.0, other.0)) }
    }
}

impl Default for U32x4 {
    #[inline]
    fn default() -> U32x4 {
        unsafe { U32x4(x86_64::_mm_setzero_si128()) }
    }
}

impl Debug for U32x4 {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "<{:#x}, {:#x}, {:#x}, {:#x}>", self[0], self[1], self[2], self[3])
    }
}

impl Index<usize> for U32x4 {
    type Output = u32;
    #[inline]
    fn index(&self, index: usize) -> &u32 {
        unsafe { &mem::transmute::<&__m128i, &[u32; 4]>(&self.0)[index] }
    }
}

impl PartialEq for U32x4 {
    #[inline]
    fn eq(&self, other: &U32x4) -> bool {
        self.packed_eq(*other).is_all_ones()
    }
}

impl Not for U32x4 {
    type Output = U32x4;
    #[inline]
    fn not(self) -> U32x4 {
        self ^ U32x4::splat(!0)
    }
}

impl BitAnd<U32x4> for U32x4 {
    type Output = U32x4;
    #[inline]
    fn bitand(self, other: U32x4) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_and_si128(self.0, other.0)) }
    }
}

impl BitOr<U32x4> for U32x4 {
    type Output = U32x4;
    #[inline]
    fn bitor(self, other: U32x4) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_or_si128(self.0, other.0)) }
    }
}

impl BitXor<U32x4> for U32x4 {
    type Output = U32x4;
    #[inline]
    fn bitxor(self, other: U32x4) -> U32x4 {
        unsafe { U32x4(x86_64::_mm_xor_si128(self.0, other.0)) }
    }
}
