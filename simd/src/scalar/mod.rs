// shadevec/simd/src/scalar/mod.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::SIGN_BIT;
use std::fmt::{self, Debug, Formatter};
use std::ops::{Add, AddAssign, BitAnd, BitOr, BitXor, Div, DivAssign, Index, IndexMut, Mul};
use std::ops::{MulAssign, Neg, Not, Sub, SubAssign};

// 32-bit floats

// Same size and alignment as `__m128`.
#[derive(Clone, Copy, Default, PartialEq)]
#[repr(C, align(16))]
pub struct F32x4(pub [f32; 4]);

impl F32x4 {
    // Constructors

    #[inline]
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> F32x4 {
        F32x4([a, b, c, d])
    }

    #[inline]
    pub fn splat(x: f32) -> F32x4 {
        F32x4([x; 4])
    }

    /// Loads four consecutive floats.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of four `f32` values. No alignment is required.
    #[inline]
    pub unsafe fn load_unaligned(ptr: *const f32) -> F32x4 {
        F32x4((ptr as *const [f32; 4]).read_unaligned())
    }

    // Raw access

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        self.0
    }

    #[inline]
    pub fn as_array(&self) -> &[f32; 4] {
        &self.0
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 4] {
        &mut self.0
    }

    // Basic operations

    #[inline]
    pub fn recip(self) -> F32x4 {
        F32x4::splat(1.0) / self
    }

    #[inline]
    pub fn min(self, other: F32x4) -> F32x4 {
        F32x4([
            self[0].min(other[0]),
            self[1].min(other[1]),
            self[2].min(other[2]),
            self[3].min(other[3]),
        ])
    }

    #[inline]
    pub fn max(self, other: F32x4) -> F32x4 {
        F32x4([
            self[0].max(other[0]),
            self[1].max(other[1]),
            self[2].max(other[2]),
            self[3].max(other[3]),
        ])
    }

    #[inline]
    pub fn clamp(self, min: F32x4, max: F32x4) -> F32x4 {
        self.max(min).min(max)
    }

    #[inline]
    pub fn abs(self) -> F32x4 {
        F32x4::from_bits(self.to_bits() & !U32x4::splat(SIGN_BIT))
    }

    /// Takes the magnitude of each lane of `self` and the sign of the matching lane of `sign`.
    #[inline]
    pub fn copysign(self, sign: F32x4) -> F32x4 {
        let sign_mask = U32x4::splat(SIGN_BIT);
        F32x4::from_bits((self.to_bits() & !sign_mask) | (sign.to_bits() & sign_mask))
    }

    #[inline]
    pub fn floor(self) -> F32x4 {
        F32x4([
            self[0].floor(),
            self[1].floor(),
            self[2].floor(),
            self[3].floor(),
        ])
    }

    #[inline]
    pub fn ceil(self) -> F32x4 {
        F32x4([
            self[0].ceil(),
            self[1].ceil(),
            self[2].ceil(),
            self[3].ceil(),
        ])
    }

    #[inline]
    pub fn trunc(self) -> F32x4 {
        F32x4([
            self[0].trunc(),
            self[1].trunc(),
            self[2].trunc(),
            self[3].trunc(),
        ])
    }

    /// Rounds half-way cases away from zero.
    #[inline]
    pub fn round(self) -> F32x4 {
        F32x4([
            self[0].round(),
            self[1].round(),
            self[2].round(),
            self[3].round(),
        ])
    }

    /// Rounds half-way cases to the nearest even integer.
    #[inline]
    pub fn round_even(self) -> F32x4 {
        F32x4([
            self[0].round_ties_even(),
            self[1].round_ties_even(),
            self[2].round_ties_even(),
            self[3].round_ties_even(),
        ])
    }

    #[inline]
    pub fn sqrt(self) -> F32x4 {
        F32x4([
            self[0].sqrt(),
            self[1].sqrt(),
            self[2].sqrt(),
            self[3].sqrt(),
        ])
    }

    // Packed comparisons

    #[inline]
    pub fn packed_eq(self, other: F32x4) -> U32x4 {
        U32x4([
            if self[0] == other[0] { !0 } else { 0 },
            if self[1] == other[1] { !0 } else { 0 },
            if self[2] == other[2] { !0 } else { 0 },
            if self[3] == other[3] { !0 } else { 0 },
        ])
    }

    #[inline]
    pub fn packed_gt(self, other: F32x4) -> U32x4 {
        U32x4([
            if self[0] > other[0] { !0 } else { 0 },
            if self[1] > other[1] { !0 } else { 0 },
            if self[2] > other[2] { !0 } else { 0 },
            if self[3] > other[3] { !0 } else { 0 },
        ])
    }

    #[inline]
    pub fn packed_ge(self, other: F32x4) -> U32x4 {
        U32x4([
            if self[0] >= other[0] { !0 } else { 0 },
            if self[1] >= other[1] { !0 } else { 0 },
            if self[2] >= other[2] { !0 } else { 0 },
            if self[3] >= other[3] { !0 } else { 0 },
        ])
    }

    #[inline]
    pub fn packed_le(self, other: F32x4) -> U32x4 {
        other.packed_ge(self)
    }

    #[inline]
    pub fn packed_lt(self, other: F32x4) -> U32x4 {
        other.packed_gt(self)
    }

    // Bit casts

    #[inline]
    pub fn to_bits(self) -> U32x4 {
        U32x4([
            self[0].to_bits(),
            self[1].to_bits(),
            self[2].to_bits(),
            self[3].to_bits(),
        ])
    }

    #[inline]
    pub fn from_bits(bits: U32x4) -> F32x4 {
        F32x4([
            f32::from_bits(bits[0]),
            f32::from_bits(bits[1]),
            f32::from_bits(bits[2]),
            f32::from_bits(bits[3]),
        ])
    }

    // Shuffles

    #[inline]
    pub fn zwxy(self) -> F32x4 {
        F32x4([self[2], self[3], self[0], self[1]])
    }

    #[inline]
    pub fn yxyx(self) -> F32x4 {
        F32x4([self[1], self[0], self[1], self[0]])
    }
}

impl Index<usize> for F32x4 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl IndexMut<usize> for F32x4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.0[index]
    }
}

impl Debug for F32x4 {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "<{}, {}, {}, {}>", self[0], self[1], self[2], self[3])
    }
}

impl Add<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn add(self, other: F32x4) -> F32x4 {
        F32x4([
            self[0] + other[0],
            self[1] + other[1],
            self[2] + other[2],
            self[3] + other[3],
        ])
    }
}

impl Sub<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn sub(self, other: F32x4) -> F32x4 {
        F32x4([
            self[0] - other[0],
            self[1] - other[1],
            self[2] - other[2],
            self[3] - other[3],
        ])
    }
}

impl Mul<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn mul(self, other: F32x4) -> F32x4 {
        F32x4([
            self[0] * other[0],
            self[1] * other[1],
            self[2] * other[2],
            self[3] * other[3],
        ])
    }
}

impl Div<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn div(self, other: F32x4) -> F32x4 {
        F32x4([
            self[0] / other[0],
            self[1] / other[1],
            self[2] / other[2],
            self[3] / other[3],
        ])
    }
}

impl Neg for F32x4 {
    type Output = F32x4;
    #[inline]
    fn neg(self) -> F32x4 {
        F32x4::from_bits(self.to_bits() ^ U32x4::splat(SIGN_BIT))
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

#[derive(Clone, Copy, Default, PartialEq)]
pub struct U32x4(pub [u32; 4]);

impl U32x4 {
    #[inline]
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> U32x4 {
        U32x4([a, b, c, d])
    }

    #[inline]
    pub fn splat(x: u32) -> U32x4 {
        U32x4([x; 4])
    }

    #[inline]
    pub fn is_all_ones(self) -> bool {
        self[0] == !0 && self[1] == !0 && self[2] == !0 && self[3] == !0
    }

    #[inline]
    pub fn is_all_zeroes(self) -> bool {
        self[0] == 0 && self[1] == 0 && self[2] == 0 && self[3] == 0
    }

    /// Picks the bits of `if_true` where this mask is set and `if_false` elsewhere.
    #[inline]
    pub fn select(self, if_true: F32x4, if_false: F32x4) -> F32x4 {
        F32x4::from_bits((if_true.to_bits() & self) | (if_false.to_bits() & !self))
    }

    // Packed comparisons

    #[inline]
    pub fn packed_eq(self, other: U32x4) -> U32x4 {
        U32x4([
            if self[0] == other[0] { !0 } else { 0 },
            if self[1] == other[1] { !0 } else { 0 },
            if self[2] == other[2] { !0 } else { 0 },
            if self[3] == other[3] { !0 } else { 0 },
        ])
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
        &self.0[index]
    }
}

impl Not for U32x4 {
    type Output = U32x4;
    #[inline]
    fn not(self) -> U32x4 {
        U32x4([!self[0], !self[1], !self[2], !self[3]])
    }
}

impl BitAnd<U32x4> for U32x4 {
    type Output = U32x4;
    #[inline]
    fn bitand(self, other: U32x4) -> U32x4 {
        U32x4([
            self[0] & other[0],
            self[1] & other[1],
            self[2] & other[2],
            self[3] & other[3],
        ])
    }
}

impl BitOr<U32x4> for U32x4 {
    type Output = U32x4;
    #[inline]
    fn bitor(self, other: U32x4) -> U32x4 {
        U32x4([
            self[0] | other[0],
            self[1] | other[1],
            self[2] | other[2],
            self[3] | other[3],
        ])
    }
}

impl BitXor<U32x4> for U32x4 {
    type Output = U32x4;
    #[inline]
    fn bitxor(self, other: U32x4) -> U32x4 {
        U32x4([
            self[0] ^ other[0],
            self[1] ^ other[1],
            self[2] ^ other[2],
            self[3] ^ other[3],
        ])
    }
}
