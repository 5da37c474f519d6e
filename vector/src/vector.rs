// shadevec/vector/src/vector.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The four-lane vector type.

use crate::error::Error;
use crate::swizzle::{Permutation, Swizzle, SwizzleMut};
use bytemuck::{Pod, Zeroable};
use shadevec_simd::default::F32x4;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub};
use std::ops::SubAssign;

/// Four single-precision lanes in one SIMD register.
///
/// The lanes are laid out x, y, z, w in memory. They can be reached by position (`x`, `y`, `z`,
/// `w`), as a color (`r`, `g`, `b`, `a`) or as texture coordinates (`s`, `t`, `p`, `q`); all
/// three sets of names refer to the same storage.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
#[repr(transparent)]
pub struct Vec4(pub F32x4);

// Every bit pattern is a valid `F32x4`, and `F32x4` has no padding.
unsafe impl Zeroable for Vec4 {}
unsafe impl Pod for Vec4 {}

macro_rules! lane_accessors {
    ($($index:expr => $get:ident, $get_mut:ident, $set:ident via $lane:ident, $set_lane:ident;)+) => {
        $(
            #[inline]
            pub fn $get(self) -> f32 {
                self.0.$lane()
            }

            #[inline]
            pub fn $get_mut(&mut self) -> &mut f32 {
                &mut self.0[$index]
            }

            #[inline]
            pub fn $set(&mut self, value: f32) {
                self.0.$set_lane(value)
            }
        )+
    }
}

impl Vec4 {
    // Constructors

    #[inline]
    pub fn zero() -> Vec4 {
        Vec4(F32x4::default())
    }

    #[inline]
    pub fn splat(value: f32) -> Vec4 {
        Vec4(F32x4::splat(value))
    }

    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
        Vec4(F32x4::new(x, y, z, w))
    }

    /// Loads four consecutive floats in x, y, z, w order.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of four `f32` values. It need not be aligned.
    #[inline]
    pub unsafe fn from_ptr(ptr: *const f32) -> Vec4 {
        Vec4(F32x4::load_unaligned(ptr))
    }

    /// Copies the first four floats of `slice`. Panics if it has fewer than four.
    #[inline]
    pub fn from_slice(slice: &[f32]) -> Vec4 {
        Vec4(F32x4::from_slice(slice))
    }

    // Raw access

    #[inline]
    pub fn as_ptr(&self) -> *const f32 {
        self.as_array().as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut f32 {
        self.as_mut_array().as_mut_ptr()
    }

    #[inline]
    pub fn as_array(&self) -> &[f32; 4] {
        self.0.as_array()
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [f32; 4] {
        self.0.as_mut_array()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        self.0.to_array()
    }

    /// Views packed vectors as a flat float buffer without copying.
    #[inline]
    pub fn as_floats(vectors: &[Vec4]) -> &[f32] {
        bytemuck::cast_slice(vectors)
    }

    /// Views a flat float buffer as packed vectors without copying.
    ///
    /// Fails if the length is not a multiple of four or the buffer is not aligned for `Vec4`.
    pub fn try_from_floats(floats: &[f32]) -> Result<&[Vec4], Error> {
        bytemuck::try_cast_slice(floats).map_err(|err| {
            trace!("rejected {} floats at {:p} as vectors: {}", floats.len(), floats.as_ptr(), err);
            Error::from(err)
        })
    }

    // Named lanes

    lane_accessors! {
        0 => x, x_mut, set_x via x, set_x;
        1 => y, y_mut, set_y via y, set_y;
        2 => z, z_mut, set_z via z, set_z;
        3 => w, w_mut, set_w via w, set_w;
        0 => r, r_mut, set_r via x, set_x;
        1 => g, g_mut, set_g via y, set_y;
        2 => b, b_mut, set_b via z, set_z;
        3 => a, a_mut, set_a via w, set_w;
        0 => s, s_mut, set_s via x, set_x;
        1 => t, t_mut, set_t via y, set_y;
        2 => p, p_mut, set_p via z, set_z;
        3 => q, q_mut, set_q via w, set_w;
    }

    // Swizzles

    /// Returns a read-only view of this vector's lanes reordered by `CODE`.
    #[inline]
    pub fn swizzle<const CODE: u8>(self) -> Swizzle<CODE> {
        Swizzle::new(self)
    }

    /// Returns a view that reads and writes this vector's lanes through `CODE`.
    #[inline]
    pub fn swizzle_mut<const CODE: u8>(&mut self) -> SwizzleMut<'_, CODE> {
        SwizzleMut::new(self)
    }

    #[inline]
    pub fn permute(self, permutation: Permutation) -> Vec4 {
        permutation.permute(self)
    }
}

impl From<F32x4> for Vec4 {
    #[inline]
    fn from(register: F32x4) -> Vec4 {
        Vec4(register)
    }
}

impl From<[f32; 4]> for Vec4 {
    #[inline]
    fn from(lanes: [f32; 4]) -> Vec4 {
        Vec4::new(lanes[0], lanes[1], lanes[2], lanes[3])
    }
}

impl From<(f32, f32, f32, f32)> for Vec4 {
    #[inline]
    fn from((x, y, z, w): (f32, f32, f32, f32)) -> Vec4 {
        Vec4::new(x, y, z, w)
    }
}

impl From<Vec4> for [f32; 4] {
    #[inline]
    fn from(vector: Vec4) -> [f32; 4] {
        vector.to_array()
    }
}

impl AsRef<[f32; 4]> for Vec4 {
    #[inline]
    fn as_ref(&self) -> &[f32; 4] {
        self.as_array()
    }
}

impl AsMut<[f32; 4]> for Vec4 {
    #[inline]
    fn as_mut(&mut self) -> &mut [f32; 4] {
        self.as_mut_array()
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vec4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.0[index]
    }
}

// Arithmetic. Every operator comes in vector-vector, vector-scalar and scalar-vector forms, plus
// compound assignment with either a vector or a scalar on the right.

macro_rules! impl_arithmetic {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident) => {
        impl $op<Vec4> for Vec4 {
            type Output = Vec4;
            #[inline]
            fn $method(self, other: Vec4) -> Vec4 {
                Vec4(self.0.$method(other.0))
            }
        }

        impl $op<f32> for Vec4 {
            type Output = Vec4;
            #[inline]
            fn $method(self, other: f32) -> Vec4 {
                Vec4(self.0.$method(F32x4::splat(other)))
            }
        }

        impl $op<Vec4> for f32 {
            type Output = Vec4;
            #[inline]
            fn $method(self, other: Vec4) -> Vec4 {
                Vec4(F32x4::splat(self).$method(other.0))
            }
        }

        impl $op_assign<Vec4> for Vec4 {
            #[inline]
            fn $method_assign(&mut self, other: Vec4) {
                self.0.$method_assign(other.0)
            }
        }

        impl $op_assign<f32> for Vec4 {
            #[inline]
            fn $method_assign(&mut self, other: f32) {
                self.0.$method_assign(F32x4::splat(other))
            }
        }
    };
}

impl_arithmetic!(Add, add, AddAssign, add_assign);
impl_arithmetic!(Sub, sub, SubAssign, sub_assign);
impl_arithmetic!(Mul, mul, MulAssign, mul_assign);
impl_arithmetic!(Div, div, DivAssign, div_assign);

impl Neg for Vec4 {
    type Output = Vec4;
    /// Flips the sign bit of every lane, so zeroes and NaNs change sign too.
    #[inline]
    fn neg(self) -> Vec4 {
        Vec4(-self.0)
    }
}
