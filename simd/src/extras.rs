// shadevec/simd/src/extras.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::default::F32x4;

impl F32x4 {
    // Constructors

    #[inline]
    pub fn from_slice(slice: &[f32]) -> F32x4 {
        F32x4::new(slice[0], slice[1], slice[2], slice[3])
    }

    // Lanes by position name. These back every lane naming scheme built on top of `F32x4`.

    #[inline]
    pub fn x(self) -> f32 {
        self.as_array()[0]
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.as_array()[1]
    }

    #[inline]
    pub fn z(self) -> f32 {
        self.as_array()[2]
    }

    #[inline]
    pub fn w(self) -> f32 {
        self.as_array()[3]
    }

    #[inline]
    pub fn set_x(&mut self, value: f32) {
        self.as_mut_array()[0] = value
    }

    #[inline]
    pub fn set_y(&mut self, value: f32) {
        self.as_mut_array()[1] = value
    }

    #[inline]
    pub fn set_z(&mut self, value: f32) {
        self.as_mut_array()[2] = value
    }

    #[inline]
    pub fn set_w(&mut self, value: f32) {
        self.as_mut_array()[3] = value
    }

    // Shuffles

    /// Gathers lanes by a permutation code: output lane `i` takes source lane
    /// `(code >> 2 * i) & 3`.
    #[inline]
    pub fn permute(self, code: u8) -> F32x4 {
        let code = code as usize;
        F32x4::new(
            self[code & 3],
            self[(code >> 2) & 3],
            self[(code >> 4) & 3],
            self[(code >> 6) & 3],
        )
    }

    // Reductions

    /// Sums all four lanes and broadcasts the total.
    ///
    /// The additions always happen as `(x + z) + (y + w)`, so the rounding of the result does not
    /// depend on the backend.
    #[inline]
    pub fn horizontal_sum(self) -> F32x4 {
        let pairs = self + self.zwxy();
        pairs + pairs.yxyx()
    }

    // Comparisons

    #[inline]
    pub fn approx_eq(self, other: F32x4, epsilon: f32) -> bool {
        (self - other)
            .abs()
            .packed_gt(F32x4::splat(epsilon))
            .is_all_zeroes()
    }
}
