// shadevec/vector/src/swizzle.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lane permutations and the views built on them.
//!
//! A permutation code packs four 2-bit source-lane selectors into a byte, lowest bits first:
//! output lane `i` reads source lane `(code >> 2 * i) & 3`. Reading through a code gathers
//! lanes; writing through it scatters them back to the lanes they were read from.
//!
//! When a code names the same source lane more than once, a write keeps the value from the
//! first (lowest) output position that names it and drops the rest. A code such as `YXYX`
//! therefore writes like a two-component `yx` swizzle:
//!
//! ```
//! use shadevec_vector::{swizzle, Vec4};
//!
//! let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
//! v.swizzle_mut::<{ swizzle::YXYX }>().write((10.0, 20.0, 30.0, 40.0));
//! assert_eq!(v, Vec4::new(20.0, 10.0, 3.0, 4.0));
//! ```

use crate::error::Error;
use crate::vector::Vec4;

/// Lane indices under each naming convention, for use with `code`.
pub mod lane {
    pub const X: u8 = 0;
    pub const Y: u8 = 1;
    pub const Z: u8 = 2;
    pub const W: u8 = 3;

    pub const R: u8 = 0;
    pub const G: u8 = 1;
    pub const B: u8 = 2;
    pub const A: u8 = 3;

    pub const S: u8 = 0;
    pub const T: u8 = 1;
    pub const P: u8 = 2;
    pub const Q: u8 = 3;
}

/// Packs four source lanes, one per output position, into a permutation code.
///
/// In a const context an out-of-range lane fails to compile:
/// `v.swizzle::<{ swizzle::code(lane::W, lane::Z, lane::Y, lane::X) }>()`.
pub const fn code(x: u8, y: u8, z: u8, w: u8) -> u8 {
    assert!(x < 4 && y < 4 && z < 4 && w < 4, "swizzle lanes must be in 0..4");
    x | (y << 2) | (z << 4) | (w << 6)
}

pub const XYZW: u8 = code(0, 1, 2, 3);
pub const WZYX: u8 = code(3, 2, 1, 0);
pub const YXZW: u8 = code(1, 0, 2, 3);
pub const ZWXY: u8 = code(2, 3, 0, 1);
pub const YXYX: u8 = code(1, 0, 1, 0);

/// A permutation code checked to be well formed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Permutation(u8);

impl Permutation {
    pub const IDENTITY: Permutation = Permutation(XYZW);
    pub const REVERSE: Permutation = Permutation(WZYX);

    /// Every byte is a valid code, so this cannot fail.
    #[inline]
    pub const fn new(code: u8) -> Permutation {
        Permutation(code)
    }

    /// Builds a permutation from lane indices known only at runtime.
    pub fn from_lanes(x: u8, y: u8, z: u8, w: u8) -> Result<Permutation, Error> {
        for (position, &lane) in [x, y, z, w].iter().enumerate() {
            if lane > 3 {
                return Err(Error::LaneOutOfRange { position, lane });
            }
        }
        Ok(Permutation(code(x, y, z, w)))
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// The source lane that feeds output `position`, which must be in `0..4`.
    #[inline]
    pub const fn lane(self, position: usize) -> usize {
        ((self.0 >> (2 * position)) & 3) as usize
    }

    /// A bit mask of the source lanes this code reads from.
    pub const fn selected_lanes(self) -> u8 {
        let mut mask = 0;
        let mut position = 0;
        while position < 4 {
            mask |= 1 << self.lane(position);
            position += 1;
        }
        mask
    }

    /// True if every source lane is named exactly once.
    #[inline]
    pub const fn is_injective(self) -> bool {
        self.selected_lanes() == 0b1111
    }

    #[inline]
    pub fn permute(self, source: Vec4) -> Vec4 {
        Vec4(source.0.permute(self.0))
    }

    /// Writes `value` back into `target` through the inverse of this permutation.
    ///
    /// Lanes this code does not name are left alone. A lane named more than once receives the
    /// value from the lowest output position naming it.
    pub fn scatter(self, target: &mut Vec4, value: Vec4) {
        let mut written = 0u8;
        for position in 0..4 {
            let lane = self.lane(position);
            if written & (1 << lane) != 0 {
                continue;
            }
            written |= 1 << lane;
            target[lane] = value[position];
        }
    }
}

/// A read-only view of a vector through a permutation code.
///
/// The view holds its own copy of the source lanes, so it can be taken from a temporary.
#[derive(Clone, Copy, Debug)]
pub struct Swizzle<const CODE: u8> {
    source: Vec4,
}

impl<const CODE: u8> Swizzle<CODE> {
    pub const PERMUTATION: Permutation = Permutation::new(CODE);

    #[inline]
    pub fn new(source: Vec4) -> Swizzle<CODE> {
        Swizzle { source }
    }

    #[inline]
    pub fn read(self) -> Vec4 {
        Self::PERMUTATION.permute(self.source)
    }
}

impl<const CODE: u8> From<Swizzle<CODE>> for Vec4 {
    #[inline]
    fn from(swizzle: Swizzle<CODE>) -> Vec4 {
        swizzle.read()
    }
}

/// A view that reads and writes a borrowed vector through a permutation code.
#[derive(Debug)]
pub struct SwizzleMut<'a, const CODE: u8> {
    target: &'a mut Vec4,
}

impl<'a, const CODE: u8> SwizzleMut<'a, CODE> {
    pub const PERMUTATION: Permutation = Permutation::new(CODE);

    #[inline]
    pub fn new(target: &'a mut Vec4) -> SwizzleMut<'a, CODE> {
        SwizzleMut { target }
    }

    /// Gathers the selected lanes. Never modifies the target.
    #[inline]
    pub fn read(&self) -> Vec4 {
        Self::PERMUTATION.permute(*self.target)
    }

    /// Scatters `value` into the target's lanes through the inverse permutation.
    pub fn write<V>(&mut self, value: V)
    where
        V: Into<Vec4>,
    {
        if !Self::PERMUTATION.is_injective() {
            debug!(
                "writing through swizzle {:#04x}, which names lanes {:#06b} only",
                CODE,
                Self::PERMUTATION.selected_lanes()
            );
        }
        Self::PERMUTATION.scatter(self.target, value.into())
    }

    /// Stores `value` into every lane the code names, leaving the other lanes alone.
    #[inline]
    pub fn write_splat(&mut self, value: f32) {
        self.write(Vec4::splat(value))
    }
}

impl<'a, const CODE: u8> From<SwizzleMut<'a, CODE>> for Vec4 {
    #[inline]
    fn from(swizzle: SwizzleMut<'a, CODE>) -> Vec4 {
        swizzle.read()
    }
}
