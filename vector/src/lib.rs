// shadevec/vector/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A four-lane single-precision vector for shading math.
//!
//! `Vec4` keeps its lanes in one SIMD register and exposes them under the positional (`xyzw`),
//! color (`rgba`), and texture-coordinate (`stpq`) names. The `math` module provides the usual
//! GLSL-style elementwise and reduction functions, and the `swizzle` module provides
//! read-only and read-write views through an 8-bit lane permutation code.

#[macro_use]
extern crate log;

pub mod error;
pub mod math;
pub mod swizzle;
pub mod vector;

pub use crate::error::Error;
pub use crate::math::Broadcast;
pub use crate::swizzle::{Permutation, Swizzle, SwizzleMut};
pub use crate::vector::Vec4;
