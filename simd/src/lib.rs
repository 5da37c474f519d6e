// shadevec/simd/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A minimal four-lane SIMD abstraction for shading math.
//!
//! Two backends are provided: `scalar`, which works everywhere, and `x86`, which uses SSE2
//! and is only compiled on x86-64. `default` names the one selected for this build; enable
//! the `no-simd` feature to force the scalar backend.
//!
//! Both backends produce bit-identical lane values for every operation except the choice of
//! NaN in `min` and `max`.

#[cfg(any(feature = "no-simd", not(target_arch = "x86_64")))]
pub use crate::scalar as default;
#[cfg(all(not(feature = "no-simd"), target_arch = "x86_64"))]
pub use crate::x86 as default;

pub mod scalar;
#[cfg(target_arch = "x86_64")]
pub mod x86;
mod extras;

/// The IEEE-754 sign bit of a single-precision float.
pub const SIGN_BIT: u32 = 0x8000_0000;
