// shadevec/vector/src/error.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors.

use bytemuck::PodCastError;
use std::error;
use std::fmt::{self, Display, Formatter};

/// Errors from the few conversions that take untrusted runtime data.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Error {
    /// A lane selector given to `Permutation::from_lanes` was not in `0..4`.
    LaneOutOfRange {
        /// The output position whose selector was bad.
        position: usize,
        /// The selector itself.
        lane: u8,
    },
    /// A float buffer could not be viewed as vectors.
    ///
    /// The buffer length must be a multiple of four and the buffer must satisfy `Vec4`'s
    /// alignment.
    Cast(PodCastError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Error::LaneOutOfRange { position, lane } => {
                write!(f, "lane selector {} at position {} is not in 0..4", lane, position)
            }
            Error::Cast(err) => write!(f, "cannot view floats as vectors: {}", err),
        }
    }
}

impl error::Error for Error {}

impl From<PodCastError> for Error {
    #[inline]
    fn from(err: PodCastError) -> Error {
        Error::Cast(err)
    }
}
