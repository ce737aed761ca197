// Copyright (c) 2018 The rust-gpio-cdev Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `gpio-rngtest` crate measures GPIO interrupt latency without a
//! reference clock shared between the two ends of the wire.
//!
//! A producer drives an output line from a seeded pseudo-random bit stream,
//! holding each bit for a fixed bit-period. On the input side, a predictor
//! replays the same stream from an identically seeded generator and works
//! out how many bit-periods remain until the line next changes level. The
//! gap between that prediction and the real arrival time of the interrupt
//! is the drift.
//!
//! Opening devices, configuring lines and waiting for events is left to the
//! caller; this crate only keeps the two sides in lock-step.
//!
//! # Examples
//!
//! The producer side, writing one level per bit-period:
//!
//! ```no_run
//! use gpio_rngtest::{producer::Level, TestParams};
//!
//! # fn set_line(_: Level) {}
//! let params = TestParams::default();
//! for level in params.producer() {
//!     set_line(level);
//!     std::thread::sleep(params.period());
//! }
//! ```
//!
//! The predictor side, timing each edge against the prediction:
//!
//! ```no_run
//! use gpio_rngtest::{timing::{Drift, Timestamp}, TestParams};
//!
//! # fn wait_for_edge() {}
//! # fn main() -> Result<(), gpio_rngtest::Error> {
//! let params = TestParams::default();
//! let mut predictor = params.predictor();
//! loop {
//!     let before = Timestamp::now()?;
//!     let expected = predictor.predict_next_delay(params.period())?;
//!     wait_for_edge();
//!     let drift = Drift::measure(expected, before, Timestamp::now()?);
//!     println!("event ({drift})");
//! }
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod errors;

pub mod bits;

pub mod params;

pub mod pcg;

pub mod predict;

pub mod producer;

pub mod timing;

pub use errors::{Error, Result};
pub use params::TestParams;
pub use pcg::{Pcg32, WordSource};
pub use predict::TransitionPredictor;
