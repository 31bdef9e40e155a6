// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for unit tests.
//!
//! Positions, thresholds and volumes are floats, so tests compare them with
//! an absolute tolerance instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;
