//! Internal utilities for the sodix library
//!
//! Not part of the public API surface; other sodix crates depend on these
//! helpers for comparisons and counters that must not branch on secret data.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod constant_time;

pub use constant_time::{ct_eq, increment_le, is_zero, xor_in_place};
