//! `marquee-validate` — request validation building blocks.
//!
//! This crate contains **pure** validation primitives (no HTTP, no storage):
//! a per-field error accumulator plus a few reusable predicates.

pub mod validator;

pub use validator::{EMAIL_RX, Validator, in_list, matches, unique};
