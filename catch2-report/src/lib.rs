// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read Catch2 XML reporter records in Rust.
//!
//! This crate provides a small element tree ([`Element`]), the record model written by the
//! Catch2 XML reporter ([`TestCase`], [`OverallResults`] and friends), and the [`Reporter`]
//! trait that converts one into the other.

#![warn(missing_docs)]

mod errors;
mod model;
mod node;
mod reporter;

pub use errors::*;
pub use model::*;
pub use node::*;
pub use reporter::*;
