#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter and aggregation pipeline feeding every dashboard view.
//!
//! Everything in this crate is a pure, synchronous transform over an
//! in-memory observation slice: filtering never mutates its input, every
//! aggregate is recomputed fresh per call, and empty input always yields
//! a well-defined empty/zero result instead of an error. Concurrent
//! callers can share these functions freely; there is no hidden state.

pub mod aggregate;
pub mod analysis;
pub mod digest;
pub mod filter;
