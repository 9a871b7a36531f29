#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Cross-crate scenarios for schedule construction, queries and
//! serialization.

mod helpers;
mod properties;
mod scenarios;
mod serialization;
mod zones;
