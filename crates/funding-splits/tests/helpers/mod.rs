//! Shared fixtures for the integration tests
//!
//! Each test binary pulls in the whole module, so not every helper is used
//! everywhere.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
