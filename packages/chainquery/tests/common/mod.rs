//! Shared fixtures for chainquery integration tests

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
