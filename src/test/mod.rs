//! Shared fixtures for the unit tests.

pub(crate) mod factories;
