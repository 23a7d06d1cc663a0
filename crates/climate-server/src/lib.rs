//! Shared library surface for the climate server and its tests.

pub mod api;
pub mod chat;
pub mod config;
pub mod state;
