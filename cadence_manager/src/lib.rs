//! Cadence Manager Library
//!
//! Command plumbing, configuration and console rendering behind the
//! `cadence` binary.

pub mod commands;
pub mod config;
pub mod menu;
pub mod render;
pub mod version;
