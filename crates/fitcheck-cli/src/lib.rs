//! fitcheck CLI: CI-style availability workflows over the mock platform.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
