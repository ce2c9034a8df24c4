//! The `character-card-png` crate provides a command-line interface
//! for reading and writing character cards embedded in PNG images.
//!
//! This crate is the binary entry point for the `ccpng` tool, and it handles
//! argument parsing, command execution, and file handling. The codec itself
//! lives in [`libccpng`].

#![doc = include_str!("../README.md")]
pub mod cli;
pub mod command;
mod utils;
