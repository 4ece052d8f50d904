//! Core types and errors shared by the commands.

mod errors;

pub use errors::*;
