//! Main module for f2x front end functionality

pub mod ast;
pub mod diagnostics;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod testing;
pub mod transforms;
