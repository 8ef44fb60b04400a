//! Turtle script scanner and interpreter.

pub mod command;
pub mod error;
pub mod interpreter;
pub mod scanner;
pub mod token;
pub mod types;

pub use interpreter::Interpreter;
