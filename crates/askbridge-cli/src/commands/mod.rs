//! CLI commands

pub mod register;
pub mod serve;
pub mod tools;
