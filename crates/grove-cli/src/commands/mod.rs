pub mod ast;
pub mod edit;
pub mod generate;
pub mod langs;
pub mod run_common;

#[cfg(test)]
mod edit_tests;
