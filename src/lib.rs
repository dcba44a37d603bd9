#![allow(clippy::let_and_return)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate log;

mod app;
pub mod library;

#[cfg(test)]
mod test;

pub use app::{generate_shell_completions, run_app};
