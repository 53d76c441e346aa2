//! YAML output for property trees.

mod writer;

pub use writer::{generate_yaml, save_yaml};
