//! Library side of the `sleep-diary` command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
