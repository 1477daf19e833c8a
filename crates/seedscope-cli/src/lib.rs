//! Library side of the `seedscope` binary: configuration, logging and
//! terminal presentation.

pub mod config;
pub mod interactive;
pub mod logging;
pub mod render;
