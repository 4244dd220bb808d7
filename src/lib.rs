pub mod cli;
pub mod converters;
pub mod error;
pub mod models;
pub mod readers;
pub mod utils;
pub mod writers;

pub use error::{ConversionError, Result};
