pub mod batch_converter;
pub mod converter;
pub mod report;

pub use batch_converter::BatchConverter;
pub use converter::{Conversion, ConversionStatus, Converter};
pub use report::{BatchReport, FailureEntry};
