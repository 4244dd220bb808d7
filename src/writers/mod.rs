pub mod npy_writer;

pub use npy_writer::NpyWriter;
