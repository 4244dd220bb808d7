pub mod geotiff;

pub use geotiff::GeoTiffReader;
