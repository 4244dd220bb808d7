pub mod raster;
pub mod stats;

pub use raster::RasterData;
pub use stats::ArrayStats;
