pub mod pipeline;
pub mod raster;
