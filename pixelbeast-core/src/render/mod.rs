pub mod canvas;
pub mod raster;
