pub mod button;
pub mod compose;
pub mod raster;
pub mod resize;
pub mod text;
