//! Rendering of figures to raster images.

pub mod png;

pub use png::render_png;
