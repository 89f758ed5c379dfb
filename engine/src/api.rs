use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bounds: angle [{lower_angle}, {upper_angle}], height [{lower_height}, {upper_height}]")]
    InvalidBounds { lower_angle: f64, upper_angle: f64, lower_height: f64, upper_height: f64 },
    #[error("invalid noise map dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("no source module set")]
    MissingSourceModule,
    #[error("no destination noise map set")]
    MissingOutputRaster,
    #[error("config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("config serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Anything that turns a point in 3D space into a scalar.
pub trait NoiseModule: Send + Sync {
    fn get_value(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<M: NoiseModule + ?Sized> NoiseModule for &M {
    fn get_value(&self, x: f64, y: f64, z: f64) -> f64 { (**self).get_value(x, y, z) }
}

impl<M: NoiseModule + ?Sized> NoiseModule for Box<M> {
    fn get_value(&self, x: f64, y: f64, z: f64) -> f64 { (**self).get_value(x, y, z) }
}

/// Destination grid a builder writes into.
pub trait NoiseRaster {
    /// Replaces the storage; previous values are lost.
    fn resize(&mut self, width: usize, height: usize);
    fn set_value(&mut self, x: usize, y: usize, value: f32);
}

/// Post-processing step for cells classified as [`FilterLevel::Filter`].
pub trait PostProcess: Send + Sync {
    fn apply(&self, x: usize, y: usize, value: f32) -> f32;
}

impl<F: Fn(usize, usize, f32) -> f32 + Send + Sync> PostProcess for F {
    fn apply(&self, x: usize, y: usize, value: f32) -> f32 { self(x, y, value) }
}

/// How a single cell is produced.
#[derive(Clone, Copy)]
pub enum FilterLevel<'a> {
    /// Sample the source module.
    Source,
    /// Write the value as is, the source module is not evaluated.
    Constant(f32),
    /// Sample, then pass the sample through the post-process.
    Filter(&'a dyn PostProcess),
}

impl fmt::Debug for FilterLevel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterLevel::Source => f.write_str("Source"),
            FilterLevel::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            FilterLevel::Filter(_) => f.write_str("Filter(..)"),
        }
    }
}

pub trait NoiseMapFilter: Send + Sync {
    fn level(&self, x: usize, y: usize) -> FilterLevel<'_>;
}
