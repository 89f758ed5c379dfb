//! Noise maps sampled from the surface of a cylinder.
//!
//! A [`CylinderNoiseMapBuilder`] walks every cell of a [`NoiseRaster`], maps it
//! to an (angle, height) pair inside its [`CylinderBounds`], and evaluates a
//! [`NoiseModule`] at the matching point on a unit cylinder. An optional
//! [`NoiseMapFilter`] can replace or post-process individual cells.

pub mod api;
pub mod config;
pub mod filter;
pub mod map;
pub mod model;
pub mod sampling;
pub mod sources;

pub use api::{Error, FilterLevel, NoiseMapFilter, NoiseModule, NoiseRaster, PostProcess, Result};
pub use config::BuilderConfig;
pub use map::NoiseMap;
pub use model::Cylinder;
pub use sampling::{CylinderBounds, CylinderNoiseMapBuilder};
