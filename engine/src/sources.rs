use fastnoise_lite::FastNoiseLite;
use noise::NoiseFn;

use crate::api::NoiseModule;

pub use fastnoise_lite::{FractalType, NoiseType};

/// Same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl NoiseModule for Constant {
    fn get_value(&self, _x: f64, _y: f64, _z: f64) -> f64 { self.0 }
}

/// Adapts a 3D function from the `noise` crate, e.g. `noise::Perlin`.
#[derive(Debug, Clone)]
pub struct NoiseFnModule<F>(pub F);

impl<F: NoiseFn<f64, 3> + Send + Sync> NoiseModule for NoiseFnModule<F> {
    fn get_value(&self, x: f64, y: f64, z: f64) -> f64 { self.0.get([x, y, z]) }
}

/// FastNoiseLite generator. Samples are taken in single precision.
pub struct FastNoiseModule {
    noise: FastNoiseLite,
}

impl FastNoiseModule {
    pub fn new(seed: i32, noise_type: NoiseType, frequency: f32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(noise_type));
        noise.set_frequency(Some(frequency));
        Self { noise }
    }

    pub fn with_fractal(mut self, fractal: FractalType, octaves: i32) -> Self {
        self.noise.set_fractal_type(Some(fractal));
        self.noise.set_fractal_octaves(Some(octaves));
        self
    }
}

impl NoiseModule for FastNoiseModule {
    fn get_value(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get_noise_3d(x as f32, y as f32, z as f32) as f64
    }
}

/// `source * scale + bias`
#[derive(Debug, Clone)]
pub struct ScaleBias<M> {
    pub source: M,
    pub scale: f64,
    pub bias: f64,
}

impl<M: NoiseModule> ScaleBias<M> {
    pub fn new(source: M, scale: f64, bias: f64) -> Self { Self { source, scale, bias } }
}

impl<M: NoiseModule> NoiseModule for ScaleBias<M> {
    fn get_value(&self, x: f64, y: f64, z: f64) -> f64 { self.source.get_value(x, y, z) * self.scale + self.bias }
}
