use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::*;
use crate::config::BuilderConfig;
use crate::model::Cylinder;

/// Region of the cylinder surface to sample: angles in degrees, heights in
/// linear units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderBounds {
    pub lower_angle: f64,
    pub upper_angle: f64,
    pub lower_height: f64,
    pub upper_height: f64,
}

impl Default for CylinderBounds {
    fn default() -> Self {
        Self { lower_angle: -180.0, upper_angle: 180.0, lower_height: -10.0, upper_height: 10.0 }
    }
}

impl CylinderBounds {
    pub fn new(lower_angle: f64, upper_angle: f64, lower_height: f64, upper_height: f64) -> Result<Self> {
        let bounds = Self { lower_angle, upper_angle, lower_height, upper_height };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Both ranges must be non-empty. NaN never passes.
    pub fn validate(&self) -> Result<()> {
        if self.lower_angle < self.upper_angle && self.lower_height < self.upper_height {
            return Ok(());
        }
        Err(Error::InvalidBounds {
            lower_angle: self.lower_angle,
            upper_angle: self.upper_angle,
            lower_height: self.lower_height,
            upper_height: self.upper_height,
        })
    }

    pub fn lower_angle(&self) -> f64 { self.lower_angle }
    pub fn upper_angle(&self) -> f64 { self.upper_angle }
    pub fn lower_height(&self) -> f64 { self.lower_height }
    pub fn upper_height(&self) -> f64 { self.upper_height }

    pub fn angle_extent(&self) -> f64 { self.upper_angle - self.lower_angle }
    pub fn height_extent(&self) -> f64 { self.upper_height - self.lower_height }
}

/// Builds a noise map from the surface of a cylinder.
///
/// The map's x axis runs along the angle range and its y axis along the
/// height range. Source module, destination map, filter and callback are
/// borrowed for the builder's lifetime.
pub struct CylinderNoiseMapBuilder<'a> {
    bounds: CylinderBounds,
    width: i32,
    height: i32,
    source: Option<&'a dyn NoiseModule>,
    dest: Option<&'a mut dyn NoiseRaster>,
    filter: Option<&'a dyn NoiseMapFilter>,
    callback: Option<Box<dyn FnMut(usize) + 'a>>,
    parallel: bool,
}

impl Default for CylinderNoiseMapBuilder<'_> {
    fn default() -> Self { Self::new() }
}

impl<'a> CylinderNoiseMapBuilder<'a> {
    pub fn new() -> Self {
        Self {
            bounds: CylinderBounds::default(),
            width: 0,
            height: 0,
            source: None,
            dest: None,
            filter: None,
            callback: None,
            parallel: false,
        }
    }

    /// Takes bounds and size from a config as is; they are checked by `build`.
    pub fn from_config(config: &BuilderConfig) -> Self {
        let mut builder = Self::new();
        builder.bounds = config.bounds;
        builder.set_dest_size(config.width, config.height);
        builder.parallel = config.parallel;
        builder
    }

    /// Replaces all four bounds, or none of them on error.
    pub fn set_bounds(&mut self, lower_angle: f64, upper_angle: f64, lower_height: f64, upper_height: f64) -> Result<()> {
        self.bounds = CylinderBounds::new(lower_angle, upper_angle, lower_height, upper_height)?;
        Ok(())
    }

    pub fn bounds(&self) -> &CylinderBounds { &self.bounds }
    pub fn lower_angle(&self) -> f64 { self.bounds.lower_angle }
    pub fn upper_angle(&self) -> f64 { self.bounds.upper_angle }
    pub fn lower_height(&self) -> f64 { self.bounds.lower_height }
    pub fn upper_height(&self) -> f64 { self.bounds.upper_height }

    pub fn set_dest_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn dest_width(&self) -> i32 { self.width }
    pub fn dest_height(&self) -> i32 { self.height }

    pub fn set_source_module(&mut self, module: &'a dyn NoiseModule) { self.source = Some(module); }
    pub fn set_dest_noise_map(&mut self, dest: &'a mut dyn NoiseRaster) { self.dest = Some(dest); }

    pub fn set_filter(&mut self, filter: &'a dyn NoiseMapFilter) { self.filter = Some(filter); }
    pub fn clear_filter(&mut self) { self.filter = None; }

    /// Called with each row index once the row is written.
    pub fn set_callback(&mut self, callback: impl FnMut(usize) + 'a) { self.callback = Some(Box::new(callback)); }
    pub fn clear_callback(&mut self) { self.callback = None; }

    /// Selects what [`run`](Self::run) does.
    pub fn set_parallel(&mut self, parallel: bool) { self.parallel = parallel; }
    pub fn is_parallel(&self) -> bool { self.parallel }

    /// [`build_parallel`](Self::build_parallel) when the builder is set to
    /// parallel, [`build`](Self::build) otherwise.
    pub fn run(&mut self) -> Result<()> {
        if self.parallel { self.build_parallel() } else { self.build() }
    }

    fn prepare(&self) -> Result<(usize, usize, &'a dyn NoiseModule)> {
        self.bounds.validate()?;
        if self.width < 0 || self.height < 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        let source = self.source.ok_or(Error::MissingSourceModule)?;
        if self.dest.is_none() {
            return Err(Error::MissingOutputRaster);
        }
        Ok((self.width as usize, self.height as usize, source))
    }

    fn prepare_logged(&self) -> Result<(usize, usize, &'a dyn NoiseModule)> {
        self.prepare().map_err(|e| {
            warn!(error = %e, "cylinder noise map build rejected");
            e
        })
    }

    pub fn build(&mut self) -> Result<()> {
        let (width, height, source) = self.prepare_logged()?;
        let dest = self.dest.as_deref_mut().ok_or(Error::MissingOutputRaster)?;
        debug!(width, height, bounds = ?self.bounds, "building cylinder noise map");

        dest.resize(width, height);
        let cylinder = Cylinder::new(source);
        let (x_delta, y_delta) = deltas(&self.bounds, width, height);

        let mut cur_height = self.bounds.lower_height;
        for y in 0..height {
            let mut cur_angle = self.bounds.lower_angle;
            for x in 0..width {
                let value = sample_cell(&cylinder, self.filter, x, y, cur_angle, cur_height);
                dest.set_value(x, y, value);
                cur_angle += x_delta;
            }
            cur_height += y_delta;
            if let Some(cb) = self.callback.as_mut() {
                cb(y);
            }
        }

        debug!(width, height, "cylinder noise map built");
        Ok(())
    }

    /// Same result as [`build`](Self::build), with rows sampled on the rayon
    /// pool. Rows are written and reported in order on the calling thread
    /// once sampling has finished.
    ///
    /// Every sampled row is held in memory until then, so peak memory is
    /// about twice the size of the map.
    pub fn build_parallel(&mut self) -> Result<()> {
        let (width, height, source) = self.prepare_logged()?;
        let dest = self.dest.as_deref_mut().ok_or(Error::MissingOutputRaster)?;
        debug!(width, height, bounds = ?self.bounds, threads = rayon::current_num_threads(), "building cylinder noise map in parallel");

        dest.resize(width, height);
        let cylinder = Cylinder::new(source);
        let (x_delta, y_delta) = deltas(&self.bounds, width, height);

        // Heights accumulate the same way as in the sequential loop.
        let mut heights = Vec::with_capacity(height);
        let mut cur_height = self.bounds.lower_height;
        for _ in 0..height {
            heights.push(cur_height);
            cur_height += y_delta;
        }

        let filter = self.filter;
        let lower_angle = self.bounds.lower_angle;
        let rows: Vec<Vec<f32>> = heights
            .par_iter()
            .enumerate()
            .map(|(y, &cur_height)| {
                let mut row = Vec::with_capacity(width);
                let mut cur_angle = lower_angle;
                for x in 0..width {
                    row.push(sample_cell(&cylinder, filter, x, y, cur_angle, cur_height));
                    cur_angle += x_delta;
                }
                row
            })
            .collect();

        for (y, row) in rows.into_iter().enumerate() {
            for (x, value) in row.into_iter().enumerate() {
                dest.set_value(x, y, value);
            }
            if let Some(cb) = self.callback.as_mut() {
                cb(y);
            }
        }

        debug!(width, height, "cylinder noise map built");
        Ok(())
    }
}

fn deltas(bounds: &CylinderBounds, width: usize, height: usize) -> (f64, f64) {
    (bounds.angle_extent() / width as f64, bounds.height_extent() / height as f64)
}

#[inline]
fn sample_cell(
    cylinder: &Cylinder<'_, dyn NoiseModule + '_>,
    filter: Option<&dyn NoiseMapFilter>,
    x: usize,
    y: usize,
    angle: f64,
    height: f64,
) -> f32 {
    let level = match filter {
        Some(filter) => filter.level(x, y),
        None => FilterLevel::Source,
    };
    match level {
        FilterLevel::Constant(value) => value,
        FilterLevel::Source => cylinder.get_value(angle, height) as f32,
        FilterLevel::Filter(post) => post.apply(x, y, cylinder.get_value(angle, height) as f32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::NoiseMap;
    use crate::sources::Constant;

    #[test]
    fn default_bounds() {
        let b = CylinderBounds::default();
        assert_eq!((b.lower_angle(), b.upper_angle()), (-180.0, 180.0));
        assert_eq!((b.lower_height(), b.upper_height()), (-10.0, 10.0));
        assert!(b.validate().is_ok());
    }

    #[test]
    fn nan_bounds_are_invalid() {
        assert!(matches!(CylinderBounds::new(f64::NAN, 1.0, 0.0, 1.0), Err(Error::InvalidBounds { .. })));
        assert!(matches!(CylinderBounds::new(0.0, 1.0, 0.0, f64::NAN), Err(Error::InvalidBounds { .. })));
    }

    #[test]
    fn equal_bounds_are_invalid() {
        assert!(CylinderBounds::new(5.0, 5.0, 0.0, 1.0).is_err());
        assert!(CylinderBounds::new(0.0, 1.0, 2.0, 2.0).is_err());
    }

    #[test]
    fn deltas_split_extent_per_cell() {
        let (dx, dy) = deltas(&CylinderBounds::default(), 4, 2);
        assert_eq!(dx, 90.0);
        assert_eq!(dy, 10.0);
    }

    #[test]
    fn preconditions_checked_in_order() {
        let source = Constant(1.0);
        let mut map = NoiseMap::new(1, 1);

        let mut builder = CylinderNoiseMapBuilder::new();
        builder.bounds.upper_angle = -500.0;
        builder.set_dest_size(-1, 4);
        assert!(matches!(builder.build(), Err(Error::InvalidBounds { .. })));

        builder.bounds = CylinderBounds::default();
        assert!(matches!(builder.build(), Err(Error::InvalidDimensions { width: -1, height: 4 })));

        builder.set_dest_size(2, 2);
        assert!(matches!(builder.build(), Err(Error::MissingSourceModule)));

        builder.set_source_module(&source);
        assert!(matches!(builder.build(), Err(Error::MissingOutputRaster)));

        builder.set_dest_noise_map(&mut map);
        assert!(builder.build().is_ok());
        drop(builder);
        assert_eq!(map.values(), &[1.0; 4]);
    }
}
