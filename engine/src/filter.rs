use crate::api::{FilterLevel, NoiseMapFilter, PostProcess};

/// Every cell gets `value`; the source module is never sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantFilter {
    pub value: f32,
}

impl NoiseMapFilter for ConstantFilter {
    fn level(&self, _x: usize, _y: usize) -> FilterLevel<'_> { FilterLevel::Constant(self.value) }
}

/// Samples only inside a rectangle of cells, writes `outside` elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectFilter {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub outside: f32,
}

impl RectFilter {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x - self.x < self.width && y - self.y < self.height
    }
}

impl NoiseMapFilter for RectFilter {
    fn level(&self, x: usize, y: usize) -> FilterLevel<'_> {
        if self.contains(x, y) { FilterLevel::Source } else { FilterLevel::Constant(self.outside) }
    }
}

/// Clamps every sample into `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampFilter {
    pub min: f32,
    pub max: f32,
}

impl PostProcess for ClampFilter {
    fn apply(&self, _x: usize, _y: usize, value: f32) -> f32 { value.clamp(self.min, self.max) }
}

impl NoiseMapFilter for ClampFilter {
    fn level(&self, _x: usize, _y: usize) -> FilterLevel<'_> { FilterLevel::Filter(self) }
}

/// Runs every sample through a post-process, e.g. a closure
/// `|x, y, v| ...`.
#[derive(Debug, Clone, Copy)]
pub struct PostFilter<P>(pub P);

impl<P: PostProcess> NoiseMapFilter for PostFilter<P> {
    fn level(&self, _x: usize, _y: usize) -> FilterLevel<'_> { FilterLevel::Filter(&self.0) }
}
