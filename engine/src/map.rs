use crate::api::NoiseRaster;

/// Row-major grid of noise values.
///
/// Reads outside the grid return the border value, writes outside the grid
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoiseMap {
    width: usize,
    height: usize,
    border_value: f32,
    values: Vec<f32>,
}

impl NoiseMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, border_value: 0.0, values: vec![0.0; width * height] }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn border_value(&self) -> f32 { self.border_value }
    pub fn set_border_value(&mut self, value: f32) { self.border_value = value; }

    pub fn get_value(&self, x: i32, y: i32) -> f32 {
        match self.index(x, y) {
            Some(idx) => self.values[idx],
            None => self.border_value,
        }
    }

    pub fn clear(&mut self, value: f32) {
        self.values.iter_mut().for_each(|v| *v = value);
    }

    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height { return None; }
        let start = y * self.width;
        Some(&self.values[start..start + self.width])
    }

    pub fn values(&self) -> &[f32] { &self.values }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height { return None; }
        Some(y * self.width + x)
    }
}

impl NoiseRaster for NoiseMap {
    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.values.clear();
        self.values.resize(width * height, 0.0);
    }

    fn set_value(&mut self, x: usize, y: usize, value: f32) {
        if x < self.width && y < self.height {
            self.values[y * self.width + x] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_value_outside_grid() {
        let mut map = NoiseMap::new(3, 2);
        map.set_border_value(-4.0);
        map.set_value(2, 1, 1.5);
        assert_eq!(map.get_value(2, 1), 1.5);
        assert_eq!(map.get_value(3, 1), -4.0);
        assert_eq!(map.get_value(-1, 0), -4.0);
        assert_eq!(map.get_value(0, 2), -4.0);
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut map = NoiseMap::new(2, 2);
        map.set_value(2, 0, 9.0);
        map.set_value(0, 5, 9.0);
        assert!(map.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn resize_discards_contents() {
        let mut map = NoiseMap::new(2, 2);
        map.clear(3.0);
        map.resize(3, 1);
        assert_eq!((map.width(), map.height()), (3, 1));
        assert_eq!(map.values(), &[0.0, 0.0, 0.0]);
        assert_eq!(map.row(0), Some(&[0.0, 0.0, 0.0][..]));
        assert_eq!(map.row(1), None);

        map.resize(0, 7);
        assert!(map.is_empty());
    }
}
