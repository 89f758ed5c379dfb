use crate::api::NoiseModule;

/// Unit-radius cylinder around the y axis, centred on the origin.
///
/// Maps (angle in degrees, height) to `(cos a, height, sin a)` and samples the
/// wrapped module there.
pub struct Cylinder<'a, M: NoiseModule + ?Sized> {
    module: &'a M,
}

impl<'a, M: NoiseModule + ?Sized> Cylinder<'a, M> {
    pub fn new(module: &'a M) -> Self { Self { module } }

    pub fn module(&self) -> &'a M { self.module }

    pub fn get_value(&self, angle: f64, height: f64) -> f64 {
        let radians = angle.to_radians();
        self.module.get_value(radians.cos(), height, radians.sin())
    }
}
