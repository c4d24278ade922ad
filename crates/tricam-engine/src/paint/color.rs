/// Straight-alpha RGBA color with `f32` components in `[0, 1]`.
///
/// Used as a clear color, so channels are passed to the surface untouched;
/// alpha is not premultiplied.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Dark blue background.
    pub const DARK_BLUE: Color = Color::rgba(0.0, 0.0, 0.4, 0.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_blue_clear_color() {
        let c = Color::DARK_BLUE.to_wgpu();
        assert_eq!((c.r, c.g, c.a), (0.0, 0.0, 0.0));
        assert!((c.b - 0.4).abs() < 1e-6);
    }
}
