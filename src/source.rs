use crate::node::Color;

/// A rectangular grid of pixels a quadtree can be populated from.
pub trait PixelSource {
	/// `(width, height)` in pixels.
	fn dimensions(&self) -> (u32, u32);
	/// Color at column `x`, row `y`; both must be within `dimensions`.
	fn pixel(&self, x: u32, y: u32) -> Color;
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
	fn dimensions(&self) -> (u32, u32) {
		(**self).dimensions()
	}
	fn pixel(&self, x: u32, y: u32) -> Color {
		(**self).pixel(x, y)
	}
}

impl PixelSource for image::RgbImage {
	fn dimensions(&self) -> (u32, u32) {
		image::ImageBuffer::dimensions(self)
	}
	fn pixel(&self, x: u32, y: u32) -> Color {
		*self.get_pixel(x, y)
	}
}

/// Alpha is dropped, not blended.
impl PixelSource for image::RgbaImage {
	fn dimensions(&self) -> (u32, u32) {
		image::ImageBuffer::dimensions(self)
	}
	fn pixel(&self, x: u32, y: u32) -> Color {
		let p = self.get_pixel(x, y).0;
		image::Rgb([p[0], p[1], p[2]])
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn rgba_drops_alpha() {
		let img = image::RgbaImage::from_pixel(3, 3, image::Rgba([10, 20, 30, 0]));
		assert_eq!((3, 3), PixelSource::dimensions(&img));
		assert_eq!(image::Rgb([10, 20, 30]), PixelSource::pixel(&img, 2, 1));
	}

	#[test]
	fn rgb_passthrough() {
		let img = image::RgbImage::from_fn(2, 4, |x, y| image::Rgb([x as u8, y as u8, 0]));
		let source: &dyn PixelSource = &img;
		assert_eq!((2, 4), source.dimensions());
		assert_eq!(image::Rgb([1, 3, 0]), source.pixel(1, 3));
	}
}
