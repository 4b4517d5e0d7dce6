use crate::node::{Color, Region, WHITE};

/// Anything a quadtree can be drawn onto.
///
/// The tree only asks for a region to be filled with a color; whether
/// that becomes a square, a disc or a log line is up to the implementor.
pub trait Surface {
	fn fill(&mut self, region: Region, color: Color);
}

impl<S: Surface + ?Sized> Surface for &mut S {
	fn fill(&mut self, region: Region, color: Color) {
		(**self).fill(region, color)
	}
}

/// A surface that only remembers the fills it was asked for, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSurface {
	pub commands: Vec<(Region, Color)>,
}

impl Surface for RecordingSurface {
	fn fill(&mut self, region: Region, color: Color) {
		self.commands.push((region, color));
	}
}

/// How an `ImageSurface` paints a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
	/// The whole square.
	Square,
	/// A disc centered in the square, with a radius of 40% of its side.
	Circle,
}

impl Default for Shape {
	fn default() -> Self {
		Shape::Square
	}
}

/// Rasterizes fills into an RGB image buffer.
///
/// Fills are clipped to the image; anything outside is silently dropped.
#[derive(Clone, Debug)]
pub struct ImageSurface {
	img: image::RgbImage,
	shape: Shape,
}

impl ImageSurface {
	/// A white canvas of the given size.
	pub fn new(width: u32, height: u32, shape: Shape) -> Self {
		ImageSurface {
			img: image::RgbImage::from_pixel(width, height, WHITE),
			shape,
		}
	}

	/// Paints the whole canvas white again, e.g. between frames.
	pub fn clear(&mut self) {
		for pixel in self.img.pixels_mut() {
			*pixel = WHITE;
		}
	}

	pub fn image(&self) -> &image::RgbImage {
		&self.img
	}

	pub fn into_image(self) -> image::RgbImage {
		self.img
	}

	fn fill_circle(&mut self, region: Region, color: Color) {
		let (cx, cy) = region.center();
		let r = region.side_len as f64 * 0.4;
		let x_end = (region.x as u64 + region.side_len as u64).min(self.img.width() as u64) as u32;
		let y_end = (region.y as u64 + region.side_len as u64).min(self.img.height() as u64) as u32;
		for y in region.y..y_end {
			for x in region.x..x_end {
				// Sample at pixel centers
				let (dx, dy) = (x as f64 + 0.5 - cx, y as f64 + 0.5 - cy);
				if dx * dx + dy * dy <= r * r {
					self.img.put_pixel(x, y, color);
				}
			}
		}
	}
}

impl Surface for ImageSurface {
	fn fill(&mut self, region: Region, color: Color) {
		match self.shape {
			Shape::Square => image::imageops::replace(
				&mut self.img,
				&image::RgbImage::from_pixel(region.side_len, region.side_len, color),
				region.x,
				region.y,
			),
			Shape::Circle => self.fill_circle(region, color),
		}
	}
}
