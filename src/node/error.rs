use thiserror::Error;

/// Reason why a quadtree couldn't be built over a region or image.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
	/// The source's dimensions are not equal; the image is not a square.
	#[error("image must be square, got {width}x{height}")]
	NonSquare { width: u32, height: u32 },
	/// The region or source has no pixels at all.
	#[error("image has no pixels")]
	Empty,
	/// The side length can't be halved `height` times without remainder.
	#[error("side length {side_len} is not divisible by 2^{height}")]
	IndivisibleSide { side_len: u32, height: u32 },
	/// The region's far edges don't fit in pixel coordinates.
	#[error("region at ({x}, {y}) with side {side_len} extends past the coordinate range")]
	OutOfRange { x: u32, y: u32, side_len: u32 },
	/// The tree would have more nodes than a `NodeIndex` can address.
	#[error("height {height} exceeds the maximum of {max}")]
	TooDeep { height: u32, max: u32 },
}

/// Reason why a pixel couldn't be inserted into a quadtree.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InsertError {
	/// No leaf region contains the point, either because it lies outside
	/// the root or on an edge the containment policy excludes.
	#[error("pixel at ({x}, {y}) is outside every leaf")]
	OutOfBounds { x: f64, y: f64 },
}
