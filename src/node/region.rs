/// One of the four equal parts a region is split into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
	TopLeft,
	TopRight,
	BottomLeft,
	BottomRight,
}

impl Quadrant {
	/// Every quadrant, in the order children are stored, visited and drawn.
	pub const ALL: [Quadrant; 4] = [
		Quadrant::TopLeft,
		Quadrant::TopRight,
		Quadrant::BottomLeft,
		Quadrant::BottomRight,
	];

	pub fn index(self) -> usize {
		self as usize
	}
}

/// How a point lying exactly on a region's edge is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
	/// Both edges excluded: `x < px < x + side`.
	Strict,
	/// Lower edge included, upper edge excluded: `x <= px < x + side`.
	HalfOpen,
}

impl Default for Containment {
	fn default() -> Self {
		Containment::Strict
	}
}

/// An axis-aligned square given by its top-left corner and edge length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
	pub x: u32,
	pub y: u32,
	pub side_len: u32,
}

impl Region {
	pub fn new(x: u32, y: u32, side_len: u32) -> Self {
		Region { x, y, side_len }
	}

	/// Splits the region into four equal squares, indexed by `Quadrant::index`.
	///
	/// An odd side length loses its last row and column; callers building
	/// trees validate divisibility beforehand.
	pub fn quadrants(&self) -> [Region; 4] {
		let half = self.side_len / 2;
		[
			Region::new(self.x, self.y, half),
			Region::new(self.x + half, self.y, half),
			Region::new(self.x, self.y + half, half),
			Region::new(self.x + half, self.y + half, half),
		]
	}

	pub fn quadrant(&self, quadrant: Quadrant) -> Region {
		self.quadrants()[quadrant.index()]
	}

	pub fn contains(&self, px: f64, py: f64, containment: Containment) -> bool {
		let (x0, y0) = (self.x as f64, self.y as f64);
		let (x1, y1) = (x0 + self.side_len as f64, y0 + self.side_len as f64);
		match containment {
			Containment::Strict => x0 < px && px < x1 && y0 < py && py < y1,
			Containment::HalfOpen => x0 <= px && px < x1 && y0 <= py && py < y1,
		}
	}

	pub fn center(&self) -> (f64, f64) {
		let half = self.side_len as f64 / 2.;
		(self.x as f64 + half, self.y as f64 + half)
	}

	pub fn area(&self) -> u64 {
		self.side_len as u64 * self.side_len as u64
	}
}
