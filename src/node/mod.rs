pub mod error;
pub mod region;

pub use region::{Containment, Quadrant, Region};

/// An opaque RGB color. Alpha never reaches the tree.
pub type Color = image::Rgb<u8>;

/// Color of every node before any pixel has been inserted beneath it.
pub const WHITE: Color = image::Rgb([255, 255, 255]);

/// Position of a node in the arena of a `Quadtree`.
pub type NodeIndex = u32;

/// Whether a node accumulates pixels itself or delegates to four children.
///
/// Children are indexed by `Quadrant::index`, so iterating them follows
/// `Quadrant::ALL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Leaf {
		pixel_count: u32,
		/// Per-channel sums of every inserted pixel, for an exact mean.
		sums: [u64; 3],
	},
	Internal {
		children: [NodeIndex; 4],
	},
}

/// Node in a quadtree of average colors.
///
/// It must always contain a color, such that drawing can stop at any
/// level and give a meaningful preview of the area below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	pub region: Region,
	pub color: Color,
	pub kind: NodeKind,
}

impl Node {
	/// A leaf with no pixels yet, colored with the white sentinel.
	pub fn leaf(region: Region) -> Self {
		Node {
			region,
			color: WHITE,
			kind: NodeKind::Leaf { pixel_count: 0, sums: [0; 3] },
		}
	}

	pub fn is_leaf(&self) -> bool {
		match self.kind {
			NodeKind::Leaf { .. } => true,
			NodeKind::Internal { .. } => false,
		}
	}

	pub fn children(&self) -> Option<&[NodeIndex; 4]> {
		match self.kind {
			NodeKind::Leaf { .. } => None,
			NodeKind::Internal { ref children } => Some(children),
		}
	}

	/// The child covering `quadrant`; `None` for leaves.
	pub fn child(&self, quadrant: Quadrant) -> Option<NodeIndex> {
		self.children().map(|children| children[quadrant.index()])
	}

	/// Number of pixels accumulated so far; `None` for internal nodes.
	pub fn pixel_count(&self) -> Option<u32> {
		match self.kind {
			NodeKind::Leaf { pixel_count, .. } => Some(pixel_count),
			NodeKind::Internal { .. } => None,
		}
	}

	/// Folds one more pixel into a leaf's running mean.
	///
	/// Returns `false`, changing nothing, if this is an internal node.
	pub fn accumulate(&mut self, sample: Color) -> bool {
		match self.kind {
			NodeKind::Leaf { ref mut pixel_count, ref mut sums } => {
				*pixel_count += 1;
				for (sum, channel) in sums.iter_mut().zip(sample.0.iter()) {
					*sum += *channel as u64;
				}
				let n = *pixel_count as u64;
				self.color = image::Rgb([
					(sums[0] / n) as u8,
					(sums[1] / n) as u8,
					(sums[2] / n) as u8,
				]);
				true
			},
			NodeKind::Internal { .. } => false,
		}
	}
}

/// Unweighted mean of four colors, truncated per channel.
pub fn mean_color(colors: [Color; 4]) -> Color {
	let mut sums = [0u16; 3];
	for color in colors.iter() {
		for (sum, channel) in sums.iter_mut().zip(color.0.iter()) {
			*sum += *channel as u16;
		}
	}
	image::Rgb([
		(sums[0] / 4) as u8,
		(sums[1] / 4) as u8,
		(sums[2] / 4) as u8,
	])
}
