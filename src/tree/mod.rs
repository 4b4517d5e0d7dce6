mod draw;
mod populate;
mod reveal;

pub use populate::PopulateReport;
pub use reveal::RevealPolicy;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use tracing::trace_span;

use crate::node::error::ShapeError;
use crate::node::{Color, Containment, Node, NodeIndex, NodeKind, Quadrant, Region};

/// One bit per arena slot; set while the node is collapsed.
type CollapseFlags = BitVec<usize, Lsb0>;

/// Index of the root in every tree's arena.
pub const ROOT: NodeIndex = 0;

/// Deepest tree whose node count still fits in a `NodeIndex`.
pub const MAX_HEIGHT: u32 = 15;

/// Knobs for building and driving a `Quadtree`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
	/// Tree height; `None` picks the deepest height the side length allows.
	pub height: Option<u32>,
	pub containment: Containment,
	pub reveal: RevealPolicy,
}

/// A perfect quadtree of average colors with per-node collapse state.
///
/// Nodes live in one arena in depth-first (tl, tr, bl, br) order, so the
/// root is always at `ROOT`. The shape never changes after `build`; only
/// colors, pixel counts and collapse flags do.
#[derive(Clone, Debug)]
pub struct Quadtree {
	nodes: Vec<Node>,
	collapsed: CollapseFlags,
	height: u32,
	options: Options,
}

/// Total nodes in a perfect quadtree of the given height.
fn node_count(height: u32) -> usize {
	((1usize << (2 * (height + 1))) - 1) / 3
}

impl Quadtree {
	/// Allocates a tree of `height` levels below the root over `region`,
	/// every node collapsed and white.
	///
	/// `options.height` is ignored here; it only matters to `from_source`.
	pub fn build(height: u32, region: Region, options: Options) -> Result<Self, ShapeError> {
		if region.side_len == 0 {
			return Err(ShapeError::Empty);
		}
		if height > MAX_HEIGHT {
			return Err(ShapeError::TooDeep { height, max: MAX_HEIGHT });
		}
		if region.side_len % (1 << height) != 0 {
			return Err(ShapeError::IndivisibleSide { side_len: region.side_len, height });
		}
		if region.x.checked_add(region.side_len).is_none() || region.y.checked_add(region.side_len).is_none() {
			return Err(ShapeError::OutOfRange { x: region.x, y: region.y, side_len: region.side_len });
		}

		let _span = trace_span!("build", height, side_len = region.side_len).entered();
		let capacity = node_count(height);
		let mut tree = Quadtree {
			nodes: Vec::with_capacity(capacity),
			collapsed: CollapseFlags::with_capacity(capacity),
			height,
			options: Options { height: Some(height), ..options },
		};
		tree.allocate(region, height);
		debug_assert_eq!(capacity, tree.nodes.len());
		Ok(tree)
	}

	/// Deepest height whose leaves still have a whole-pixel side, i.e.
	/// the number of times `side_len` can be halved evenly.
	pub fn height_for(side_len: u32) -> u32 {
		side_len.trailing_zeros().min(MAX_HEIGHT)
	}

	fn allocate(&mut self, region: Region, height: u32) -> NodeIndex {
		let index = self.nodes.len() as NodeIndex;
		self.nodes.push(Node::leaf(region));
		self.collapsed.push(true);
		// Recursion
		if height > 0 {
			let mut children = [ROOT; 4];
			for &quadrant in Quadrant::ALL.iter() {
				children[quadrant.index()] = self.allocate(region.quadrant(quadrant), height - 1);
			}
			self.nodes[index as usize].kind = NodeKind::Internal { children };
		}
		index
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn options(&self) -> &Options {
		&self.options
	}

	pub fn region(&self) -> Region {
		self.nodes[ROOT as usize].region
	}

	/// Average color of the whole image.
	pub fn color(&self) -> Color {
		self.nodes[ROOT as usize].color
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, index: NodeIndex) -> Option<&Node> {
		self.nodes.get(index as usize)
	}

	/// Whether the node at `index` is drawn as a single swatch. Unknown
	/// indices report `false`.
	pub fn is_collapsed(&self, index: NodeIndex) -> bool {
		(index as usize) < self.collapsed.len() && self.collapsed[index as usize]
	}

	/// Every node with its index, in arena (depth-first) order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
		self.nodes.iter()
			.enumerate()
			.map(|(index, node)| (index as NodeIndex, node))
	}

	pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
		self.nodes.iter().filter(|n| n.is_leaf())
	}

	/// Number of nodes currently expanded.
	pub fn expanded_count(&self) -> usize {
		self.collapsed.count_zeros()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::node::WHITE;

	use proptest::prelude::*;

	#[test]
	fn node_counts() {
		assert_eq!(1, node_count(0));
		assert_eq!(5, node_count(1));
		assert_eq!(21, node_count(2));
		assert_eq!(85, node_count(3));
	}

	#[test]
	fn fresh_tree() {
		let tree = Quadtree::build(2, Region::new(0, 0, 4), Options::default()).unwrap();
		assert_eq!(21, tree.len());
		assert_eq!(2, tree.height());
		assert_eq!(Region::new(0, 0, 4), tree.region());
		assert!(tree.iter().all(|(i, n)| tree.is_collapsed(i) && n.color == WHITE));
		assert_eq!(0, tree.expanded_count());
		assert!(!tree.is_collapsed(21));
		assert!(tree.node(21).is_none());

		let root = tree.node(ROOT).unwrap();
		let region_of = |q| tree.node(root.child(q).unwrap()).unwrap().region;
		assert_eq!(Region::new(0, 0, 2), region_of(Quadrant::TopLeft));
		assert_eq!(Region::new(2, 0, 2), region_of(Quadrant::TopRight));
		assert_eq!(Region::new(0, 2, 2), region_of(Quadrant::BottomLeft));
		assert_eq!(Region::new(2, 2, 2), region_of(Quadrant::BottomRight));
		for &q in Quadrant::ALL.iter() {
			assert_eq!(root.region.quadrant(q), region_of(q));
		}
	}

	#[test]
	fn height_zero_is_a_single_leaf() {
		let tree = Quadtree::build(0, Region::new(3, 3, 5), Options::default()).unwrap();
		assert_eq!(1, tree.len());
		assert!(tree.node(ROOT).unwrap().is_leaf());
	}

	#[test]
	fn shape_errors() {
		assert_eq!(
			Err(ShapeError::Empty),
			Quadtree::build(1, Region::new(0, 0, 0), Options::default()).map(|t| t.len())
		);
		assert_eq!(
			Err(ShapeError::IndivisibleSide { side_len: 6, height: 2 }),
			Quadtree::build(2, Region::new(0, 0, 6), Options::default()).map(|t| t.len())
		);
		assert_eq!(
			Err(ShapeError::TooDeep { height: 16, max: MAX_HEIGHT }),
			Quadtree::build(16, Region::new(0, 0, 1 << 16), Options::default()).map(|t| t.len())
		);
		assert_eq!(
			Err(ShapeError::OutOfRange { x: u32::MAX, y: 0, side_len: 2 }),
			Quadtree::build(1, Region::new(u32::MAX, 0, 2), Options::default()).map(|t| t.len())
		);
		assert_eq!(
			Err(ShapeError::OutOfRange { x: 0, y: u32::MAX - 3, side_len: 4 }),
			Quadtree::build(2, Region::new(0, u32::MAX - 3, 4), Options::default()).map(|t| t.len())
		);
		// The far edge may sit exactly on u32::MAX
		assert!(Quadtree::build(2, Region::new(u32::MAX - 4, u32::MAX - 4, 4), Options::default()).is_ok());
	}

	#[test]
	fn height_for() {
		assert_eq!(0, Quadtree::height_for(1));
		assert_eq!(9, Quadtree::height_for(512));
		assert_eq!(3, Quadtree::height_for(600));
		assert_eq!(0, Quadtree::height_for(75));
		assert_eq!(MAX_HEIGHT, Quadtree::height_for(1 << 20));
	}

	proptest! {
		#[test]
		fn leaves_tile_root(height in 0u32..5, scale in 1u32..4, x in 0u32..100, y in 0u32..100) {
			let side = scale << height;
			let root = Region::new(x, y, side);
			let tree = Quadtree::build(height, root, Options::default()).unwrap();
			let leaves: Vec<_> = tree.leaves().map(|n| n.region).collect();

			prop_assert_eq!(1usize << (2 * height), leaves.len());
			prop_assert!(leaves.iter().all(|r| r.side_len == scale));

			// Every pixel of the root is covered by exactly one leaf
			let mut cover = vec![0u8; (side * side) as usize];
			for r in leaves.iter() {
				prop_assert!(r.x >= x && r.y >= y);
				prop_assert!(r.x + r.side_len <= x + side && r.y + r.side_len <= y + side);
				for row in r.y..r.y + r.side_len {
					for col in r.x..r.x + r.side_len {
						cover[((row - y) * side + col - x) as usize] += 1;
					}
				}
			}
			prop_assert!(cover.iter().all(|&c| c == 1));
		}
	}
}
