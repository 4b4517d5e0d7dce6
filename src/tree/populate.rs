use tracing::{debug, info, trace_span};

use super::{Options, Quadtree, ROOT};
use crate::node::error::{InsertError, ShapeError};
use crate::node::{mean_color, Color, NodeIndex, NodeKind, Region};
use crate::source::PixelSource;

/// Outcome of streaming a whole pixel source into a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulateReport {
	pub inserted: u64,
	/// Pixels no leaf accepted under the tree's containment policy.
	pub dropped: u64,
}

impl Quadtree {
	/// Builds a tree sized to `source` and inserts every one of its pixels.
	///
	/// The height is `options.height`, or `Quadtree::height_for` the side
	/// length when unset. For a side that isn't a power of two that is
	/// shallower than `floor(log2 side)`: the tree stops at the last level
	/// whose leaves still have a whole-pixel side, so a 600 pixel image
	/// gets height 3 and 75 pixel leaves.
	pub fn from_source<S: PixelSource + ?Sized>(
		source: &S,
		options: Options
	) -> Result<(Self, PopulateReport), ShapeError> {
		let (width, height) = source.dimensions();
		if width != height {
			return Err(ShapeError::NonSquare { width, height });
		}
		if width == 0 {
			return Err(ShapeError::Empty);
		}
		let tree_height = options.height.unwrap_or_else(|| Quadtree::height_for(width));
		let mut tree = Quadtree::build(tree_height, Region::new(0, 0, width), options)?;
		let report = tree.populate(source);
		Ok((tree, report))
	}

	/// Inserts every pixel of `source` at its center, offset by the root's
	/// corner, column by column.
	pub fn populate<S: PixelSource + ?Sized>(&mut self, source: &S) -> PopulateReport {
		let (width, height) = source.dimensions();
		let _span = trace_span!("populate", width, height).entered();
		let origin = self.region();
		let mut report = PopulateReport::default();
		for x in 0..width {
			for y in 0..height {
				let px = origin.x as f64 + x as f64 + 0.5;
				let py = origin.y as f64 + y as f64 + 0.5;
				match self.insert(px, py, source.pixel(x, y)) {
					Ok(_) => report.inserted += 1,
					Err(e) => {
						debug!(x, y, "{}", e);
						report.dropped += 1;
					}
				}
			}
		}
		info!(report.inserted, report.dropped, "populated quadtree");
		report
	}

	/// Folds one pixel into the leaf containing `(px, py)` and refreshes the
	/// average of every ancestor on the way back up.
	///
	/// Returns the index of the accepting leaf. A rejected pixel leaves the
	/// tree untouched.
	pub fn insert(&mut self, px: f64, py: f64, color: Color) -> Result<NodeIndex, InsertError> {
		let containment = self.options.containment;
		if !self.nodes[ROOT as usize].region.contains(px, py, containment) {
			return Err(InsertError::OutOfBounds { x: px, y: py });
		}

		// Descend, remembering the path for the rollup
		let mut path = Vec::with_capacity(self.height as usize);
		let mut current = ROOT;
		while let NodeKind::Internal { children } = self.nodes[current as usize].kind {
			let nodes = &self.nodes;
			match children.iter().copied()
				.find(|&c| nodes[c as usize].region.contains(px, py, containment)) {
				Some(child) => {
					path.push(current);
					current = child;
				},
				None => return Err(InsertError::OutOfBounds { x: px, y: py }),
			}
		}

		self.nodes[current as usize].accumulate(color);
		for &index in path.iter().rev() {
			self.roll_up(index);
		}
		Ok(current)
	}

	/// Recomputes an internal node's color from its four children.
	fn roll_up(&mut self, index: NodeIndex) {
		if let NodeKind::Internal { children } = self.nodes[index as usize].kind {
			let mut colors = [self.nodes[children[0] as usize].color; 4];
			for (color, &child) in colors.iter_mut().zip(children.iter()) {
				*color = self.nodes[child as usize].color;
			}
			self.nodes[index as usize].color = mean_color(colors);
		}
	}
}
