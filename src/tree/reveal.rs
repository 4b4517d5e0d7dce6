use tracing::debug;

use super::{Quadtree, ROOT};
use crate::node::{NodeIndex, NodeKind};

/// How far a single `reveal` call discloses detail under the focus point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPolicy {
	/// Expand the first collapsed node on the focus path and stop there.
	OneLevel,
	/// Like `OneLevel`, but an expanded node's internal children are
	/// expanded along with it, whether or not they hold the focus.
	Cascade,
}

impl Default for RevealPolicy {
	fn default() -> Self {
		RevealPolicy::OneLevel
	}
}

impl Quadtree {
	/// Advances the collapse state under the focus point `(fx, fy)`.
	///
	/// Collapsed nodes only ever become expanded, never the reverse, and
	/// leaves are never expanded since they have nothing finer to show.
	/// Repeated calls at a steady focus point sharpen the area under it
	/// one level at a time. Returns how many nodes were expanded.
	pub fn reveal(&mut self, fx: f64, fy: f64) -> usize {
		let expanded = self.reveal_node(ROOT, fx, fy);
		if expanded > 0 {
			debug!(fx, fy, expanded, "revealed");
		}
		expanded
	}

	fn reveal_node(&mut self, index: NodeIndex, fx: f64, fy: f64) -> usize {
		let node = &self.nodes[index as usize];
		if !node.region.contains(fx, fy, self.options.containment) {
			return 0;
		}
		let children = match node.kind {
			NodeKind::Leaf { .. } => return 0,
			NodeKind::Internal { children } => children,
		};

		if self.collapsed[index as usize] {
			self.collapsed.set(index as usize, false);
			match self.options.reveal {
				RevealPolicy::OneLevel => 1,
				RevealPolicy::Cascade => 1 + children.iter()
					.filter(|&&child| self.expand_internal(child))
					.count(),
			}
		} else {
			// Recursion
			children.iter()
				.map(|&child| self.reveal_node(child, fx, fy))
				.sum()
		}
	}

	/// Expands `index` if it is a collapsed internal node.
	fn expand_internal(&mut self, index: NodeIndex) -> bool {
		let i = index as usize;
		if self.nodes[i].is_leaf() || !self.collapsed[i] {
			return false;
		}
		self.collapsed.set(i, false);
		true
	}
}
