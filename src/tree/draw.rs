use super::{Quadtree, ROOT};
use crate::node::NodeIndex;
use crate::surface::Surface;

impl Quadtree {
	/// Draws the current level-of-detail approximation onto `surface`.
	///
	/// Each collapsed node on the way down becomes one filled swatch of its
	/// average color; nothing below it is visited. Drawing doesn't change
	/// the tree, so repeated calls issue identical fills.
	pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
		self.draw_node(ROOT, surface);
	}

	fn draw_node<S: Surface + ?Sized>(&self, index: NodeIndex, surface: &mut S) {
		let node = &self.nodes[index as usize];
		if self.collapsed[index as usize] {
			surface.fill(node.region, node.color);
			return;
		}
		// An expanded leaf has nothing to show
		if let Some(children) = node.children() {
			for &child in children.iter() {
				self.draw_node(child, surface);
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::node::{Region, WHITE};
	use crate::surface::RecordingSurface;
	use crate::tree::{Options, RevealPolicy};

	use proptest::prelude::*;

	#[test]
	fn collapsed_root_is_one_swatch() {
		let t = Quadtree::build(3, Region::new(0, 0, 8), Options::default()).unwrap();
		let mut surface = RecordingSurface::default();
		t.draw(&mut surface);
		assert_eq!(vec![(Region::new(0, 0, 8), WHITE)], surface.commands);
	}

	#[test]
	fn expanded_nodes_draw_children_in_order() {
		let mut t = Quadtree::build(2, Region::new(0, 0, 4), Options::default()).unwrap();
		let black = image::Rgb([0, 0, 0]);
		t.insert(0.5, 0.5, black).unwrap();
		t.reveal(1., 1.);
		t.reveal(1., 1.);

		let mut surface = RecordingSurface::default();
		t.draw(&mut surface);
		let regions: Vec<_> = surface.commands.iter().map(|c| c.0).collect();
		assert_eq!(vec![
			Region::new(0, 0, 1),
			Region::new(1, 0, 1),
			Region::new(0, 1, 1),
			Region::new(1, 1, 1),
			Region::new(2, 0, 2),
			Region::new(0, 2, 2),
			Region::new(2, 2, 2),
		], regions);
		assert_eq!(black, surface.commands[0].1);
		// (0 + 255 * 3) / 4
		assert_eq!(image::Rgb([191, 191, 191]), t.node(t.node(ROOT).unwrap().children().unwrap()[0]).unwrap().color);
		assert!(surface.commands[1..].iter().all(|c| c.1 == WHITE));
	}

	proptest! {
		#[test]
		fn draw_is_idempotent(
			cascade in any::<bool>(),
			points in prop::collection::vec((0f64..8., 0f64..8.), 0..20)
		) {
			let options = Options {
				reveal: if cascade { RevealPolicy::Cascade } else { RevealPolicy::OneLevel },
				..Default::default()
			};
			let mut t = Quadtree::build(3, Region::new(0, 0, 8), options).unwrap();
			for &(x, y) in points.iter() {
				t.reveal(x, y);
			}
			let (mut first, mut second) = (RecordingSurface::default(), RecordingSurface::default());
			t.draw(&mut first);
			t.draw(&mut second);
			prop_assert_eq!(&first, &second);

			// Fills never overlap and always cover the root
			let area: u64 = first.commands.iter().map(|c| c.0.area()).sum();
			prop_assert_eq!(64, area);
		}
	}
}
