//! A fixed-depth quadtree that approximates a square image with average
//! colors and reveals finer detail one level at a time around a focus point.
//!
//! Build and populate a tree with [`Quadtree::from_source`], call
//! [`Quadtree::reveal`] whenever the focus point moves, and
//! [`Quadtree::draw`] onto any [`Surface`] to get the current approximation.

pub mod node;
pub mod source;
pub mod surface;
pub mod tree;

pub use node::error::{InsertError, ShapeError};
pub use node::{Color, Containment, Node, NodeIndex, NodeKind, Quadrant, Region, WHITE};
pub use source::PixelSource;
pub use surface::{ImageSurface, RecordingSurface, Shape, Surface};
pub use tree::{Options, PopulateReport, Quadtree, RevealPolicy, MAX_HEIGHT, ROOT};
