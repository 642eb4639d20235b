//! Force-directed layout: configuration, simulation, and the finished layout.

mod config;
mod engine;

pub use config::LayoutConfig;
pub use engine::LayoutEngine;

/// A position in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate, growing rightwards.
	pub x: f64,
	/// Vertical coordinate, growing downwards as on the canvas.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// Axis-aligned box in layout space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub min_x: f64,
	/// Top edge.
	pub min_y: f64,
	/// Right edge.
	pub max_x: f64,
	/// Bottom edge.
	pub max_y: f64,
}

impl Bounds {
	/// Smallest box holding a circle of `radius` around every point, or
	/// `None` for no points.
	pub fn around(points: impl IntoIterator<Item = Point>, radius: f64) -> Option<Self> {
		let mut points = points.into_iter();
		let first = points.next()?;
		let mut bounds = Self {
			min_x: first.x - radius,
			min_y: first.y - radius,
			max_x: first.x + radius,
			max_y: first.y + radius,
		};
		for p in points {
			bounds.min_x = bounds.min_x.min(p.x - radius);
			bounds.min_y = bounds.min_y.min(p.y - radius);
			bounds.max_x = bounds.max_x.max(p.x + radius);
			bounds.max_y = bounds.max_y.max(p.y + radius);
		}
		Some(bounds)
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	/// Midpoint of the box.
	pub fn center(&self) -> Point {
		Point::new(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}

	/// True when the two boxes share interior area.
	pub fn intersects(&self, other: &Bounds) -> bool {
		self.min_x < other.max_x
			&& other.min_x < self.max_x
			&& self.min_y < other.max_y
			&& other.min_y < self.max_y
	}
}

/// A node with its final position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
	/// Node id from the payload.
	pub id: String,
	/// Text drawn next to the node.
	pub label: String,
	/// Centre of the node circle.
	pub position: Point,
}

/// Output of a layout run. Nodes keep payload order; edges are index pairs
/// into `nodes`, directed source -> target.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
	/// Placed nodes, in payload order.
	pub nodes: Vec<PlacedNode>,
	/// `(source, target)` indices into `nodes`.
	pub edges: Vec<(usize, usize)>,
	/// Circle radius the layout was computed for.
	pub node_radius: f64,
	/// Number of simulation steps actually run.
	pub iterations: u32,
}

impl Layout {
	/// Position of the node with `id`, if present.
	pub fn position(&self, id: &str) -> Option<Point> {
		self.nodes.iter().find(|n| n.id == id).map(|n| n.position)
	}

	/// Bounding box of every node circle.
	pub fn bounds(&self) -> Option<Bounds> {
		Bounds::around(self.nodes.iter().map(|n| n.position), self.node_radius)
	}

	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
