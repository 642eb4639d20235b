use std::collections::HashSet;

use crate::graph::{Layout, LayoutConfig, Point, ViewTransform};

/// Pointer hit radius around a node centre, in layout units.
pub const HIT_RADIUS: f64 = 12.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Point,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

/// Everything the canvas needs between frames: the laid-out graph plus
/// view and pointer state.
pub struct GraphViewState {
	pub layout: Layout,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	fit: bool,
	padding: f64,
}

impl GraphViewState {
	pub fn new(layout: Layout, config: &LayoutConfig, width: f64, height: f64) -> Self {
		let mut state = Self {
			layout,
			transform: ViewTransform::centered(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			fit: config.fit,
			padding: config.padding,
		};
		state.reset_view();
		state
	}

	/// Fit (or centre) the whole layout in the surface.
	pub fn reset_view(&mut self) {
		self.transform = if self.fit {
			ViewTransform::fit(self.layout.bounds(), self.width, self.height, self.padding)
		} else {
			ViewTransform::centered(self.width, self.height)
		};
	}

	/// Replace the drawn graph wholesale; pointer state from the old graph
	/// is meaningless and dropped.
	pub fn replace_layout(&mut self, layout: Layout) {
		self.layout = layout;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
		self.reset_view();
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let p = self.transform.to_layout(sx, sy);
		// last drawn wins, matching paint order
		self.layout
			.nodes
			.iter()
			.rposition(|n| n.position.distance(p) < HIT_RADIUS)
	}

	pub fn move_node(&mut self, idx: usize, to: Point) {
		if let Some(node) = self.layout.nodes.get_mut(idx) {
			node.position = to;
		}
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.layout.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Advance the hover highlight animation by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.reset_view();
	}
}
