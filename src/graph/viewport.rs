use super::layout::{Bounds, Point};

/// Smallest zoom factor, for fitting and interactive zoom alike.
pub const MIN_SCALE: f64 = 0.1;
/// Largest zoom factor.
pub const MAX_SCALE: f64 = 10.0;

/// Layout-to-screen transform: `screen = layout * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Scale factor, within `[MIN_SCALE, MAX_SCALE]`.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Layout origin at the centre of the surface, unscaled.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	/// Scale and translate so `bounds` fits inside the surface with `padding`
	/// pixels on each side. Degenerate bounds keep scale 1 and are centred.
	pub fn fit(bounds: Option<Bounds>, width: f64, height: f64, padding: f64) -> Self {
		let Some(bounds) = bounds else {
			return Self::centered(width, height);
		};
		let (avail_w, avail_h) = (
			(width - 2.0 * padding).max(1.0),
			(height - 2.0 * padding).max(1.0),
		);
		let scale_for = |avail: f64, extent: f64| {
			if extent > 0.0 {
				avail / extent
			} else {
				f64::INFINITY
			}
		};
		let k = scale_for(avail_w, bounds.width()).min(scale_for(avail_h, bounds.height()));
		let k = if k.is_finite() {
			k.clamp(MIN_SCALE, MAX_SCALE)
		} else {
			1.0
		};

		let c = bounds.center();
		Self {
			x: width / 2.0 - c.x * k,
			y: height / 2.0 - c.y * k,
			k,
		}
	}

	/// Layout point to canvas pixels.
	pub fn to_screen(&self, p: Point) -> (f64, f64) {
		(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	/// Inverse of [`Self::to_screen`].
	pub fn to_layout(&self, sx: f64, sy: f64) -> Point {
		Point::new((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zoom by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_SCALE, MAX_SCALE);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}
