//! Screen-space geometry reported by host layout callbacks.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: i32,
	/// Vertical coordinate.
	pub y: i32,
}

impl Point {
	/// Creates a point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// A rectangle stored as its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
	/// Left edge.
	pub left: i32,
	/// Top edge.
	pub top: i32,
	/// Right edge.
	pub right: i32,
	/// Bottom edge.
	pub bottom: i32,
}

impl Rect {
	/// Creates a rectangle from its edges.
	pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
		Self {
			left,
			top,
			right,
			bottom,
		}
	}

	/// Builds a rectangle from the two corner points a host reports.
	pub const fn from_corners(top_left: Point, bottom_right: Point) -> Self {
		Self::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
	}

	/// Width, saturating at zero for inverted rectangles.
	pub fn width(&self) -> u32 {
		self.right.saturating_sub(self.left).max(0) as u32
	}

	/// Height, saturating at zero for inverted rectangles.
	pub fn height(&self) -> u32 {
		self.bottom.saturating_sub(self.top).max(0) as u32
	}

	/// Returns true if the point lies inside (origin inclusive, far edges exclusive).
	pub fn contains(&self, point: Point) -> bool {
		point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
	}
}
