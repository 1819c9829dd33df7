use crate::prelude::*;

/// Largest dot product at which two direction vectors still count as perpendicular.
///
/// The vectors come from integer pixel coordinates, so anything but an exact zero is a real angle.
const PERPENDICULAR_EPSILON: i64 = 0;

/// Looks for a partial rectangle: two perpendicular lines whose endpoints touch.
///
/// A closed outline isn't required. When the rectangle runs off the edge of the detection area only two of its sides are visible.
#[derive(Clone, Copy, Debug)]
pub struct RectangleMatcher {
	min_side_length_sqr: i64,
	connection_tolerance: i32,
}
impl RectangleMatcher {
	/// * `min_side_length` - shortest line that can form a side of the rectangle
	/// * `connection_tolerance` - endpoints touch if they are closer than this on both axes
	#[inline]
	pub fn new(min_side_length: u32, connection_tolerance: u32) -> Self {
		Self {
			min_side_length_sqr: min_side_length as i64 * min_side_length as i64,
			connection_tolerance: connection_tolerance.min(i32::MAX as u32) as i32
		}
	}

	/// The first pair of lines (in input order) that forms a corner
	pub fn find_corner(&self, lines: &[Line<i32>]) -> Option<(Line<i32>, Line<i32>)> {
		let sides = lines
			.iter()
			.copied()
			.filter(|line| line.length_sqr() >= self.min_side_length_sqr)
			.map(|line| (line, line.vector()))
			.collect::<Vec<_>>();

		if sides.len() < 2 {
			return None;
		}

		for (i, (a, a_vec)) in sides.iter().enumerate() {
			for (b, b_vec) in &sides[i + 1..] {
				if self.are_connected(a, b) && a_vec.dot(b_vec).abs() <= PERPENDICULAR_EPSILON {
					log::debug!("corner formed by {a} and {b}");
					return Some((*a, *b));
				}
			}
		}

		None
	}

	#[inline]
	pub fn forms_rectangle(&self, lines: &[Line<i32>]) -> bool {
		self.find_corner(lines).is_some()
	}

	#[inline]
	fn are_connected(&self, a: &Line<i32>, b: &Line<i32>) -> bool {
		a.endpoints()
			.into_iter()
			.any(|pa| b.endpoints().into_iter().any(|pb| pa.is_near(&pb, self.connection_tolerance)))
	}
}
