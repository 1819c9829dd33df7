use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionResult {
	/// Position in pixels relative to the input image's origin (top left)
	pub absolute: Rect<u32>,

	/// Position as fractions of the detection area, (0, 0) being its top left and (1, 1) its bottom right
	pub normalized: Rect<f32>,
}

/// Outcome of one detection call.
///
/// Not finding a rectangle is a normal outcome, reported as `result: None`.
#[derive(Clone, Debug, Default)]
pub struct Detection {
	pub result: Option<DetectionResult>,

	/// Only present if the detector was built with debugging enabled
	pub trace: Option<DebugTrace>,
}
impl Detection {
	#[inline]
	pub fn is_found(&self) -> bool {
		self.result.is_some()
	}
}
