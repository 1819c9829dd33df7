use crate::prelude::*;

/// Bottom-right minimap of a 1920x1080 screenshot
pub const DEFAULT_DETECTION_AREA: DetectionArea = DetectionArea::new_unchecked(1640.0 / 1920.0, 800.0 / 1080.0, 280.0 / 1920.0, 280.0 / 1080.0);

pub const DEFAULT_BRIGHTNESS_THRESHOLD: u8 = 220;
pub const DEFAULT_MIN_BLOB_PIXELS: u32 = 20;
pub const DEFAULT_MIN_LINE_LENGTH: u32 = 5;
pub const DEFAULT_MIN_SIDE_LENGTH: u32 = 10;
pub const DEFAULT_CONNECTION_TOLERANCE: u32 = 4;

/// Binarized pixels brighter than the threshold take this value, everything else is zero
pub const FOREGROUND: u8 = u8::MAX;
pub const BACKGROUND: u8 = u8::MIN;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
	pub detection_area: DetectionArea,

	/// A pixel is foreground if the mean of its channels is strictly greater than this
	pub brightness_threshold: u8,

	/// Connected components with this many pixels or fewer are discarded
	pub min_blob_pixels: u32,

	/// Merged runs spanning this many pixels or fewer are discarded
	pub min_line_length: u32,

	/// Shortest line that may form a side of the rectangle
	pub min_side_length: u32,

	/// Two line endpoints touch if they are closer than this on both axes
	pub connection_tolerance: u32
}
impl DetectorConfig {
	pub fn validate(&self) -> Result<(), ValidationError> {
		// round-trip through the checked constructor in case the area was built by hand
		DetectionArea::try_from(<[f32; 4]>::from(self.detection_area))?;

		for (name, value) in [
			("min_blob_pixels", self.min_blob_pixels),
			("min_line_length", self.min_line_length),
			("min_side_length", self.min_side_length),
			("connection_tolerance", self.connection_tolerance),
		] {
			if value == 0 {
				return Err(ValidationError::NotPositive(name));
			}
		}

		Ok(())
	}
}
impl Default for DetectorConfig {
	fn default() -> Self {
		Self {
			detection_area: DEFAULT_DETECTION_AREA,
			brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
			min_blob_pixels: DEFAULT_MIN_BLOB_PIXELS,
			min_line_length: DEFAULT_MIN_LINE_LENGTH,
			min_side_length: DEFAULT_MIN_SIDE_LENGTH,
			connection_tolerance: DEFAULT_CONNECTION_TOLERANCE
		}
	}
}
