use crate::prelude::*;

/// The normalized sub-rectangle of an input image that detection is confined to.
///
/// (0, 0) is the top left of the image, (1, 1) the bottom right.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[f32; 4]", into = "[f32; 4]")]
pub struct DetectionArea {
	x: f32,
	y: f32,
	w: f32,
	h: f32
}
impl DetectionArea {
	pub const FULL: DetectionArea = DetectionArea::new_unchecked(0.0, 0.0, 1.0, 1.0);

	#[inline]
	pub(crate) const fn new_unchecked(x: f32, y: f32, w: f32, h: f32) -> Self {
		Self { x, y, w, h }
	}

	pub fn new(x: f32, y: f32, w: f32, h: f32) -> Result<Self, ValidationError> {
		for (name, value) in [("x", x), ("y", y), ("width", w), ("height", h)] {
			if !value.is_finite() || !(0.0..=1.0).contains(&value) {
				return Err(ValidationError::AreaOutOfBounds { name, value });
			}
		}

		if w == 0.0 || h == 0.0 {
			return Err(ValidationError::EmptyArea { w, h });
		}

		if x + w > 1.0 {
			return Err(ValidationError::AreaOverflows { axis: "x", extent_name: "width", sum: x + w });
		}
		if y + h > 1.0 {
			return Err(ValidationError::AreaOverflows { axis: "y", extent_name: "height", sum: y + h });
		}

		Ok(Self { x, y, w, h })
	}

	#[inline]
	pub fn x(&self) -> f32 {
		self.x
	}

	#[inline]
	pub fn y(&self) -> f32 {
		self.y
	}

	#[inline]
	pub fn width(&self) -> f32 {
		self.w
	}

	#[inline]
	pub fn height(&self) -> f32 {
		self.h
	}

	/// Pixel crop box `[x, y, w, h]` of this area inside a `image_w` x `image_h` image.
	///
	/// Every component is truncated, never rounded.
	#[inline]
	pub fn crop_box(&self, image_w: u32, image_h: u32) -> [u32; 4] {
		let x = (self.x * image_w as f32) as u32;
		let y = (self.y * image_h as f32) as u32;
		let w = ((self.w * image_w as f32) as u32).min(image_w - x.min(image_w));
		let h = ((self.h * image_h as f32) as u32).min(image_h - y.min(image_h));
		[x, y, w, h]
	}

	/// Maps a rectangle in pixels relative to this area's crop to pixels relative to the image origin
	#[inline]
	pub fn to_absolute(&self, local: Rect<i32>, image_w: u32, image_h: u32) -> Rect<u32> {
		let [x, y, ..] = self.crop_box(image_w, image_h);
		let absolute = local.translate(x as i32, y as i32);
		Rect {
			left: absolute.left.max(0) as u32,
			top: absolute.top.max(0) as u32,
			right: absolute.right.max(0) as u32,
			bottom: absolute.bottom.max(0) as u32
		}
	}

	/// Inverse of [`DetectionArea::to_absolute`]
	#[inline]
	pub fn to_local(&self, absolute: Rect<u32>, image_w: u32, image_h: u32) -> Rect<i32> {
		let [x, y, ..] = self.crop_box(image_w, image_h);
		Rect {
			left: absolute.left as i32,
			top: absolute.top as i32,
			right: absolute.right as i32,
			bottom: absolute.bottom as i32
		}
		.translate(-(x as i32), -(y as i32))
	}

	/// Maps a rectangle in pixels relative to this area's crop to fractions of the crop
	#[inline]
	pub fn normalize(&self, local: Rect<i32>, image_w: u32, image_h: u32) -> Rect<f32> {
		let [_, _, w, h] = self.crop_box(image_w, image_h);
		local.normalize(w, h)
	}
}
impl Default for DetectionArea {
	#[inline]
	fn default() -> Self {
		crate::config::DEFAULT_DETECTION_AREA
	}
}
impl TryFrom<[f32; 4]> for DetectionArea {
	type Error = ValidationError;

	#[inline]
	fn try_from([x, y, w, h]: [f32; 4]) -> Result<Self, Self::Error> {
		DetectionArea::new(x, y, w, h)
	}
}
impl From<DetectionArea> for [f32; 4] {
	#[inline]
	fn from(area: DetectionArea) -> Self {
		[area.x, area.y, area.w, area.h]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn maps_bottom_right_quadrant_to_absolute() {
		let area = DetectionArea::new(0.5, 0.5, 0.5, 0.5).unwrap();
		let local = Rect::new(2, 3, 10, 3);

		assert_eq!(area.crop_box(100, 100), [50, 50, 50, 50]);
		assert_eq!(area.to_absolute(local, 100, 100), Rect::new(52, 53, 60, 53));
		assert_eq!(area.to_local(Rect::new(52, 53, 60, 53), 100, 100), local);
		assert_eq!(area.normalize(local, 100, 100), Rect::new(0.04, 0.06, 0.2, 0.06));
	}

	#[test]
	fn crop_box_truncates() {
		let area = DetectionArea::new(0.25, 0.25, 0.5, 0.5).unwrap();
		assert_eq!(area.crop_box(7, 9), [1, 2, 3, 4]);
	}

	#[test]
	fn rejects_out_of_bounds_areas() {
		assert!(matches!(DetectionArea::new(-0.1, 0.0, 0.5, 0.5), Err(ValidationError::AreaOutOfBounds { name: "x", .. })));
		assert!(matches!(DetectionArea::new(0.0, f32::NAN, 0.5, 0.5), Err(ValidationError::AreaOutOfBounds { name: "y", .. })));
		assert!(matches!(DetectionArea::new(0.0, 0.0, 1.5, 0.5), Err(ValidationError::AreaOutOfBounds { name: "width", .. })));
		assert!(matches!(DetectionArea::new(0.0, 0.0, 0.0, 0.5), Err(ValidationError::EmptyArea { .. })));
		assert!(matches!(DetectionArea::new(0.75, 0.0, 0.5, 0.5), Err(ValidationError::AreaOverflows { axis: "x", .. })));
		assert!(matches!(DetectionArea::new(0.0, 0.6, 0.5, 0.5), Err(ValidationError::AreaOverflows { axis: "y", .. })));
	}

	#[test]
	fn deserializes_with_validation() {
		let area: DetectionArea = serde_json::from_str("[0.5, 0.5, 0.5, 0.5]").unwrap();
		assert_eq!(area, DetectionArea::new(0.5, 0.5, 0.5, 0.5).unwrap());
		assert!(serde_json::from_str::<DetectionArea>("[0.5, 0.5, 0.75, 0.5]").is_err());
	}
}
