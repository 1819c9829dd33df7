#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
	#[error("detection area {name} must be a finite value between 0 and 1 (got {value})")]
	AreaOutOfBounds { name: &'static str, value: f32 },

	#[error("detection area must have a non-zero width and height (got {w}x{h})")]
	EmptyArea { w: f32, h: f32 },

	#[error("detection area extends past the edge of the image ({axis} + {extent_name} = {sum})")]
	AreaOverflows { axis: &'static str, extent_name: &'static str, sum: f32 },

	#[error("{0} must be greater than zero")]
	NotPositive(&'static str),

	#[error("input image has no pixels ({w}x{h})")]
	EmptyImage { w: u32, h: u32 },

	#[error("detection area crops a {image_w}x{image_h} image down to nothing ({w}x{h})")]
	EmptyCrop { image_w: u32, image_h: u32, w: u32, h: u32 },
}
