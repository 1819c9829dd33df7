pub mod prelude {
	pub use crate::{
		blobs::{extract_blobs, highlight_blobs, Blob},
		detector::Detector,
		lines::extract_lines,
		preprocess::{Crop, Threshold},
		shape::RectangleMatcher,
	};
	pub use vpf_vision_common::prelude::*;
}

pub mod blobs;
pub mod detector;
pub mod lines;
pub mod preprocess;
pub mod shape;

pub use detector::Detector;
