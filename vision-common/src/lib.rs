pub use vpf_util::*;

pub mod prelude {
	pub use crate::{
		area::DetectionArea,
		config::{DetectorConfig, BACKGROUND, FOREGROUND},
		debug::{self, DebugImage, DebugRecorder, DebugTrace, Timeshares},
		error::ValidationError,
		pipeline::{ImageProcessor, Pipeline, Tap},
		result::{Detection, DetectionResult},
	};

	pub use vpf_util::*;
}

pub mod area;
pub mod config;
pub mod debug;
pub mod error;
pub mod pipeline;
pub mod result;
