use crate::prelude::*;

macro_rules! timeshares {
	{$($event:ident => $label:literal),*} => {
		#[derive(Clone, Default, Debug)]
		pub struct Timeshares {
			pub entire_frame: Option<Duration>,
			$(pub $event: Option<Duration>),*
		}
		impl Timeshares {
			/// Recorded stage durations in pipeline order
			pub fn iter(&self) -> impl Iterator<Item = (&'static str, Duration)> + '_ {
				[$(($label, &self.$event)),*].into_iter().filter_map(|(name, event)| event.map(|event| (name, event)))
			}

			/// Sum of the recorded stages, excluding `entire_frame`
			pub fn total(&self) -> Duration {
				self.iter().map(|(_, duration)| duration).sum()
			}
		}
	};
}
timeshares! {
	crop => "PreProcess: Crop",
	threshold => "PreProcess: BW",
	find_blobs => "BlobDetection",
	find_rectangle => "RectangleDetection"
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugImage {
	Crop,
	Threshold,
	Blobs,
	Overlay,
}
impl DebugImage {
	/// Every image a trace can carry, with the label used when saving it
	pub fn variants() -> impl Iterator<Item = (&'static str, Self)> {
		[
			("crop", Self::Crop),
			("bw", Self::Threshold),
			("blobs", Self::Blobs),
			("overlay", Self::Overlay),
		]
		.into_iter()
	}
}
/// Everything recorded while running a single detection in debug mode
#[derive(Clone, Default, Debug)]
pub struct DebugTrace {
	pub timeshares: Timeshares,

	/// The detection area cut out of the input image
	pub crop: Option<DynamicImage>,

	/// The binarized crop
	pub threshold: Option<GrayImage>,

	/// Pixels of every blob that survived the size filter
	pub blobs: Option<GrayImage>,

	/// The crop with the matched lines and their bounding box drawn over it
	pub overlay: Option<RgbImage>,
}
impl DebugTrace {
	pub fn image(&self, choice: DebugImage) -> Option<DynamicImage> {
		Some(match choice {
			DebugImage::Crop => self.crop.clone()?,
			DebugImage::Threshold => DynamicImage::ImageLuma8(self.threshold.clone()?),
			DebugImage::Blobs => DynamicImage::ImageLuma8(self.blobs.clone()?),
			DebugImage::Overlay => DynamicImage::ImageRgb8(self.overlay.clone()?),
		})
	}
}

/// Per-call debug state threaded through the preprocessing pipeline and the detection stages.
///
/// Disabled recorders ignore everything, so stages can record unconditionally.
#[derive(Debug)]
pub struct DebugRecorder {
	trace: Option<DebugTrace>,
	started: Option<Instant>,
}
impl DebugRecorder {
	#[inline]
	pub fn new(enabled: bool) -> Self {
		Self {
			trace: if enabled { Some(DebugTrace::default()) } else { None },
			started: None
		}
	}

	#[inline]
	pub fn is_enabled(&self) -> bool {
		self.trace.is_some()
	}

	#[inline]
	pub fn trace_mut(&mut self) -> Option<&mut DebugTrace> {
		self.trace.as_mut()
	}

	/// Starts (or restarts) the stopwatch
	#[inline]
	pub fn start(&mut self) {
		if self.trace.is_some() {
			self.started = Some(Instant::now());
		}
	}

	/// Stops the stopwatch, storing the elapsed time in the chosen timeshare
	#[inline]
	pub fn stop(&mut self, event: impl FnOnce(&mut Timeshares) -> &mut Option<Duration>) {
		if let (Some(trace), Some(started)) = (self.trace.as_mut(), self.started.take()) {
			*event(&mut trace.timeshares) = Some(started.elapsed());
		}
	}

	#[inline]
	pub fn finish(self) -> Option<DebugTrace> {
		self.trace
	}
}
