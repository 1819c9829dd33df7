use crate::prelude::*;

/// A single image -> image preprocessing step.
///
/// Steps that don't need to touch the image (debug taps) hand the borrowed input straight back.
pub trait ImageProcessor: Send + Sync {
	fn process<'a>(&self, image: Cow<'a, DynamicImage>, debug: &mut DebugRecorder) -> Cow<'a, DynamicImage>;
}

/// Ordered list of preprocessing steps, applied left to right
#[derive(Default)]
pub struct Pipeline {
	steps: Vec<Box<dyn ImageProcessor>>,
}
impl Pipeline {
	#[inline]
	pub fn new() -> Self {
		Self::default()
	}

	#[inline]
	pub fn then<P: ImageProcessor + 'static>(mut self, step: P) -> Self {
		self.steps.push(Box::new(step));
		self
	}

	/// Appends `tap` only if `enabled`
	#[inline]
	pub fn tap_if(self, enabled: bool, tap: Tap) -> Self {
		if enabled {
			self.then(tap)
		} else {
			self
		}
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	pub fn run<'a>(&self, image: &'a DynamicImage, debug: &mut DebugRecorder) -> Cow<'a, DynamicImage> {
		self.steps.iter().fold(Cow::Borrowed(image), |image, step| step.process(image, debug))
	}
}
impl core::fmt::Debug for Pipeline {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Pipeline").field("steps", &self.steps.len()).finish()
	}
}

/// Observes the image passing through the pipeline without changing it
#[derive(Clone, Copy)]
pub struct Tap(fn(&DynamicImage, &mut DebugRecorder));
impl Tap {
	#[inline]
	pub const fn new(callback: fn(&DynamicImage, &mut DebugRecorder)) -> Self {
		Self(callback)
	}
}
impl ImageProcessor for Tap {
	#[inline]
	fn process<'a>(&self, image: Cow<'a, DynamicImage>, debug: &mut DebugRecorder) -> Cow<'a, DynamicImage> {
		(self.0)(&image, debug);
		image
	}
}
