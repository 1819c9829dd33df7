use crate::{
	blobs::{extract_blobs, highlight_blobs},
	lines::extract_lines,
	preprocess::{Crop, Threshold},
	prelude::*,
	shape::RectangleMatcher,
};
use vpf_util::imageproc::{drawing, rect::Rect as DrawRect};

const OVERLAY_BOUNDS_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const OVERLAY_CORNER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// What the blob search settled on, in pixels relative to the crop
#[derive(Clone, Copy, Debug)]
struct Found {
	bounds: Rect<i32>,
	corner: (Line<i32>, Line<i32>),
}

/// Finds a bright, axis-aligned rectangle outline inside the detection area of an image.
///
/// The detector is immutable once built, so a single instance can be shared between threads.
#[derive(Debug)]
pub struct Detector {
	config: DetectorConfig,
	debug: bool,
	pipeline: Pipeline,
	matcher: RectangleMatcher,
}
impl Detector {
	pub fn new(config: DetectorConfig, debug: bool) -> Result<Self, ValidationError> {
		config.validate()?;

		// First crop the image to the detection area, then keep only the bright pixels
		let pipeline = Pipeline::new()
			.tap_if(debug, Tap::new(|_, debug| debug.start()))
			.then(Crop::new(config.detection_area))
			.tap_if(debug, Tap::new(|image, debug| {
				debug.stop(|t| &mut t.crop);
				if let Some(trace) = debug.trace_mut() {
					trace.crop = Some(image.clone());
				}
				debug.start();
			}))
			.then(Threshold::new(config.brightness_threshold))
			.tap_if(debug, Tap::new(|image, debug| {
				debug.stop(|t| &mut t.threshold);
				if let Some(trace) = debug.trace_mut() {
					trace.threshold = image.as_luma8().cloned();
				}
			}));

		Ok(Self {
			matcher: RectangleMatcher::new(config.min_side_length, config.connection_tolerance),
			config,
			debug,
			pipeline
		})
	}

	#[inline]
	pub fn config(&self) -> &DetectorConfig {
		&self.config
	}

	#[inline]
	pub fn is_debug(&self) -> bool {
		self.debug
	}

	/// Returns the first blob (in scan order) that forms a rectangle, not the best one
	pub fn detect(&self, image: &DynamicImage) -> Result<Detection, ValidationError> {
		let (image_w, image_h) = image.dimensions();
		if image_w == 0 || image_h == 0 {
			return Err(ValidationError::EmptyImage { w: image_w, h: image_h });
		}

		let area = self.config.detection_area;
		let [_, _, crop_w, crop_h] = area.crop_box(image_w, image_h);
		if crop_w == 0 || crop_h == 0 {
			return Err(ValidationError::EmptyCrop { image_w, image_h, w: crop_w, h: crop_h });
		}

		let start = Instant::now();
		let mut debug = DebugRecorder::new(self.debug);

		macro_rules! debug_waterfall {
			($event:ident => $code:expr) => {{
				debug.start();
				let ret = $code;
				debug.stop(|t| &mut t.$event);
				ret
			}};
		}

		let binary = match self.pipeline.run(image, &mut debug).into_owned() {
			DynamicImage::ImageLuma8(binary) => binary,
			other => other.to_luma8()
		};

		let blobs = debug_waterfall!(find_blobs => extract_blobs(&binary, FOREGROUND, self.config.min_blob_pixels));

		if let Some(trace) = debug.trace_mut() {
			let (w, h) = binary.dimensions();
			store_debug_image(&mut trace.blobs, highlight_blobs(w, h, &blobs), "blob highlight", w, h);
		}

		let found = debug_waterfall!(find_rectangle => self.find_rectangle(&blobs));

		let result = found.map(|found| DetectionResult {
			absolute: area.to_absolute(found.bounds, image_w, image_h),
			normalized: area.normalize(found.bounds, image_w, image_h)
		});

		match &result {
			Some(result) => log::debug!("rectangle found at {} ({:?} of detection area)", result.absolute, result.normalized),
			None => log::debug!("no rectangle among {} blobs", blobs.len())
		}

		if let Some(trace) = debug.trace_mut() {
			if let (Some(crop), Some(found)) = (trace.crop.as_ref(), found) {
				let (w, h) = crop.dimensions();
				store_debug_image(&mut trace.overlay, render_overlay(crop, found), "overlay", w, h);
			}
			trace.timeshares.entire_frame = Some(start.elapsed());
		}

		Ok(Detection {
			result,
			trace: debug.finish()
		})
	}

	fn find_rectangle(&self, blobs: &[Blob]) -> Option<Found> {
		for (i, blob) in blobs.iter().enumerate() {
			let lines = extract_lines(blob, self.config.min_line_length);
			log::debug!("blob #{i}: {} pixels, {} lines", blob.len(), lines.len());

			if let Some(corner) = self.matcher.find_corner(&lines) {
				// a corner implies at least two lines, so there is always a bounding box
				return bounding_box(&lines).map(|bounds| Found { bounds, corner });
			}
		}
		None
	}
}

/// Debug images are best-effort, a missing one is only worth a warning
fn store_debug_image<I>(slot: &mut Option<I>, image: Option<I>, name: &str, w: u32, h: u32) {
	if image.is_none() {
		log::warn!("couldn't allocate {w}x{h} {name} image");
	}
	*slot = image;
}

/// The crop with the bounding box drawn in red and the two corner lines in green
fn render_overlay(crop: &DynamicImage, found: Found) -> Option<RgbImage> {
	let mut overlay = try_new_image::<Rgb<u8>>(crop.width(), crop.height())?;
	for (x, y, pixel) in crop.pixels() {
		overlay.put_pixel_fast(x, y, pixel.to_rgb());
	}

	let Found { bounds, corner: (a, b) } = found;
	drawing::draw_hollow_rect_mut(
		&mut overlay,
		DrawRect::at(bounds.left, bounds.top).of_size(bounds.width() as u32 + 1, bounds.height() as u32 + 1),
		OVERLAY_BOUNDS_COLOR
	);
	for line in [a, b] {
		drawing::draw_line_segment_mut(
			&mut overlay,
			(line.p0.x as f32, line.p0.y as f32),
			(line.p1.x as f32, line.p1.y as f32),
			OVERLAY_CORNER_COLOR
		);
	}

	Some(overlay)
}

#[cfg(test)]
mod tests {
	use super::*;

	/// `min_side_length` is lowered to 5 so the 8 pixel corners below count, see `min_side_length_gates_small_corners`
	fn config(detection_area: DetectionArea) -> DetectorConfig {
		DetectorConfig {
			detection_area,
			brightness_threshold: 128,
			min_blob_pixels: 5,
			min_line_length: 3,
			min_side_length: 5,
			connection_tolerance: 2
		}
	}

	fn image(w: u32, h: u32, foreground: impl IntoIterator<Item = (u32, u32)>) -> DynamicImage {
		let mut image = GrayImage::new(w, h);
		for (x, y) in foreground {
			image.put_pixel(x, y, Luma([255]));
		}
		DynamicImage::ImageLuma8(image)
	}

	/// Two 8 pixel runs meeting at the bottom left, at (x, y) to (x + 7, y + 7)
	fn corner(x: u32, y: u32) -> impl Iterator<Item = (u32, u32)> {
		(y..y + 8).map(move |yy| (x, yy)).chain((x..x + 8).map(move |xx| (xx, y + 7)))
	}

	#[test]
	fn finds_corner() {
		let detector = Detector::new(config(DetectionArea::FULL), false).unwrap();
		assert_eq!(detector.config().min_side_length, 5);
		assert!(!detector.is_debug());

		let detection = detector.detect(&image(10, 10, corner(1, 1))).unwrap();

		let result = detection.result.unwrap();
		assert_eq!(result.absolute, Rect::new(1, 1, 8, 8));
		assert_eq!(result.normalized, Rect::new(0.1, 0.1, 0.8, 0.8));
		assert!(detection.trace.is_none());
	}

	#[test]
	fn min_side_length_gates_small_corners() {
		// both runs span 7 pixels, 49 is below the default minimum side of 10 squared
		let config = DetectorConfig { min_side_length: DetectorConfig::default().min_side_length, ..config(DetectionArea::FULL) };
		assert_eq!(config.min_side_length, 10);

		let detector = Detector::new(config, false).unwrap();
		assert!(!detector.detect(&image(10, 10, corner(1, 1))).unwrap().is_found());

		let detector = Detector::new(DetectorConfig { min_side_length: 7, ..config }, false).unwrap();
		assert!(detector.detect(&image(10, 10, corner(1, 1))).unwrap().is_found());
	}

	#[test]
	fn missing_debug_images_leave_the_trace_usable() {
		let mut trace = DebugTrace::default();
		trace.timeshares.find_blobs = Some(Duration::from_millis(1));

		store_debug_image(&mut trace.blobs, Some(GrayImage::new(2, 2)), "blob highlight", 2, 2);
		assert!(trace.blobs.is_some());

		store_debug_image(&mut trace.blobs, None, "blob highlight", 2, 2);
		store_debug_image(&mut trace.overlay, None, "overlay", 2, 2);
		assert!(trace.blobs.is_none() && trace.overlay.is_none());
		assert!(trace.image(DebugImage::Blobs).is_none());
		assert_eq!(trace.timeshares.find_blobs, Some(Duration::from_millis(1)));
	}

	#[test]
	fn blank_image_has_no_result() {
		let detector = Detector::new(config(DetectionArea::FULL), false).unwrap();
		let detection = detector.detect(&image(10, 10, [])).unwrap();
		assert!(!detection.is_found());
	}

	#[test]
	fn tiny_blob_is_discarded() {
		let detector = Detector::new(config(DetectionArea::FULL), true).unwrap();
		let detection = detector.detect(&image(10, 10, [(4, 4), (5, 4), (4, 5)])).unwrap();
		assert!(detection.result.is_none());

		let trace = detection.trace.unwrap();
		assert_eq!(trace.threshold.unwrap().pixels().filter(|p| p.0[0] == FOREGROUND).count(), 3);
		assert!(trace.blobs.unwrap().pixels().all(|p| p.0[0] == BACKGROUND));
		assert!(trace.overlay.is_none());
	}

	#[test]
	fn maps_back_into_image_coordinates() {
		let area = DetectionArea::new(0.5, 0.5, 0.5, 0.5).unwrap();
		let detector = Detector::new(config(area), false).unwrap();

		// horizontal run (52, 53) to (60, 53), vertical run (52, 53) to (52, 60)
		let foreground = (52..=60).map(|x| (x, 53)).chain((54..=60).map(|y| (52, y)));
		let result = detector.detect(&image(100, 100, foreground)).unwrap().result.unwrap();

		assert_eq!(result.absolute, Rect::new(52, 53, 60, 60));
		assert_eq!(result.normalized, Rect::new(0.04, 0.06, 0.2, 0.2));
	}

	#[test]
	fn ignores_everything_outside_the_detection_area() {
		let area = DetectionArea::new(0.5, 0.5, 0.5, 0.5).unwrap();
		let detector = Detector::new(config(area), false).unwrap();
		assert!(!detector.detect(&image(100, 100, corner(10, 10))).unwrap().is_found());
	}

	#[test]
	fn first_match_wins() {
		let detector = Detector::new(config(DetectionArea::FULL), false).unwrap();

		// the corner on the right is bigger, but the one on the left is scanned first
		let foreground = corner(2, 20).chain((30..50).map(|y| (30, y))).chain((30..50).map(|x| (x, 49)));
		let result = detector.detect(&image(64, 64, foreground)).unwrap().result.unwrap();
		assert_eq!(result.absolute, Rect::new(2, 20, 9, 27));
	}

	#[test]
	fn averages_color_channels() {
		let detector = Detector::new(config(DetectionArea::FULL), false).unwrap();

		let mut image = image::RgbaImage::from_pixel(10, 10, image::Rgba([160, 160, 160, 0]));
		for (x, y) in corner(1, 1) {
			image.put_pixel(x, y, image::Rgba([255, 255, 255, 255]));
		}

		// a transparent grey background is dark once alpha is part of the average
		let result = detector.detect(&DynamicImage::ImageRgba8(image)).unwrap().result.unwrap();
		assert_eq!(result.absolute, Rect::new(1, 1, 8, 8));
	}

	#[test]
	fn debug_trace_is_complete_and_changes_nothing() {
		let image = image(32, 32, corner(4, 6));
		let plain = Detector::new(config(DetectionArea::FULL), false).unwrap().detect(&image).unwrap();
		let debug = Detector::new(config(DetectionArea::FULL), true).unwrap().detect(&image).unwrap();

		assert_eq!(plain.result, debug.result);

		let trace = debug.trace.unwrap();
		assert_eq!(trace.crop.as_ref().unwrap().dimensions(), (32, 32));
		assert_eq!(trace.threshold.as_ref().unwrap().dimensions(), (32, 32));
		assert_eq!(trace.blobs.as_ref().unwrap().pixels().filter(|p| p.0[0] == FOREGROUND).count(), 15);

		let overlay = trace.overlay.as_ref().unwrap();
		assert_eq!(overlay.get_pixel(4, 6), &OVERLAY_CORNER_COLOR);
		assert_eq!(overlay.get_pixel(11, 6), &OVERLAY_BOUNDS_COLOR);

		for (_, choice) in DebugImage::variants() {
			assert!(trace.image(choice).is_some(), "{choice:?} missing");
		}

		let stages = trace.timeshares.iter().map(|(name, _)| name).collect::<Vec<_>>();
		assert_eq!(stages, ["PreProcess: Crop", "PreProcess: BW", "BlobDetection", "RectangleDetection"]);
		assert!(trace.timeshares.entire_frame.is_some());
	}

	#[test]
	fn repeated_and_concurrent_calls_agree() {
		let detector = Detector::new(config(DetectionArea::FULL), true).unwrap();
		assert!(detector.is_debug());
		let image = image(24, 24, corner(3, 3));

		let first = detector.detect(&image).unwrap().result;
		assert!(first.is_some());

		let results = (0..16).into_par_iter().map(|_| detector.detect(&image).unwrap().result).collect::<Vec<_>>();
		assert!(results.iter().all(|result| *result == first));
	}

	#[test]
	fn rejects_bad_inputs() {
		let detector = Detector::new(config(DetectionArea::FULL), false).unwrap();
		assert_eq!(detector.detect(&image(0, 0, [])).unwrap_err(), ValidationError::EmptyImage { w: 0, h: 0 });

		let area = DetectionArea::new(0.0, 0.0, 0.05, 0.05).unwrap();
		let detector = Detector::new(config(area), false).unwrap();
		assert!(matches!(detector.detect(&image(10, 10, [])), Err(ValidationError::EmptyCrop { .. })));

		let invalid = DetectorConfig { min_line_length: 0, ..config(DetectionArea::FULL) };
		assert_eq!(Detector::new(invalid, false).unwrap_err(), ValidationError::NotPositive("min_line_length"));
	}
}
