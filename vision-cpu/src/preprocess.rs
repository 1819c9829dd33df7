use crate::prelude::*;

/// Cuts the detection area out of the image
#[derive(Clone, Copy, Debug)]
pub struct Crop {
	area: DetectionArea,
}
impl Crop {
	#[inline]
	pub fn new(area: DetectionArea) -> Self {
		Self { area }
	}
}
impl ImageProcessor for Crop {
	fn process<'a>(&self, image: Cow<'a, DynamicImage>, _debug: &mut DebugRecorder) -> Cow<'a, DynamicImage> {
		let [x, y, w, h] = self.area.crop_box(image.width(), image.height());
		Cow::Owned(image.crop_imm(x, y, w, h))
	}
}

/// Converts the image to pure black and white.
///
/// A pixel becomes [`FOREGROUND`] if the plain mean of all its channel values (alpha included) exceeds the threshold.
#[derive(Clone, Copy, Debug)]
pub struct Threshold {
	threshold: u8,
}
impl Threshold {
	#[inline]
	pub fn new(threshold: u8) -> Self {
		Self { threshold }
	}

	pub fn apply(&self, image: &DynamicImage) -> GrayImage {
		#[allow(unreachable_patterns)]
		match image {
			DynamicImage::ImageLuma8(image) => self.apply_buffer(image),
			DynamicImage::ImageLumaA8(image) => self.apply_buffer(image),
			DynamicImage::ImageRgb8(image) => self.apply_buffer(image),
			DynamicImage::ImageRgba8(image) => self.apply_buffer(image),
			DynamicImage::ImageBgr8(image) => self.apply_buffer(image),
			DynamicImage::ImageBgra8(image) => self.apply_buffer(image),

			// Scale wider subpixels down to bytes but keep the channel layout, since the channel count feeds the mean
			DynamicImage::ImageLuma16(_) => self.apply_buffer(&image.to_luma8()),
			DynamicImage::ImageLumaA16(_) => self.apply_buffer(&image.to_luma_alpha8()),
			DynamicImage::ImageRgb16(_) => self.apply_buffer(&image.to_rgb8()),
			_ => self.apply_buffer(&image.to_rgba8()),
		}
	}

	fn apply_buffer<P>(&self, image: &ImageBuffer<P, Vec<u8>>) -> GrayImage
	where
		P: Pixel<Subpixel = u8> + 'static
	{
		let (w, h) = image.dimensions();
		let mut out = GrayImage::new(w, h);

		for (x, y, pixel) in iter_pixels!(image) {
			let value = if is_bright(pixel.channels(), self.threshold) { FOREGROUND } else { BACKGROUND };
			out.put_pixel_fast(x, y, Luma([value]));
		}

		out
	}
}
impl ImageProcessor for Threshold {
	#[inline]
	fn process<'a>(&self, image: Cow<'a, DynamicImage>, _debug: &mut DebugRecorder) -> Cow<'a, DynamicImage> {
		Cow::Owned(DynamicImage::ImageLuma8(self.apply(&image)))
	}
}

/// `mean(channels) > threshold`, compared without dividing
#[inline]
fn is_bright(channels: &[u8], threshold: u8) -> bool {
	let sum: u32 = channels.iter().map(|&c| c as u32).sum();
	sum > threshold as u32 * channels.len() as u32
}
