/// Iterates `(x, y, pixel)` over an `ImageBuffer` in column-major order: every row of column 0 top to bottom, then column 1, and so on.
#[macro_export]
macro_rules! iter_pixels {
	($image:ident) => {{
		let (w, h) = $image.dimensions();
		(0..w).flat_map(move |x| (0..h).map(move |y| (x, y))).map(|(x_, y_)| {
			#[cfg(debug_assertions)]
			let p = *$image.get_pixel(x_, y_);

			#[cfg(not(debug_assertions))]
			let p = unsafe { $image.unsafe_get_pixel(x_, y_) };

			(x_, y_, p)
		})
	}};
}

pub trait FastPixelSet: image::GenericImageView + image::GenericImage {
	fn put_pixel_fast(&mut self, x: u32, y: u32, pixel: <Self as image::GenericImageView>::Pixel);
}
impl<I: image::GenericImageView + image::GenericImage> FastPixelSet for I {
	#[inline]
	#[cfg(debug_assertions)]
	fn put_pixel_fast(&mut self, x: u32, y: u32, pixel: <Self as image::GenericImageView>::Pixel) {
		self.put_pixel(x, y, pixel)
	}

	#[inline]
	#[cfg(not(debug_assertions))]
	fn put_pixel_fast(&mut self, x: u32, y: u32, pixel: <Self as image::GenericImageView>::Pixel) {
		unsafe { self.unsafe_put_pixel(x, y, pixel) }
	}
}

/// Allocates a zeroed image, returning `None` instead of aborting if the buffer size overflows
pub fn try_new_image<P: image::Pixel<Subpixel = u8> + 'static>(w: u32, h: u32) -> Option<image::ImageBuffer<P, Vec<u8>>> {
	let len = (w as usize).checked_mul(h as usize)?.checked_mul(P::CHANNEL_COUNT as usize)?;
	let mut buf = Vec::new();
	buf.try_reserve_exact(len).ok()?;
	buf.resize(len, 0);
	image::ImageBuffer::from_raw(w, h, buf)
}
