use crate::prelude::*;

/// Neighbours explored from every pixel while collecting a blob: right, bottom right, bottom, bottom left, top, top right.
///
/// Left and top left are absent. The raster scan walks columns left to right, so by the time a blob is seeded every pixel to
/// its left has already been visited.
const NEIGHBOURS: [(i32, i32); 6] = [
	(1, 0),
	(1, 1),
	(0, 1),
	(-1, 1),
	(0, -1),
	(1, -1),
];

/// One connected component of foreground pixels, in the order they were discovered
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob {
	pixels: Vec<PixelCoordinate>,
}
impl Blob {
	#[inline]
	pub fn pixels(&self) -> &[PixelCoordinate] {
		&self.pixels
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.pixels.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.pixels.is_empty()
	}
}
impl From<Vec<PixelCoordinate>> for Blob {
	#[inline]
	fn from(pixels: Vec<PixelCoordinate>) -> Self {
		Self { pixels }
	}
}

/// Finds every blob of `foreground` pixels with strictly more than `min_blob_pixels` pixels.
///
/// Blobs are returned in the order their first pixel is met by a column-major scan from the top left.
pub fn extract_blobs(image: &GrayImage, foreground: u8, min_blob_pixels: u32) -> Vec<Blob> {
	let (w, h) = image.dimensions();
	let (w, h) = (w as usize, h as usize);
	let cells = image.as_raw();

	// row-major, indexed y * w + x
	let mut visited = vec![false; w * h];
	let mut pending = VecDeque::new();
	let mut blobs = Vec::new();

	for x in 0..w {
		for y in 0..h {
			let idx = y * w + x;
			if visited[idx] {
				continue;
			}
			visited[idx] = true;

			if cells[idx] != foreground {
				continue;
			}

			let blob = collect_blob(cells, w, h, foreground, idx, &mut visited, &mut pending);
			if blob.len() > min_blob_pixels as usize {
				log::trace!("blob #{} seeded at ({x}, {y}) with {} pixels", blobs.len(), blob.len());
				blobs.push(blob);
			}
		}
	}

	log::debug!("found {} blobs larger than {} pixels in {w}x{h} image", blobs.len(), min_blob_pixels);

	blobs
}

/// Breadth-first walk from `seed`. Pixels are marked visited as they are queued so nothing is ever queued twice.
fn collect_blob(cells: &[u8], w: usize, h: usize, foreground: u8, seed: usize, visited: &mut [bool], pending: &mut VecDeque<usize>) -> Blob {
	debug_assert!(pending.is_empty());

	let mut pixels = Vec::new();
	pending.push_back(seed);

	while let Some(idx) = pending.pop_front() {
		let (x, y) = ((idx % w) as i32, (idx / w) as i32);
		pixels.push(PixelCoordinate::new(x, y));

		for (dx, dy) in NEIGHBOURS {
			let (nx, ny) = (x + dx, y + dy);
			if nx < 0 || ny < 0 || nx as usize >= w || ny as usize >= h {
				continue;
			}

			let neighbour = ny as usize * w + nx as usize;
			if !visited[neighbour] && cells[neighbour] == foreground {
				visited[neighbour] = true;
				pending.push_back(neighbour);
			}
		}
	}

	Blob { pixels }
}

/// Paints the pixels of every blob white on a black `w` x `h` canvas
pub fn highlight_blobs(w: u32, h: u32, blobs: &[Blob]) -> Option<GrayImage> {
	let mut image = try_new_image::<Luma<u8>>(w, h)?;
	for pixel in blobs.iter().flat_map(Blob::pixels) {
		image.put_pixel(pixel.x as u32, pixel.y as u32, Luma([FOREGROUND]));
	}
	Some(image)
}
