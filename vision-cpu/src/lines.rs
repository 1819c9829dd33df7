use crate::prelude::*;

/// A run of pixels along one axis that may still grow at either end
#[derive(Clone, Copy, Debug)]
struct OpenLine {
	start: i32,
	end: i32,

	/// Y for horizontal runs, X for vertical runs
	fixed: i32,
}
impl OpenLine {
	#[inline]
	fn new(along: i32, fixed: i32) -> Self {
		Self { start: along, end: along, fixed }
	}

	#[inline]
	fn span(&self) -> u32 {
		self.start.abs_diff(self.end)
	}

	/// Grows the run by one pixel if `along` is directly before its start or after its end
	#[inline]
	fn extend(&mut self, along: i32) -> bool {
		if self.start == along + 1 {
			self.start = along;
			true
		} else if self.end == along - 1 {
			self.end = along;
			true
		} else {
			false
		}
	}
}

/// Extends every open run on row/column `fixed` that `along` is adjacent to
#[inline]
fn extend_all(lines: &mut [OpenLine], fixed: i32, along: i32) -> bool {
	let mut extended = false;
	for line in lines.iter_mut().filter(|line| line.fixed == fixed) {
		extended |= line.extend(along);
	}
	extended
}

/// Merges the pixels of a blob into horizontal and vertical lines longer than `min_line_length`.
///
/// Pixels are consumed in the order the blob discovered them and a run only grows one pixel at a time from either end,
/// so the result depends on that order and not just on which pixels are in the blob.
/// Horizontal lines come first in the output, followed by vertical ones.
pub fn extract_lines(blob: &Blob, min_line_length: u32) -> Vec<Line<i32>> {
	let (first, rest) = match blob.pixels().split_first() {
		Some(split) => split,
		None => return Vec::new()
	};

	let mut horizontal = vec![OpenLine::new(first.x, first.y)];
	let mut vertical = vec![OpenLine::new(first.y, first.x)];

	for px in rest {
		let extended_horizontal = extend_all(&mut horizontal, px.y, px.x);
		let extended_vertical = extend_all(&mut vertical, px.x, px.y);

		// not next to any run, so this pixel starts new ones in both directions
		if !extended_horizontal && !extended_vertical {
			horizontal.push(OpenLine::new(px.x, px.y));
			vertical.push(OpenLine::new(px.y, px.x));
		}
	}

	let lines = horizontal
		.into_iter()
		.filter(|line| line.span() > min_line_length)
		.map(|line| Line::new(Point::new(line.start, line.fixed), Point::new(line.end, line.fixed)))
		.chain(
			vertical
				.into_iter()
				.filter(|line| line.span() > min_line_length)
				.map(|line| Line::new(Point::new(line.fixed, line.start), Point::new(line.fixed, line.end)))
		)
		.collect::<Vec<_>>();

	if log::log_enabled!(log::Level::Trace) {
		for line in &lines {
			log::trace!("line {line}");
		}
	}

	lines
}
