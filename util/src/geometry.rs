use core::ops::*;

/// Axis-aligned rectangle stored as inclusive edges.
///
/// `width()` and `height()` are `right - left` and `bottom - top`, so a rectangle spanning a single pixel column has a width of zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect<T> {
	pub left: T,
	pub top: T,
	pub right: T,
	pub bottom: T,
}
impl<T: Copy> Rect<T> {
	#[inline]
	pub const fn new(left: T, top: T, right: T, bottom: T) -> Self {
		Self { left, top, right, bottom }
	}

	#[inline]
	pub fn width(&self) -> T
	where
		T: Sub<Output = T>
	{
		self.right - self.left
	}

	#[inline]
	pub fn height(&self) -> T
	where
		T: Sub<Output = T>
	{
		self.bottom - self.top
	}

	#[inline]
	pub fn translate(&self, dx: T, dy: T) -> Self
	where
		T: Add<Output = T>
	{
		Rect {
			left: self.left + dx,
			top: self.top + dy,
			right: self.right + dx,
			bottom: self.bottom + dy
		}
	}
}
impl Rect<i32> {
	/// Expresses this pixel rectangle as fractions of a `w` x `h` area
	#[inline]
	pub fn normalize(&self, w: u32, h: u32) -> Rect<f32> {
		let (w, h) = (w as f32, h as f32);
		Rect {
			left: self.left as f32 / w,
			top: self.top as f32 / h,
			right: self.right as f32 / w,
			bottom: self.bottom as f32 / h
		}
	}
}
impl Rect<f32> {
	/// Inverse of [`Rect::normalize`], truncating towards zero
	#[inline]
	pub fn denormalize(&self, w: u32, h: u32) -> Rect<i32> {
		let (w, h) = (w as f32, h as f32);
		Rect {
			left: (self.left * w) as i32,
			top: (self.top * h) as i32,
			right: (self.right * w) as i32,
			bottom: (self.bottom * h) as i32
		}
	}
}
impl<T: core::fmt::Display + Copy + Sub<Output = T>> core::fmt::Display for Rect<T> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{{X={},Y={},Width={},Height={}}}", self.left, self.top, self.width(), self.height())
	}
}

/// Pixel coordinates are plain integer points, hashable so they can key sets and maps
pub type PixelCoordinate = Point<i32>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Point<T> {
	pub x: T,
	pub y: T,
}
impl<T> Point<T> {
	#[inline]
	pub const fn new(x: T, y: T) -> Self {
		Self { x, y }
	}
}
impl Point<i32> {
	#[inline]
	pub fn dot(&self, other: &Self) -> i64 {
		self.x as i64 * other.x as i64 + self.y as i64 * other.y as i64
	}

	#[inline]
	pub fn length_sqr(&self) -> i64 {
		self.dot(self)
	}

	/// Both axes differ by strictly less than `tolerance`
	#[inline]
	pub fn is_near(&self, other: &Self, tolerance: i32) -> bool {
		self.x.abs_diff(other.x) < tolerance.unsigned_abs() && self.y.abs_diff(other.y) < tolerance.unsigned_abs()
	}
}
impl<T> From<Point<T>> for (T, T) {
	#[inline]
	fn from(pt: Point<T>) -> Self {
		(pt.x, pt.y)
	}
}
impl<T> From<(T, T)> for Point<T> {
	#[inline]
	fn from((x, y): (T, T)) -> Self {
		Point { x, y }
	}
}
impl<T: Sub<T, Output = T>> Sub for Point<T> {
	type Output = Point<T>;

	#[inline]
	fn sub(self, rhs: Self) -> Self::Output {
		Point::new(
			self.x - rhs.x,
			self.y - rhs.y
		)
	}
}

/// A segment between two endpoints. The endpoints are not sorted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Line<T> {
	pub p0: Point<T>,
	pub p1: Point<T>,
}
impl<T> Line<T> {
	#[inline]
	pub const fn new(p0: Point<T>, p1: Point<T>) -> Self {
		Self { p0, p1 }
	}
}
impl Line<i32> {
	#[inline]
	pub fn vector(&self) -> Point<i32> {
		self.p1 - self.p0
	}

	#[inline]
	pub fn length_sqr(&self) -> i64 {
		self.vector().length_sqr()
	}

	#[inline]
	pub fn endpoints(&self) -> [Point<i32>; 2] {
		[self.p0, self.p1]
	}
}
impl core::fmt::Display for Line<i32> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{{{}, {}}} - {{{}, {}}}", self.p0.x, self.p0.y, self.p1.x, self.p1.y)
	}
}

/// Smallest rectangle enclosing every endpoint of `lines`, or `None` if there are no lines
pub fn bounding_box(lines: &[Line<i32>]) -> Option<Rect<i32>> {
	let mut points = lines.iter().flat_map(Line::endpoints);
	let first = points.next()?;

	Some(points.fold(Rect::new(first.x, first.y, first.x, first.y), |rect, pt| Rect {
		left: rect.left.min(pt.x),
		top: rect.top.min(pt.y),
		right: rect.right.max(pt.x),
		bottom: rect.bottom.max(pt.y)
	}))
}
