use serde::{Deserialize, Serialize};

/// Size of one input image, in pixels. Never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectSize {
    pub width: u32,
    pub height: u32,
}

impl RectSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    /// Pixel area, widened so large inputs cannot overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
    /// The longer of the two sides.
    pub fn longest_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// A [`RectSize`] tagged with its position in the caller's input list, so the
/// caller-visible identifier can be recovered after ranking reorders inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedRectSize {
    pub index: usize,
    pub size: RectSize,
}

/// Axis-aligned rectangle in sheet space, half-open on the right and bottom:
/// `width = right - left`, `height = bottom - top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Coordinates {
    pub fn new(left: i64, right: i64, top: i64, bottom: i64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
    pub fn width(&self) -> i64 {
        self.right - self.left
    }
    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
    /// Signed area; degenerate regions report zero or negative.
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }
    /// True when the two rectangles share interior pixels.
    pub fn collides(&self, other: &Coordinates) -> bool {
        !(self.right <= other.left
            || self.bottom <= other.top
            || other.right <= self.left
            || other.bottom <= self.top)
    }
    /// True when `self` collides with any rectangle in `list`.
    pub fn collides_any(&self, list: &[Coordinates]) -> bool {
        list.iter().any(|c| self.collides(c))
    }
    /// The shared region of two colliding rectangles.
    pub fn overlap(&self, other: &Coordinates) -> Coordinates {
        Coordinates::new(
            self.left.max(other.left),
            self.right.min(other.right),
            self.top.max(other.top),
            self.bottom.min(other.bottom),
        )
    }
    /// The same rectangle shifted by `(dx, dy)`; width and height are kept.
    pub fn translated(&self, dx: i64, dy: i64) -> Coordinates {
        Coordinates::new(
            self.left + dx,
            self.right + dx,
            self.top + dy,
            self.bottom + dy,
        )
    }
}

/// One resolved placement in the final sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasEntry {
    /// User-specified key (e.g., filename or asset path).
    pub key: String,
    /// Region of the sheet holding this image, in final sheet pixel space.
    pub rect: Coordinates,
}

/// The final atlas map: sheet dimensions plus one region per input key.
/// Produced once per packing run and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasLayout {
    pub width: u32,
    pub height: u32,
    /// Entries in the caller's input order.
    pub entries: Vec<AtlasEntry>,
}

impl AtlasLayout {
    /// Fraction of the sheet covered by placed images (0.0 to 1.0).
    pub fn occupancy(&self) -> f64 {
        let total = self.width as u64 * self.height as u64;
        if total == 0 {
            return 0.0;
        }
        let used: u64 = self
            .entries
            .iter()
            .map(|e| e.rect.area().max(0) as u64)
            .sum();
        used as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_is_half_open() {
        let a = Coordinates::new(0, 10, 0, 10);
        let b = Coordinates::new(10, 20, 0, 10);
        assert!(!a.collides(&b));
        let c = Coordinates::new(9, 20, 0, 10);
        assert!(a.collides(&c));
        assert!(c.collides(&a));
    }

    #[test]
    fn overlap_of_colliding_rects() {
        let a = Coordinates::new(0, 10, 0, 10);
        let b = Coordinates::new(5, 15, 3, 8);
        assert_eq!(a.overlap(&b), Coordinates::new(5, 10, 3, 8));
    }

    #[test]
    fn translated_keeps_dimensions() {
        let a = Coordinates::new(2, 7, 3, 9);
        let t = a.translated(-1, -2);
        assert_eq!((t.width(), t.height()), (a.width(), a.height()));
        assert_eq!((t.left, t.top), (1, 1));
    }
}
