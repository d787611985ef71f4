use std::ops::{Add, Sub};

/// An axis-aligned rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Copy + Add<Output = T>> Rect<T> {
    /// Exclusive right edge.
    pub fn right(&self) -> T {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> T {
        self.y + self.height
    }
}

impl<T: Copy + PartialOrd + Add<Output = T>> Rect<T> {
    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: T, y: T) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

impl<T> Rect<T>
where
    T: Copy + Ord + Add<Output = T> + Sub<Output = T>,
{
    /// Overlap of two rectangles, or `None` when they do not share any area.
    pub fn intersection(&self, other: &Rect<T>) -> Option<Rect<T>> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl Size<f32> {
    /// Per-axis maximum of two sizes.
    pub fn max(self, other: Size<f32>) -> Size<f32> {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// A square whose side is the larger of the two dimensions.
    pub fn squared(self) -> Size<f32> {
        let side = self.width.max(self.height);
        Size::new(side, side)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Round both dimensions up to whole pixels.
    pub fn ceil_u32(self) -> Size<u32> {
        Size::new(
            self.width.ceil().max(0.0) as u32,
            self.height.ceil().max(0.0) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_contains() {
        let rect = Rect::new(-1, -1, 12, 9);
        assert_eq!(rect.right(), 11);
        assert_eq!(rect.bottom(), 8);
        assert!(rect.contains(-1, -1));
        assert!(rect.contains(10, 7));
        assert!(!rect.contains(11, 0));
        assert!(!rect.contains(0, 8));
    }

    #[test]
    fn test_rect_intersection() {
        let grid = Rect::new(0, 0, 100, 100);
        let view = Rect::new(-5, 90, 20, 20);
        assert_eq!(grid.intersection(&view), Some(Rect::new(0, 90, 15, 10)));

        let far = Rect::new(500, 500, 10, 10);
        assert_eq!(grid.intersection(&far), None);
    }

    #[test]
    fn test_size_max_and_squared() {
        let a = Size::new(6.0, 10.0);
        let b = Size::new(8.0, 4.0);
        assert_eq!(a.max(b), Size::new(8.0, 10.0));
        assert_eq!(a.squared(), Size::new(10.0, 10.0));
        assert!(a.squared().is_square());
    }

    #[test]
    fn test_size_ceil() {
        assert_eq!(Size::new(6.2, 9.0).ceil_u32(), Size::new(7, 9));
        assert_eq!(Size::new(-1.0, 0.0).ceil_u32(), Size::new(0, 0));
    }
}
