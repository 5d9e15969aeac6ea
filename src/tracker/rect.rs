/// Axis-aligned bounding box in pixel coordinates.
///
/// Boxes are stored as top-left corner plus dimensions. The position store
/// persists boxes as center plus half-extents, so conversions between the
/// two forms live here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions.
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from its center point and half-extents.
    #[inline]
    pub fn from_center_extents(cx: f32, cy: f32, half_w: f32, half_h: f32) -> Self {
        Self {
            x: cx - half_w,
            y: cy - half_h,
            width: 2.0 * half_w,
            height: 2.0 * half_h,
        }
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the half-extents (half width, half height) of the bounding box.
    #[inline]
    pub fn half_extents(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// A box with zero or negative width or height selects nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow the box by a margin on each side, keeping the center fixed.
    #[inline]
    pub fn inflate(&self, margin_x: f32, margin_y: f32) -> Self {
        Self {
            x: self.x - margin_x,
            y: self.y - margin_y,
            width: self.width + 2.0 * margin_x,
            height: self.height + 2.0 * margin_y,
        }
    }

    /// Intersect with another box. Returns `None` when the boxes are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_extents_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        assert_eq!(rect.center(), (25.0, 40.0));
        assert_eq!(rect.half_extents(), (15.0, 20.0));
    }

    #[test]
    fn test_from_center_extents() {
        let rect = Rect::from_center_extents(25.0, 40.0, 15.0, 20.0);
        assert!((rect.x - 10.0).abs() < 1e-6);
        assert!((rect.y - 20.0).abs() < 1e-6);
        assert!((rect.width - 30.0).abs() < 1e-6);
        assert!((rect.height - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_is_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(!Rect::new(5.0, 5.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_inflate_keeps_center() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        let grown = rect.inflate(5.0, 3.0);
        assert_eq!(grown.center(), rect.center());
        assert_eq!(grown.width, 30.0);
        assert_eq!(grown.height, 26.0);
    }

    #[test]
    fn test_intersect_overlapping() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);

        let inter = a.intersect(&b).unwrap();
        assert_eq!(inter.x, 5.0);
        assert_eq!(inter.y, 5.0);
        assert_eq!(inter.width, 5.0);
        assert_eq!(inter.height, 5.0);
    }

    #[test]
    fn test_intersect_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn test_intersect_touching_edge() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(&b).is_none());
    }
}
