/// Axis-aligned rectangle in frame pixel coordinates.
///
/// `x`/`y` is the top-left corner; the rectangle covers
/// `x..x + width` by `y..y + height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clips the rectangle to a `frame_width` x `frame_height` frame.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Region {
        let x = self.x.min(frame_width);
        let y = self.y.min(frame_height);
        let right = (self.x.saturating_add(self.width)).min(frame_width);
        let bottom = (self.y.saturating_add(self.height)).min(frame_height);
        Region::new(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_frame() {
        let r = Region::new(90, 95, 20, 20).clamp_to(100, 100);
        assert_eq!(r, Region::new(90, 95, 10, 5));
    }

    #[test]
    fn test_clamp_outside_frame_is_empty() {
        let r = Region::new(120, 0, 20, 20).clamp_to(100, 100);
        assert!(r.is_empty());
    }
}
