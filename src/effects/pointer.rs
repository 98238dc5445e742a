use super::geometry::Point;

/// Half the cursor-trail dot's edge, so the dot centers on the pointer.
pub const CURSOR_DOT_OFFSET: f64 = 4.0;

/// Latest pointer sample for a region. Older samples are discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    latest: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, x: f64, y: f64) -> Point {
        let sample = Point::new(x, y);
        self.latest = Some(sample);
        sample
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<Point> {
        self.latest
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.latest = None;
    }

    pub fn cursor_dot_position(&self) -> Option<Point> {
        self.latest
            .map(|point| Point::new(point.x - CURSOR_DOT_OFFSET, point.y - CURSOR_DOT_OFFSET))
    }
}
