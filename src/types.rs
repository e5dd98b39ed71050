#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub fn from_heading(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Vector2D::new(radians.cos(), radians.sin())
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_squared(&self, other: Vector2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    // Whole-unit step: each axis truncated toward zero.
    pub fn truncated(&self) -> Self {
        Vector2D::new(self.x.trunc(), self.y.trunc())
    }
}

// Edge wrap: past the far edge resets to 0, below 0 resets to the far edge.
// Values exactly on either edge are left alone.
pub fn wrap_edge(value: f64, max: f64) -> f64 {
    if value > max {
        0.0
    } else if value < 0.0 {
        max
    } else {
        value
    }
}

pub fn out_of_bounds(position: Vector2D, width: f64, height: f64) -> bool {
    position.x > width || position.x < 0.0 || position.y > height || position.y < 0.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        FrameRect { x, y, width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_edge_resets_to_opposite_edge_value() {
        assert_eq!(wrap_edge(1201.0, 1200.0), 0.0);
        assert_eq!(wrap_edge(-3.0, 1200.0), 1200.0);
        assert_eq!(wrap_edge(600.0, 1200.0), 600.0);
    }

    #[test]
    fn wrap_edge_keeps_values_on_the_edge() {
        assert_eq!(wrap_edge(1200.0, 1200.0), 1200.0);
        assert_eq!(wrap_edge(0.0, 1200.0), 0.0);
    }

    #[test]
    fn out_of_bounds_checks_each_axis() {
        assert!(out_of_bounds(Vector2D::new(1205.0, 400.0), 1200.0, 800.0));
        assert!(out_of_bounds(Vector2D::new(10.0, -1.0), 1200.0, 800.0));
        assert!(!out_of_bounds(Vector2D::new(1200.0, 800.0), 1200.0, 800.0));
    }

    #[test]
    fn truncation_rounds_toward_zero() {
        assert_eq!(Vector2D::new(3.9, -3.9).truncated(), Vector2D::new(3.0, -3.0));
    }

    #[test]
    fn heading_zero_points_right() {
        let v = Vector2D::from_heading(0.0);
        assert!((v.x - 1.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
    }
}
