//! Popup placement relative to the pointer and the viewport.

use crate::domain::{Point, Size};

/// Top-left corner for a popup opened at `pointer`.
///
/// The popup sits `offset` below-right of the pointer. An axis that would
/// overflow flips to the other side of the pointer; the result is then
/// clamped inside the viewport with `margin`.
pub fn place_near_pointer(
    pointer: Point,
    size: Size,
    viewport: Size,
    offset: f64,
    margin: f64,
) -> Point {
    Point::new(
        place_axis(pointer.x, size.width, viewport.width, offset, margin),
        place_axis(pointer.y, size.height, viewport.height, offset, margin),
    )
}

/// Keep a popup fully visible; used while dragging.
pub fn clamp_to_viewport(position: Point, size: Size, viewport: Size, margin: f64) -> Point {
    Point::new(
        clamp_axis(position.x, size.width, viewport.width, margin),
        clamp_axis(position.y, size.height, viewport.height, margin),
    )
}

fn place_axis(pointer: f64, extent: f64, limit: f64, offset: f64, margin: f64) -> f64 {
    let mut start = pointer + offset;
    if start + extent > limit - margin {
        start = pointer - offset - extent;
    }
    clamp_axis(start, extent, limit, margin)
}

// Popups larger than the viewport stick to the top/left margin.
fn clamp_axis(start: f64, extent: f64, limit: f64, margin: f64) -> f64 {
    let max = (limit - margin - extent).max(margin);
    start.clamp(margin, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn below_right_of_pointer() {
        let at = place_near_pointer(Point::new(100.0, 100.0), Size::new(200.0, 150.0), VIEWPORT, 10.0, 10.0);
        assert_eq!(at, Point::new(110.0, 110.0));
    }

    #[test]
    fn flips_on_overflowing_axis_only() {
        let at = place_near_pointer(Point::new(900.0, 100.0), Size::new(200.0, 150.0), VIEWPORT, 10.0, 10.0);
        assert_eq!(at, Point::new(690.0, 110.0));

        let at = place_near_pointer(Point::new(100.0, 750.0), Size::new(200.0, 150.0), VIEWPORT, 10.0, 10.0);
        assert_eq!(at, Point::new(110.0, 590.0));
    }

    #[test]
    fn clamps_when_flip_still_overflows() {
        let at = place_near_pointer(Point::new(50.0, 50.0), Size::new(980.0, 100.0), VIEWPORT, 10.0, 10.0);
        assert_eq!(at.x, 10.0);

        let huge = place_near_pointer(Point::new(500.0, 400.0), Size::new(2000.0, 2000.0), VIEWPORT, 10.0, 10.0);
        assert_eq!(huge, Point::new(10.0, 10.0));
    }

    #[test]
    fn drag_is_clamped() {
        let size = Size::new(200.0, 100.0);
        assert_eq!(
            clamp_to_viewport(Point::new(-50.0, 900.0), size, VIEWPORT, 10.0),
            Point::new(10.0, 690.0)
        );
        assert_eq!(
            clamp_to_viewport(Point::new(300.0, 300.0), size, VIEWPORT, 10.0),
            Point::new(300.0, 300.0)
        );
    }
}
