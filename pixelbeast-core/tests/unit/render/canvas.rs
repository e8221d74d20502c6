use super::*;

const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);

#[test]
fn rejects_zero_and_oversized_sides() {
    assert!(RasterCanvas::new(0).is_err());
    assert!(RasterCanvas::new(70_000).is_err());
    assert_eq!(RasterCanvas::new(32).unwrap().side(), 32);
}

#[test]
fn empty_canvas_is_transparent() {
    let img = RasterCanvas::new(4).unwrap().finish().unwrap();
    assert_eq!(img.width, 4);
    assert_eq!(img.height, 4);
    assert!(img.data.iter().all(|b| *b == 0));
}

#[test]
fn rect_box_is_inclusive() {
    let mut c = RasterCanvas::new(8).unwrap();
    c.fill_rect(2, 2, 3, 3, RED);
    let img = c.finish().unwrap();
    for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
        assert_eq!(img.pixel(x, y), Some(RED), "({x},{y})");
    }
    for (x, y) in [(1, 2), (4, 3), (2, 1), (3, 4)] {
        assert_eq!(img.pixel(x, y).unwrap().a, 0, "({x},{y})");
    }
}

#[test]
fn later_layers_paint_over_earlier_ones() {
    let mut c = RasterCanvas::new(8).unwrap();
    c.fill_rect(0, 0, 7, 7, RED);
    c.fill_rect(0, 0, 3, 7, BLUE);
    let img = c.finish().unwrap();
    assert_eq!(img.pixel(1, 1), Some(BLUE));
    assert_eq!(img.pixel(6, 1), Some(RED));
}

#[test]
fn ellipse_fills_center_not_corners() {
    let mut c = RasterCanvas::new(16).unwrap();
    c.fill_ellipse(2, 2, 13, 13, RED);
    let img = c.finish().unwrap();
    assert_eq!(img.pixel(8, 8), Some(RED));
    assert_eq!(img.pixel(2, 2).unwrap().a, 0);
    assert_eq!(img.pixel(13, 13).unwrap().a, 0);
}

#[test]
fn polygon_fills_interior() {
    let mut c = RasterCanvas::new(16).unwrap();
    c.polygon(&[(1, 1), (14, 1), (1, 14)], BLUE, Some(RED));
    let img = c.finish().unwrap();
    assert_eq!(img.pixel(4, 4), Some(BLUE));
    assert_eq!(img.pixel(14, 14).unwrap().a, 0);
}

#[test]
fn translucent_fill_unpremultiplies() {
    let mut c = RasterCanvas::new(4).unwrap();
    c.fill_rect(0, 0, 3, 3, Rgba8::new(200, 100, 50, 128));
    let px = c.finish().unwrap().pixel(1, 1).unwrap();
    assert_eq!(px.a, 128);
    assert!((i32::from(px.r) - 200).abs() <= 2);
    assert!((i32::from(px.g) - 100).abs() <= 2);
    assert!((i32::from(px.b) - 50).abs() <= 2);
}

#[test]
fn lines_and_arcs_leave_marks() {
    let mut c = RasterCanvas::new(16).unwrap();
    c.polyline(&[(2, 8), (13, 8)], RED, 2.0);
    c.arc((2, 2, 13, 13), 0.0, 180.0, BLUE, 2.0);
    let img = c.finish().unwrap();
    assert!(img.pixel(7, 8).unwrap().a > 0);
    // Lower half of the arc passes near the bottom center.
    assert!(img.pixel(7, 13).unwrap().a > 0 || img.pixel(8, 13).unwrap().a > 0);
    // Upper half is not drawn.
    assert_eq!(img.pixel(7, 2).unwrap().a, 0);
}

#[test]
fn degenerate_shapes_are_ignored() {
    let mut c = RasterCanvas::new(4).unwrap();
    c.polygon(&[(1, 1)], RED, None);
    c.polyline(&[], RED, 1.0);
    let img = c.finish().unwrap();
    assert!(img.data.iter().all(|b| *b == 0));
}
