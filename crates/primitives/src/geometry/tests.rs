use super::{Point, Rect};

#[test]
fn corners_map_to_edges() {
	let rect = Rect::from_corners(Point::new(10, 5), Point::new(40, 25));
	assert_eq!(rect, Rect::new(10, 5, 40, 25));
	assert_eq!(rect.width(), 30);
	assert_eq!(rect.height(), 20);
}

#[test]
fn inverted_rect_has_no_area() {
	let rect = Rect::from_corners(Point::new(40, 25), Point::new(10, 5));
	assert_eq!(rect.width(), 0);
	assert_eq!(rect.height(), 0);
}

#[test]
fn contains_uses_inclusive_origin_exclusive_max() {
	let rect = Rect::new(10, 5, 13, 7);
	assert!(rect.contains(Point::new(10, 5)));
	assert!(rect.contains(Point::new(12, 6)));
	assert!(!rect.contains(Point::new(13, 6)));
	assert!(!rect.contains(Point::new(12, 7)));
}
