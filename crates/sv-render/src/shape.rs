//! Path elements → kurbo geometry for the rendering layer.
//!
//! The editor hands compiled elements to whatever draws the canvas; these
//! adapters turn them into `kurbo::BezPath`s (the curve itself and the
//! control polygon drawn underneath it) and answer simple geometric queries.

use kurbo::{BezPath, ParamCurveNearest, Point, Rect, Shape};
use sv_core::model::{PathElement, Point as SvPoint};

/// Tolerance used when measuring distance to curved segments.
const NEAREST_ACCURACY: f64 = 1e-3;

fn kp(p: SvPoint) -> Point {
    Point::new(p.x as f64, p.y as f64)
}

/// Build the renderable curve.
pub fn to_bez_path(elements: &[PathElement]) -> BezPath {
    let mut bez = BezPath::new();
    for element in elements {
        match *element {
            PathElement::Move(p) => bez.move_to(kp(p)),
            PathElement::Line(p) => bez.line_to(kp(p)),
            PathElement::QuadCurve { ctrl, to } => bez.quad_to(kp(ctrl), kp(to)),
            PathElement::Close => bez.close_path(),
        }
    }
    bez
}

/// Polyline through every on-curve and control point, in path order.
pub fn control_polygon(elements: &[PathElement]) -> BezPath {
    let mut bez = BezPath::new();
    for element in elements {
        match *element {
            PathElement::Move(p) => bez.move_to(kp(p)),
            PathElement::Line(p) => bez.line_to(kp(p)),
            PathElement::QuadCurve { ctrl, to } => {
                bez.line_to(kp(ctrl));
                bez.line_to(kp(to));
            }
            PathElement::Close => bez.close_path(),
        }
    }
    bez
}

/// Tight bounds of the curve, or `None` for an empty path.
pub fn bounding_box(elements: &[PathElement]) -> Option<Rect> {
    if elements.is_empty() {
        return None;
    }
    Some(to_bez_path(elements).bounding_box())
}

/// Shortest distance from `(x, y)` to the drawn curve.
/// `None` when the path has no segments.
pub fn distance_to_path(elements: &[PathElement], x: f32, y: f32) -> Option<f64> {
    let target = Point::new(x as f64, y as f64);
    to_bez_path(elements)
        .segments()
        .map(|seg| seg.nearest(target, NEAREST_ACCURACY).distance_sq)
        .min_by(f64::total_cmp)
        .map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;
    use pretty_assertions::assert_eq;

    fn p(x: f32, y: f32) -> SvPoint {
        SvPoint::new(x, y)
    }

    fn arch() -> Vec<PathElement> {
        vec![
            PathElement::Move(p(0.0, 0.0)),
            PathElement::QuadCurve {
                ctrl: p(10.0, 20.0),
                to: p(20.0, 0.0),
            },
            PathElement::Line(p(30.0, 0.0)),
        ]
    }

    #[test]
    fn bez_path_mirrors_elements() {
        let bez = to_bez_path(&arch());
        assert_eq!(
            bez.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::QuadTo(Point::new(10.0, 20.0), Point::new(20.0, 0.0)),
                PathEl::LineTo(Point::new(30.0, 0.0)),
            ]
        );
    }

    #[test]
    fn control_polygon_visits_control_points() {
        let poly = control_polygon(&arch());
        assert_eq!(poly.elements().len(), 4);
        assert_eq!(poly.elements()[1], PathEl::LineTo(Point::new(10.0, 20.0)));
    }

    #[test]
    fn bounding_box_of_quad_stops_at_apex() {
        let rect = bounding_box(&arch()).unwrap();
        assert!((rect.y1 - 10.0).abs() < 1e-9, "apex of the quad is y=10");
        assert_eq!(rect.x0, 0.0);
        assert_eq!(rect.x1, 30.0);
        assert_eq!(bounding_box(&[]), None);
    }

    #[test]
    fn distance_to_line_segment() {
        let d = distance_to_path(&arch(), 25.0, 4.0).unwrap();
        assert!((d - 4.0).abs() < 1e-6);
        assert_eq!(distance_to_path(&[PathElement::Move(p(0.0, 0.0))], 1.0, 1.0), None);
    }
}
