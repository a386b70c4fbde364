//! Emitter: path elements → SVG path data.
//!
//! Writes absolute `M`, `L`, `Q` and `Z` commands separated by single
//! spaces, with the first number right after the command letter (`M0 0`).
//! Numbers use the shortest text that parses back to the same `f32`, so
//! `parse_path_data(emit_path_data(e))` reproduces `e` exactly for finite
//! coordinates. Node sequences reject non-finite positions, so compiled
//! paths always qualify.

use crate::model::{PathElement, Point};
use std::fmt::Write;

/// Emit `elements` as an SVG `d` attribute value.
#[must_use]
pub fn emit_path_data(elements: &[PathElement]) -> String {
    let mut out = String::with_capacity(elements.len() * 16);
    for element in elements {
        if !out.is_empty() {
            out.push(' ');
        }
        match *element {
            PathElement::Move(p) => {
                out.push('M');
                write_point(&mut out, p);
            }
            PathElement::Line(p) => {
                out.push('L');
                write_point(&mut out, p);
            }
            PathElement::QuadCurve { ctrl, to } => {
                out.push('Q');
                write_point(&mut out, ctrl);
                out.push(' ');
                write_point(&mut out, to);
            }
            PathElement::Close => out.push('Z'),
        }
    }
    out
}

fn write_point(out: &mut String, p: Point) {
    let _ = write!(out, "{} {}", format_num(p.x), format_num(p.y));
}

/// Integral values print without a fraction; everything else uses the
/// shortest round-trip representation.
fn format_num(n: f32) -> String {
    if n == n.trunc() && n.abs() < 1e9 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn emits_all_kinds() {
        let elements = [
            PathElement::Move(Point::new(0.0, 0.0)),
            PathElement::Line(Point::new(10.0, -2.5)),
            PathElement::QuadCurve {
                ctrl: Point::new(15.0, 5.0),
                to: Point::new(20.0, 0.0),
            },
            PathElement::Close,
        ];
        assert_eq!(
            emit_path_data(&elements),
            "M0 0 L10 -2.5 Q15 5 20 0 Z"
        );
    }

    #[test]
    fn negative_first_coordinate_follows_letter() {
        let elements = [
            PathElement::Move(Point::new(-1.5, 2.0)),
            PathElement::Line(Point::new(-3.0, -4.0)),
        ];
        let text = emit_path_data(&elements);
        assert_eq!(text, "M-1.5 2 L-3 -4");
        assert_eq!(crate::parser::parse_path_data(&text).unwrap(), elements);
    }

    #[test]
    fn empty_list_emits_empty_string() {
        assert_eq!(emit_path_data(&[]), "");
    }

    #[test]
    fn fractional_numbers_are_exact() {
        let x = 0.1f32 + 0.2f32;
        let text = format_num(x);
        assert_eq!(text.parse::<f32>().unwrap(), x);
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_num(-0.0), "0");
    }
}
