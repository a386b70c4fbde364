//! Parser for SVG path data → path elements.
//!
//! Built on `winnow` 0.7. Handles the subset of the SVG path grammar that the
//! element vocabulary can express: `M L H V Q T Z` in absolute and relative
//! form, comma or whitespace separators, implicit command repetition, and
//! numbers with exponents. Cubic and arc commands are rejected.

use crate::error::PathError;
use crate::model::{PathElement, Point};
use winnow::combinator::{opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Parse an SVG `d` attribute value.
///
/// # Errors
/// `PathError::Parse` on malformed or non-finite numbers, unsupported
/// commands, or data
/// that does not begin with a moveto.
pub fn parse_path_data(input: &str) -> Result<Vec<PathElement>, PathError> {
    let mut rest = input;
    let mut elements = Vec::new();
    let mut pen = Pen::default();
    let mut active: Option<char> = None;

    loop {
        skip_separators(&mut rest);
        if rest.is_empty() {
            break;
        }

        let cmd = if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            command
                .parse_next(&mut rest)
                .map_err(|_| parse_error("expected a command", rest))?
        } else {
            // Bare coordinates repeat the previous command; after a moveto
            // they are implicit linetos.
            match active {
                Some('M') => 'L',
                Some('m') => 'l',
                Some('Z' | 'z') | None => return Err(parse_error("expected a command", rest)),
                Some(c) => c,
            }
        };

        if active.is_none() && !matches!(cmd, 'M' | 'm') {
            return Err(parse_error("path data must begin with a moveto", rest));
        }

        let relative = cmd.is_ascii_lowercase();
        match cmd.to_ascii_uppercase() {
            'M' => {
                let p = pen.resolve(coordinate_pair(&mut rest)?, relative);
                elements.push(PathElement::Move(p));
                pen.start = p;
                pen.move_to(p);
            }
            'L' => {
                let p = pen.resolve(coordinate_pair(&mut rest)?, relative);
                elements.push(PathElement::Line(p));
                pen.move_to(p);
            }
            'H' => {
                let x = coordinate(&mut rest)?;
                let x = if relative { pen.current.x + x } else { x };
                let p = Point::new(x, pen.current.y);
                elements.push(PathElement::Line(p));
                pen.move_to(p);
            }
            'V' => {
                let y = coordinate(&mut rest)?;
                let y = if relative { pen.current.y + y } else { y };
                let p = Point::new(pen.current.x, y);
                elements.push(PathElement::Line(p));
                pen.move_to(p);
            }
            'Q' => {
                let ctrl = pen.resolve(coordinate_pair(&mut rest)?, relative);
                let to = pen.resolve(coordinate_pair(&mut rest)?, relative);
                elements.push(PathElement::QuadCurve { ctrl, to });
                pen.quad_to(ctrl, to);
            }
            'T' => {
                let ctrl = match pen.last_ctrl {
                    Some(c) => Point::new(
                        2.0 * pen.current.x - c.x,
                        2.0 * pen.current.y - c.y,
                    ),
                    None => pen.current,
                };
                let to = pen.resolve(coordinate_pair(&mut rest)?, relative);
                elements.push(PathElement::QuadCurve { ctrl, to });
                pen.quad_to(ctrl, to);
            }
            'Z' => {
                elements.push(PathElement::Close);
                let start = pen.start;
                pen.move_to(start);
            }
            other => {
                return Err(PathError::Parse(format!(
                    "unsupported path command '{other}'"
                )));
            }
        }
        active = Some(cmd);
    }

    log::trace!("parsed {} path elements", elements.len());
    Ok(elements)
}

/// Current point, subpath start, and the control point available for `T`.
#[derive(Default)]
struct Pen {
    current: Point,
    start: Point,
    last_ctrl: Option<Point>,
}

impl Pen {
    fn resolve(&self, p: Point, relative: bool) -> Point {
        if relative {
            p.translate(self.current.x, self.current.y)
        } else {
            p
        }
    }

    fn move_to(&mut self, p: Point) {
        self.current = p;
        self.last_ctrl = None;
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.current = to;
        self.last_ctrl = Some(ctrl);
    }
}

fn parse_error(message: &str, rest: &str) -> PathError {
    let snippet: String = rest.chars().take(16).collect();
    if snippet.is_empty() {
        PathError::Parse(format!("{message} at end of input"))
    } else {
        PathError::Parse(format!("{message} near `{snippet}`"))
    }
}

fn skip_separators(input: &mut &str) {
    *input = input.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
}

fn command(input: &mut &str) -> ModalResult<char> {
    one_of(|c: char| c.is_ascii_alphabetic()).parse_next(input)
}

fn separator(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace() || c == ',')
        .void()
        .parse_next(input)
}

fn coordinate(input: &mut &str) -> Result<f32, PathError> {
    let before = *input;
    preceded(separator, number)
        .parse_next(input)
        .map_err(|_| parse_error("expected a number", before))
}

fn coordinate_pair(input: &mut &str) -> Result<Point, PathError> {
    let x = coordinate(input)?;
    let y = coordinate(input)?;
    Ok(Point::new(x, y))
}

/// `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`
fn number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    let _ = opt(one_of::<_, _, ErrMode<ContextError>>(['+', '-'])).parse_next(input)?;
    let int = take_while::<_, _, ErrMode<ContextError>>(0.., |c: char| c.is_ascii_digit())
        .parse_next(input)?;
    let frac = opt(preceded(
        '.',
        take_while::<_, _, ErrMode<ContextError>>(0.., |c: char| c.is_ascii_digit()),
    ))
    .parse_next(input)?;
    if int.is_empty() && frac.is_none_or(str::is_empty) {
        *input = start;
        return Err(ErrMode::Backtrack(ContextError::new()));
    }

    // An exponent only counts if digits follow; otherwise `e` is left alone.
    if let Some(after_e) = input.strip_prefix(['e', 'E']) {
        let after_sign = after_e.strip_prefix(['+', '-']).unwrap_or(after_e);
        let digits = after_sign.len()
            - after_sign
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .len();
        if digits > 0 {
            *input = &after_sign[digits..];
        }
    }

    let matched = &start[..start.len() - input.len()];
    match matched.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ErrMode::Backtrack(ContextError::new())),
    }
}
