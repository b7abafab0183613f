//! Attribute micro-grammars.
//!
//! ```text
//! transform := ws* name ws* "(" ws* number (ws+ number)? ws* ")" ws*
//!              rotate and scale take one number, translate exactly two
//! origin    := ws* number ws+ number ws*
//! points    := ws* (pair (ws+ pair)*)? ws*
//! pair      := integer "," ws* integer
//! ```

use crate::geometry::Point;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unrecognized transform '{0}'")]
    Transform(String),

    #[error("malformed transform origin '{0}'")]
    Origin(String),

    #[error("malformed point '{0}'")]
    Point(String),
}

/// The single transform an element may carry
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transform {
    #[default]
    Identity,
    Rotate(f64),
    Translate(Point),
    Scale(f64),
}

impl Transform {
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        let err = || SyntaxError::Transform(input.trim().to_string());
        let mut s = Scanner::new(input);

        s.skip_ws();
        let name = s.ident().ok_or_else(err)?;
        s.skip_ws();
        if !s.eat('(') {
            return Err(err());
        }
        s.skip_ws();
        let mut args = Vec::with_capacity(2);
        while let Some(n) = s.number() {
            args.push(n);
            let gap = s.skip_ws();
            if s.peek() == Some(')') {
                break;
            }
            if !gap {
                return Err(err());
            }
        }
        if !s.eat(')') {
            return Err(err());
        }
        s.skip_ws();
        if !s.is_at_end() {
            return Err(err());
        }

        match (name, args.as_slice()) {
            ("rotate", [degrees]) => Ok(Self::Rotate(*degrees)),
            ("translate", [x, y]) => Ok(Self::Translate(Point::new(*x, *y))),
            ("scale", [factor]) => Ok(Self::Scale(*factor)),
            _ => Err(err()),
        }
    }
}

/// Parse a `transform_origin` value such as `"20 -5"`.
pub fn parse_origin(input: &str) -> Result<Point, SyntaxError> {
    let err = || SyntaxError::Origin(input.trim().to_string());
    let mut s = Scanner::new(input);

    s.skip_ws();
    let x = s.number().ok_or_else(err)?;
    if !s.skip_ws() {
        return Err(err());
    }
    let y = s.number().ok_or_else(err)?;
    s.skip_ws();
    if !s.is_at_end() {
        return Err(err());
    }
    Ok(Point::new(x, y))
}

/// Parse a `points` value such as `"0,150 0,200 50,200"`.
///
/// The error carries the whitespace-delimited chunk that failed to parse.
pub fn parse_points(input: &str) -> Result<Vec<Point>, SyntaxError> {
    let mut s = Scanner::new(input);
    let mut points = Vec::new();

    s.skip_ws();
    while !s.is_at_end() {
        let start = s.pos;
        let pair = s.integer().and_then(|x| {
            if !s.eat(',') {
                return None;
            }
            s.skip_ws();
            let y = s.integer()?;
            // A pair ends at whitespace or at the end of the input.
            (s.skip_ws() || s.is_at_end()).then_some((x, y))
        });
        match pair {
            Some(xy) => points.push(Point::from(xy)),
            None => return Err(SyntaxError::Point(s.chunk_from(start).to_string())),
        }
    }

    log::trace!("Parsed {} points", points.len());
    Ok(points)
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Returns whether anything was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while let Some(ch) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += ch.len_utf8();
        }
        self.pos > start
    }

    fn take_while(&mut self, f: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let len = self.rest().bytes().take_while(|b| f(*b)).count();
        self.pos += len;
        &self.input[start..self.pos]
    }

    fn ident(&mut self) -> Option<&'a str> {
        let name = self.take_while(|b| b.is_ascii_alphabetic());
        (!name.is_empty()).then_some(name)
    }

    fn sign(&mut self) {
        if !self.eat('-') {
            self.eat('+');
        }
    }

    fn integer(&mut self) -> Option<i64> {
        let start = self.pos;
        self.sign();
        if self.take_while(|b| b.is_ascii_digit()).is_empty() {
            self.pos = start;
            return None;
        }
        self.input[start..self.pos].parse().ok()
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        self.sign();
        let mut digits = self.take_while(|b| b.is_ascii_digit()).len();
        if self.eat('.') {
            digits += self.take_while(|b| b.is_ascii_digit()).len();
        }
        if digits == 0 {
            self.pos = start;
            return None;
        }

        // Exponent only when digits follow, so "2e" stops before the 'e'.
        let mantissa_end = self.pos;
        if self.eat('e') || self.eat('E') {
            self.sign();
            if self.take_while(|b| b.is_ascii_digit()).is_empty() {
                self.pos = mantissa_end;
            }
        }
        self.input[start..self.pos].parse().ok()
    }

    fn chunk_from(&self, start: usize) -> &'a str {
        let tail = &self.input[start..];
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        &tail[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_forms() {
        assert_eq!(Transform::parse("rotate(90)"), Ok(Transform::Rotate(90.0)));
        assert_eq!(Transform::parse("scale(2)"), Ok(Transform::Scale(2.0)));
        assert_eq!(
            Transform::parse("translate(10 -20)"),
            Ok(Transform::Translate(Point::new(10.0, -20.0)))
        );
    }

    #[test]
    fn tolerates_inner_and_outer_whitespace() {
        assert_eq!(
            Transform::parse("  translate ( 1.5   2 ) "),
            Ok(Transform::Translate(Point::new(1.5, 2.0)))
        );
        assert_eq!(Transform::parse("rotate( -45 )"), Ok(Transform::Rotate(-45.0)));
        assert_eq!(Transform::parse("scale(.5)"), Ok(Transform::Scale(0.5)));
        assert_eq!(Transform::parse("scale(1e1)"), Ok(Transform::Scale(10.0)));
    }

    #[test]
    fn rejects_everything_else() {
        for bad in [
            "",
            "rotate",
            "rotate()",
            "rotate(90",
            "rotate(90 45)",
            "translate(10)",
            "translate(10,20)",
            "translate(10 20 30)",
            "scale(2) rotate(5)",
            "skewX(10)",
            "matrix(1 0 0 1 0 0)",
            "Rotate(90)",
            "scale(x)",
        ] {
            assert_eq!(
                Transform::parse(bad),
                Err(SyntaxError::Transform(bad.trim().to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn origin_needs_two_numbers() {
        assert_eq!(parse_origin("20 -5"), Ok(Point::new(20.0, -5.0)));
        assert_eq!(parse_origin(" 0\t0 "), Ok(Point::ORIGIN));
        assert!(parse_origin("20").is_err());
        assert!(parse_origin("20,5").is_err());
        assert!(parse_origin("1 2 3").is_err());
    }

    #[test]
    fn points_split_on_whitespace() {
        let points = parse_points("0,150 0,200\n  50,-200 ").unwrap();
        assert_eq!(
            points,
            vec![
                Point::new(0.0, 150.0),
                Point::new(0.0, 200.0),
                Point::new(50.0, -200.0)
            ]
        );
        assert_eq!(parse_points("   "), Ok(vec![]));
    }

    #[test]
    fn space_after_comma_is_allowed() {
        assert_eq!(
            parse_points("0, 150 10,\t20"),
            Ok(vec![Point::new(0.0, 150.0), Point::new(10.0, 20.0)])
        );
        assert_eq!(parse_points("0 ,150"), Err(SyntaxError::Point("0".to_string())));
    }

    #[test]
    fn malformed_pair_is_named() {
        assert_eq!(
            parse_points("0,0 10;5 20,20"),
            Err(SyntaxError::Point("10;5".to_string()))
        );
        assert_eq!(
            parse_points("0,0 1,2,3"),
            Err(SyntaxError::Point("1,2,3".to_string()))
        );
        assert_eq!(
            parse_points("1.5,2"),
            Err(SyntaxError::Point("1.5,2".to_string()))
        );
        assert_eq!(parse_points("7,"), Err(SyntaxError::Point("7,".to_string())));
    }
}
