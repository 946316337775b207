//! Point list parsing.
//!
//! Grammar:
//!
//! ```text
//! list  := open? point ("," point)* close?
//! point := "(" number "," number ")"
//! open  := "[" | "("          close := "]" | ")"
//! ```
//!
//! Whitespace is allowed around every token. Parsing never fails loudly:
//! malformed input produces an empty list.

use tracing::debug;

use crate::domain::SamplePoint;

/// Parse a point list whose surrounding `[...]` or `(...)` is optional.
///
/// The whole input must be consumed, apart from surrounding whitespace.
pub fn parse_points(input: &str) -> Vec<SamplePoint> {
    let mut cursor = Cursor::new(input, 0);
    let parsed = cursor.lenient_list().filter(|_| {
        cursor.skip_ws();
        cursor.at_end()
    });
    unwrap_or_log(parsed, input)
}

/// Parse a point list that must open with `[` or `(` at byte offset `from`
/// (after optional whitespace). Text after the matching closer is ignored.
pub fn parse_points_from(input: &str, from: usize) -> Vec<SamplePoint> {
    if !input.is_char_boundary(from) {
        debug!(from, len = input.len(), "point list offset is outside the input");
        return Vec::new();
    }
    let mut cursor = Cursor::new(input, from);
    let parsed = cursor.bracketed_list();
    unwrap_or_log(parsed, input)
}

fn unwrap_or_log(parsed: Option<Vec<SamplePoint>>, input: &str) -> Vec<SamplePoint> {
    parsed.unwrap_or_else(|| {
        debug!(input, "unparseable point list");
        Vec::new()
    })
}

/// Parse a single `(x,y)` point, surrounded by optional whitespace.
pub(crate) fn parse_point(input: &str) -> Option<SamplePoint> {
    let mut cursor = Cursor::new(input, 0);
    let point = cursor.point()?;
    cursor.skip_ws();
    cursor.at_end().then_some(point)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self { src, pos }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, ch: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')' | '[' | ']'))
            .unwrap_or(rest.len());
        let value = rest[..len].parse::<f64>().ok()?;
        self.pos += len;
        Some(value)
    }

    fn point(&mut self) -> Option<SamplePoint> {
        if !self.eat('(') {
            return None;
        }
        let x = self.number()?;
        if !self.eat(',') {
            return None;
        }
        let y = self.number()?;
        if !self.eat(')') {
            return None;
        }
        Some(SamplePoint::new(x, y))
    }

    /// Points separated by commas, up to `close` (consumed) or end of input.
    fn points_until(&mut self, close: Option<char>) -> Option<Vec<SamplePoint>> {
        let mut points = Vec::new();
        if let Some(close) = close
            && self.eat(close)
        {
            return Some(points);
        }
        loop {
            points.push(self.point()?);
            if self.eat(',') {
                continue;
            }
            return match close {
                Some(close) => self.eat(close).then_some(points),
                None => {
                    self.skip_ws();
                    self.at_end().then_some(points)
                }
            };
        }
    }

    fn lenient_list(&mut self) -> Option<Vec<SamplePoint>> {
        self.skip_ws();
        if self.at_end() {
            return Some(Vec::new());
        }
        match self.peek() {
            Some('[') => {
                self.pos += 1;
                self.points_until(Some(']'))
            }
            // `((1,2),...)` or `()`; a lone `(1,2)` is a point, not a wrapper.
            Some('(') if self.opens_wrapper() => {
                self.pos += 1;
                self.points_until(Some(')'))
            }
            _ => self.points_until(None),
        }
    }

    fn bracketed_list(&mut self) -> Option<Vec<SamplePoint>> {
        self.skip_ws();
        let close = match self.peek()? {
            '[' => ']',
            '(' => ')',
            _ => return None,
        };
        self.pos += 1;
        self.points_until(Some(close))
    }

    fn opens_wrapper(&self) -> bool {
        let after = self.rest()[1..].trim_start();
        after.starts_with('(') || after.starts_with(')')
    }
}
