//! ASCII STL decoding.
//!
//! Grammar (whitespace separates tokens everywhere except inside the solid
//! name, which runs to the end of its line):
//!
//! ```text
//! solid <name-until-newline>
//! ( facet normal <f> <f> <f>
//!   outer loop
//!     vertex <f> <f> <f>
//!     vertex <f> <f> <f>
//!     vertex <f> <f> <f>
//!   endloop
//!   endfacet
//! )*
//! endsolid
//! ```
//!
//! The decoder walks the in-memory byte buffer with a cursor that supports
//! peeking the next token without consuming it, which is how the facet loop
//! checks for `endsolid` before committing to a facet.

use crate::error::{Result, StlError};
use crate::stl::ParseOptions;
use crate::types::{Triangle, TriangleSoup};
use glam::Vec3;
use tracing::{debug, warn};

/// Decode an ASCII STL byte buffer into a triangle soup, with default
/// options (tolerant of a missing `endsolid`).
pub fn parse_ascii(bytes: &[u8]) -> Result<TriangleSoup> {
    parse_ascii_with(bytes, ParseOptions::default())
}

/// Decode an ASCII STL byte buffer into a triangle soup.
pub fn parse_ascii_with(bytes: &[u8], options: ParseOptions) -> Result<TriangleSoup> {
    let mut tokens = Tokenizer::new(bytes);

    // The first line is `solid <name>`; the name may contain spaces, so the
    // whole line is discarded rather than tokenized.
    tokens.skip_line();

    let mut soup = TriangleSoup::default();
    loop {
        match tokens.peek_token() {
            Some(b"endsolid") => break,
            Some(_) => {
                let triangle = parse_facet(&mut tokens)?;
                soup.push(triangle);
            }
            None => {
                // Input ended while scanning for the next facet. Many
                // writers mangle or omit the terminator, so by default this
                // is a soft exit.
                if options.require_endsolid {
                    warn!("input ended before 'endsolid'");
                    return Err(StlError::MissingEndSolid);
                }
                debug!("input ended without 'endsolid'; accepting {} facets", soup.len());
                break;
            }
        }
    }

    Ok(soup)
}

/// Parse one `facet ... endfacet` record.
fn parse_facet(tokens: &mut Tokenizer<'_>) -> Result<Triangle> {
    tokens.expect("facet")?;
    tokens.expect("normal")?;
    let normal = tokens.read_vec3("facet normal")?;

    tokens.expect("outer")?;
    tokens.expect("loop")?;

    let mut vertices = [Vec3::ZERO; 3];
    for vertex in &mut vertices {
        tokens.expect("vertex")?;
        *vertex = tokens.read_vec3("vertex")?;
    }

    tokens.expect("endloop")?;
    tokens.expect("endfacet")?;

    Ok(Triangle::new(normal, vertices))
}

/// Whitespace-delimited token cursor over a byte buffer.
struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Advance past the next newline (or to the end of input).
    fn skip_line(&mut self) {
        while let Some(&byte) = self.input.get(self.pos) {
            self.pos += 1;
            if byte == b'\n' {
                break;
            }
        }
    }

    /// Locate the next token from the current position, without moving it.
    fn token_bounds(&self) -> Option<(usize, usize)> {
        let mut start = self.pos;
        while start < self.input.len() && self.input[start].is_ascii_whitespace() {
            start += 1;
        }
        if start == self.input.len() {
            return None;
        }
        let mut end = start;
        while end < self.input.len() && !self.input[end].is_ascii_whitespace() {
            end += 1;
        }
        Some((start, end))
    }

    /// The next token, without consuming it. `None` at end of input.
    fn peek_token(&self) -> Option<&'a [u8]> {
        self.token_bounds().map(|(start, end)| &self.input[start..end])
    }

    /// The next token, consuming it. `None` at end of input.
    fn next_token(&mut self) -> Option<&'a [u8]> {
        let (start, end) = self.token_bounds()?;
        self.pos = end;
        Some(&self.input[start..end])
    }

    /// Consume the next token and require it to equal `literal` exactly
    /// (case-sensitive).
    fn expect(&mut self, literal: &'static str) -> Result<()> {
        match self.next_token() {
            None => Err(StlError::UnexpectedEof { context: literal }),
            Some(token) if token == literal.as_bytes() => Ok(()),
            Some(token) => Err(StlError::TokenMismatch {
                expected: literal,
                found: String::from_utf8_lossy(token).into_owned(),
            }),
        }
    }

    /// Consume the next token and parse it as an `f32`.
    fn read_f32(&mut self, context: &'static str) -> Result<f32> {
        let token = self
            .next_token()
            .ok_or(StlError::UnexpectedEof { context })?;
        let text = String::from_utf8_lossy(token);
        text.parse().map_err(|_| StlError::BadFloat {
            token: text.into_owned(),
            context,
        })
    }

    /// Consume three numeric tokens as x, y, z.
    fn read_vec3(&mut self, context: &'static str) -> Result<Vec3> {
        let x = self.read_f32(context)?;
        let y = self.read_f32(context)?;
        let z = self.read_f32(context)?;
        Ok(Vec3::new(x, y, z))
    }
}
