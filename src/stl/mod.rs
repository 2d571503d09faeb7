//! STL file loading: format detection and decoder dispatch.
//!
//! An STL file is either ASCII (`solid ... endsolid`) or binary (80-byte
//! header, triangle count, fixed 50-byte records). Both variants are accepted
//! transparently: [`load_stl`] sniffs the format and hands the bytes to the
//! matching decoder. There is no partial-success mode; a parse either yields
//! a complete [`TriangleSoup`] or an error.

mod ascii;
mod binary;

pub use ascii::{parse_ascii, parse_ascii_with};
pub use binary::parse_binary;

use crate::error::Result;
use crate::types::TriangleSoup;
use std::path::Path;
use tracing::{debug, info};

/// The two STL on-disk variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Ascii,
    Binary,
}

/// Knobs for decoding behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Treat end-of-input before `endsolid` as an error in the ASCII decoder.
    ///
    /// Off by default: many writers omit or mangle the terminator, and the
    /// tolerant reading accepts everything decoded up to that point.
    pub require_endsolid: bool,
}

/// Classify the input by its first five bytes.
///
/// Exactly the bytes `solid` mean ASCII; anything else, including input
/// shorter than five bytes, is treated as binary. The comparison is
/// byte-for-byte, so a binary file whose header happens to start with
/// `solid` is routed to the ASCII decoder. This ambiguity is inherent to the
/// format and is deliberately not papered over with heuristics.
pub fn detect_format(bytes: &[u8]) -> StlFormat {
    if bytes.len() >= 5 && &bytes[..5] == b"solid" {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    }
}

/// Decode STL content already held in memory, with default options.
pub fn parse_stl(bytes: &[u8]) -> Result<TriangleSoup> {
    parse_stl_with(bytes, ParseOptions::default())
}

/// Decode STL content already held in memory.
pub fn parse_stl_with(bytes: &[u8], options: ParseOptions) -> Result<TriangleSoup> {
    match detect_format(bytes) {
        StlFormat::Ascii => {
            debug!("ASCII mode detected");
            ascii::parse_ascii_with(bytes, options)
        }
        StlFormat::Binary => {
            debug!("binary mode detected");
            binary::parse_binary(bytes)
        }
    }
}

/// Load a triangle soup from an STL file, with default options.
///
/// Detects ASCII vs binary automatically.
pub fn load_stl<P: AsRef<Path>>(path: P) -> Result<TriangleSoup> {
    load_stl_with(path, ParseOptions::default())
}

/// Load a triangle soup from an STL file.
///
/// The file is read once in full; sniffing and decoding share the same
/// bytes, and the handle is closed before decoding starts.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_stl_with<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<TriangleSoup> {
    let path = path.as_ref();
    debug!("loading STL file");
    let bytes = std::fs::read(path)?;

    let format = detect_format(&bytes);
    info!("{:?} mode detected", format);

    let soup = match format {
        StlFormat::Ascii => ascii::parse_ascii_with(&bytes, options)?,
        StlFormat::Binary => binary::parse_binary(&bytes)?,
    };

    info!("{} triangles", soup.len());
    Ok(soup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StlError;
    use glam::Vec3;
    use std::io::Write;

    /// Encode a soup with the fixed binary layout. Test-side only; writing
    /// STL is not part of the public API.
    fn encode_binary(soup: &TriangleSoup) -> Vec<u8> {
        let mut out = vec![0u8; 80];
        out.extend_from_slice(&(soup.len() as u32).to_le_bytes());
        for triangle in soup {
            for v in [triangle.normal].into_iter().chain(triangle.vertices) {
                out.extend_from_slice(&v.x.to_le_bytes());
                out.extend_from_slice(&v.y.to_le_bytes());
                out.extend_from_slice(&v.z.to_le_bytes());
            }
            out.extend_from_slice(&[0u8, 0u8]);
        }
        out
    }

    fn sample_soup() -> TriangleSoup {
        let mut soup = TriangleSoup::with_capacity(2);
        soup.push(crate::Triangle::new(
            Vec3::new(0.0, 0.0, 1.0),
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.5, 0.0, 0.0),
                Vec3::new(0.0, 2.25, 0.0),
            ],
        ));
        soup.push(crate::Triangle::new(
            Vec3::new(-0.0, 1.0, 0.5),
            [
                Vec3::new(1.0, 2.0, 3.0),
                Vec3::new(-4.0, 5.5, 6.0),
                Vec3::new(7.0, -8.0, 9.125),
            ],
        ));
        soup
    }

    #[test]
    fn test_detect_format_ascii() {
        assert_eq!(detect_format(b"solid cube\n"), StlFormat::Ascii);
    }

    #[test]
    fn test_detect_format_binary() {
        assert_eq!(detect_format(&[0u8; 84]), StlFormat::Binary);
        // Case-sensitive, byte-for-byte: no trimming, no lowercasing.
        assert_eq!(detect_format(b"Solid cube\n"), StlFormat::Binary);
        assert_eq!(detect_format(b" solid cube\n"), StlFormat::Binary);
    }

    #[test]
    fn test_detect_format_short_input() {
        assert_eq!(detect_format(b"sol"), StlFormat::Binary);
        assert_eq!(detect_format(b""), StlFormat::Binary);
    }

    #[test]
    fn test_solid_prefix_always_routes_to_ascii() {
        // A binary-looking payload behind a "solid" prefix still goes to the
        // ASCII decoder. This pins the format's inherent ambiguity: the file
        // is never reinterpreted as binary.
        let mut bytes = b"solid\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0x13, 0x37, 0x00, 0x01]);
        assert_eq!(detect_format(&bytes), StlFormat::Ascii);
        match parse_stl(&bytes) {
            Err(StlError::TokenMismatch { expected, .. }) => assert_eq!(expected, "facet"),
            other => panic!("expected TokenMismatch, got {:?}", other),
        }

        // Garbage with no newline at all is swallowed by the solid-name line
        // and decodes as an empty solid, exactly as the original viewer did.
        let mut bytes = b"solid".to_vec();
        bytes.extend_from_slice(&[0x00, 0xff, 0x13, 0x37]);
        let soup = parse_stl(&bytes).unwrap();
        assert!(soup.is_empty());
    }

    #[test]
    fn test_roundtrip_binary_bit_exact() {
        let soup = sample_soup();
        let bytes = encode_binary(&soup);
        let decoded = parse_stl(&bytes).unwrap();
        assert_eq!(decoded, soup);
    }

    #[test]
    fn test_load_stl_binary_file() {
        let soup = sample_soup();
        let bytes = encode_binary(&soup);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.stl");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&bytes)
            .unwrap();

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded, soup);
    }

    #[test]
    fn test_load_stl_ascii_file() {
        let content = "solid plate\n\
                       facet normal 0 0 1\n\
                       outer loop\n\
                       vertex 0 0 0\n\
                       vertex 1 0 0\n\
                       vertex 0 1 0\n\
                       endloop\n\
                       endfacet\n\
                       endsolid plate\n";

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.stl");
        std::fs::write(&path, content).unwrap();

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.triangles()[0].vertices[1], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_load_stl_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.stl");
        match load_stl(&path) {
            Err(StlError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
