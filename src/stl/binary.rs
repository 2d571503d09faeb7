//! Binary STL decoding.
//!
//! Layout (all little-endian, no padding):
//!
//! ```text
//! offset 0..80    header, 80 bytes, content ignored
//! offset 80..84   triangle count, u32
//! count records of 50 bytes each:
//!   12 bytes      normal  (3 x f32)
//!   36 bytes      3 vertices (9 x f32)
//!    2 bytes      attribute byte count, ignored
//! ```
//!
//! Fields are decoded byte-by-byte with an explicit little-endian
//! interpretation rather than by casting record structs out of the buffer,
//! so the result is the same on any host platform.

use crate::error::{Result, StlError};
use crate::types::{Triangle, TriangleSoup};
use glam::Vec3;
use tracing::{debug, warn};

const HEADER_LEN: usize = 80;
const COUNT_LEN: usize = 4;
const RECORD_LEN: usize = 50;

/// Decode a binary STL byte buffer into a triangle soup.
///
/// The declared triangle count is trusted: if the buffer is truncated
/// relative to it, decoding fails with an unexpected-EOF error and nothing
/// is returned. Bytes past the last record are ignored.
pub fn parse_binary(bytes: &[u8]) -> Result<TriangleSoup> {
    let Some(rest) = bytes.get(HEADER_LEN..) else {
        warn!("input shorter than the 80-byte header");
        return Err(StlError::UnexpectedEof { context: "header" });
    };
    let Some(count_bytes) = rest.get(..COUNT_LEN) else {
        warn!("input ended inside the triangle count");
        return Err(StlError::UnexpectedEof {
            context: "triangle count",
        });
    };
    let triangle_count =
        u32::from_le_bytes([count_bytes[0], count_bytes[1], count_bytes[2], count_bytes[3]])
            as usize;
    debug!("{} triangles declared", triangle_count);

    let body = &rest[COUNT_LEN..];
    // Capacity hint only; clamped so a garbage count cannot drive a huge
    // allocation before the truncation error surfaces.
    let mut soup = TriangleSoup::with_capacity(triangle_count.min(body.len() / RECORD_LEN));

    for i in 0..triangle_count {
        let offset = i * RECORD_LEN;
        let Some(record) = body.get(offset..offset + RECORD_LEN) else {
            warn!(
                "file truncated: record {} of {} is incomplete",
                i, triangle_count
            );
            return Err(StlError::UnexpectedEof {
                context: "triangle record",
            });
        };

        let normal = read_vec3(&record[0..12]);
        let vertices = [
            read_vec3(&record[12..24]),
            read_vec3(&record[24..36]),
            read_vec3(&record[36..48]),
        ];
        // record[48..50] is the attribute byte count, ignored.
        soup.push(Triangle::new(normal, vertices));
    }

    Ok(soup)
}

/// Decode three consecutive little-endian f32 values.
fn read_vec3(data: &[u8]) -> Vec3 {
    let x = f32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let y = f32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let z = f32::from_le_bytes([data[8], data[9], data[10], data[11]]);
    Vec3::new(x, y, z)
}
