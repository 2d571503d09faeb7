//! STL Soup
//!
//! A dual-mode reader for STL (stereolithography) mesh files. Both the ASCII
//! and binary variants are detected and decoded into a [`TriangleSoup`], an
//! ordered list of triangles with no shared-vertex topology. The crate is
//! GPU-agnostic; [`mesh`] offers the conversion a renderer typically wants
//! (flat-shaded vertex/index buffers).

pub mod error;
pub mod mesh;
pub mod stl;
pub mod types;

pub use error::{Result, StlError};
pub use mesh::Mesh;
pub use stl::{
    ParseOptions, StlFormat, detect_format, load_stl, load_stl_with, parse_ascii,
    parse_ascii_with, parse_binary, parse_stl, parse_stl_with,
};
pub use types::{Triangle, TriangleSoup};
