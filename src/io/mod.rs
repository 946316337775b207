//! Text formats.
//!
//! - point list parsing (`points`)
//! - canonical curve-fit string read/write (`curve`)

pub mod curve;
pub mod points;

pub use curve::*;
pub use points::{parse_points, parse_points_from};
