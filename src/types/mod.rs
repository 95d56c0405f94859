//! Core value types shared by tables, entities and the decoder

pub mod color;
pub mod handle;
pub mod line_weight;
pub mod vector;
pub mod version;

pub use color::Color;
pub use handle::{Handle, HandleRef};
pub use line_weight::LineWeight;
pub use vector::{Vector2, Vector3};
pub use version::DwgVersion;
