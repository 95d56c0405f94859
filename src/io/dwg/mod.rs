//! Binary DWG object decoding.
//!
//! # Module Structure
//!
//! - [`bit_buffer`]: bit-level cursor and the DWG primitive encodings
//! - [`text_codec`]: code page / UTF-16 string decoding
//! - [`version_caps`]: per-generation layout facts
//! - [`object_type`]: fixed object type codes
//! - [`object_map`]: handle → offset table and its take-once tracker
//! - [`classes`]: class table for type codes 500 and up
//! - [`reader`]: record decoders and the drawing decoder

pub mod bit_buffer;
pub mod classes;
pub mod object_map;
pub mod object_type;
pub mod reader;
pub mod text_codec;
pub mod version_caps;

pub use bit_buffer::BitBuffer;
pub use classes::{ClassMap, DwgClass};
pub use object_map::{ObjectLocation, ObjectMap, ObjectTracker};
pub use object_type::DwgObjectType;
pub use reader::{ControlHandles, DecoderConfiguration, DrawingDecoder};
pub use text_codec::TextCodec;
pub use version_caps::VersionCaps;
