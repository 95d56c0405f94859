//! Object decoding.
//!
//! - [`object_reader`]: record slicing and the per-kind record decoders
//! - [`member_chain`]: walks over block record and polyline members
//! - [`entity_registry`]: type code → entity decoder
//! - [`drawing_decoder`]: the session that ties them together

pub mod drawing_decoder;
pub mod entity_registry;
pub mod member_chain;
pub mod object_reader;

pub use drawing_decoder::{ControlHandles, DecoderConfiguration, DrawingDecoder};
pub use entity_registry::EntityDecoder;
pub use member_chain::MemberWalk;
pub use object_reader::{ObjectControl, ObjectHeader, ObjectReader, StreamSet};
