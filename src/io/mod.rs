//! I/O module for reading binary drawing files

pub mod dwg;

pub use dwg::{ControlHandles, DecoderConfiguration, DrawingDecoder};
