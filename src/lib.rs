//! # dwg-core
//!
//! Decoder core for binary DWG drawings (R13 through 2018).
//!
//! Given the object data of a drawing, its handle table, its class table and
//! the handles of the table control records, the decoder rebuilds the symbol
//! tables (line types, layers, text styles, dimension styles, viewports,
//! block records, application ids) and the drawable entities, and hands them
//! to a [`DrawingSink`] in traversal order.
//!
//! Locating the sections of a file, decompressing them and parsing the
//! header variables happen before this crate is involved.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dwg_core::{ControlHandles, DecoderConfiguration, Drawing, DrawingDecoder, DwgVersion};
//! use dwg_core::io::dwg::{ClassMap, ObjectMap, TextCodec};
//!
//! let objects: ObjectMap = handle_table.into_iter().collect();
//! let mut decoder = DrawingDecoder::new(
//!     DwgVersion::AC1015,
//!     &object_data,
//!     &objects,
//!     &ClassMap::new(),
//!     controls,
//!     TextCodec::new(DwgVersion::AC1015, code_page),
//!     DecoderConfiguration::default(),
//! )?;
//!
//! let mut drawing = Drawing::new();
//! if !decoder.decode(&mut drawing) {
//!     for failure in decoder.failures() {
//!         eprintln!("{failure}");
//!     }
//! }
//! # Ok::<(), dwg_core::DwgError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::dwg::BitBuffer`]: cursor over the bit-packed primitives
//! - [`io::dwg::reader::ObjectReader`]: per-kind record decoders
//! - [`DrawingDecoder`]: the staged session (tables, blocks, residual sweep)
//! - [`DrawingSink`]: receiver of the decoded records, with [`Drawing`] as a
//!   collecting implementation
//!
//! Corrupt records never abort a decode. They are skipped, reported through
//! the session's [`NotificationCollection`] and kept in
//! [`DrawingDecoder::failures`].

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod sink;
pub mod tables;
pub mod types;
pub mod variant;

// Re-export commonly used types
pub use error::{DwgError, Result};
pub use types::{Color, DwgVersion, Handle, HandleRef, LineWeight, Vector2, Vector3};

// Re-export entity types
pub use entities::{
    Arc, Block, BlockEnd, Circle, Dimension, DimensionKind, Ellipse, Entity, EntityCommon, EntityType, Face3D,
    Hatch, Insert, Leader, Line, LwPolyline, MText, Point, Polyline, Ray, Solid, Spline, Text, Vertex, Viewport,
    XLine,
};

// Re-export table types
pub use tables::{
    AppId, BlockRecord, DimStyle, Layer, LineType, MemberChain, Table, TableEntry, TableKind, TableSet, TextStyle,
    VPort,
};

pub use io::dwg::{ControlHandles, DecoderConfiguration, DrawingDecoder};
pub use notification::{DebugLevel, Notification, NotificationCollection, NotificationType};
pub use sink::{Drawing, DrawingSink};
pub use variant::{Variant, VariantValue};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on the reactor handles one record may declare.
pub const MAX_REACTORS: usize = 10_000;

/// Upper bound on any other list count read from a record (control
/// entries, vertices, boundary paths, ...).
pub const MAX_ITEM_COUNT: usize = 1_000_000;
