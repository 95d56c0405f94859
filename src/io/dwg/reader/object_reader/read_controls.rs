//! Table control records.
//!
//! A control record lists the handles of its table's entries in file order.
//! The line type and block record controls hold two more entries than they
//! count (BYLAYER/BYBLOCK and the model/paper space records).

use crate::error::{DwgError, Result};
use crate::tables::TableKind;
use crate::types::Handle;
use crate::MAX_ITEM_COUNT;

use super::{ObjectReader, StreamSet};

/// Decoded table control record.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectControl {
    pub kind: TableKind,
    pub handle: Handle,
    /// Nonzero member handles in file order, including the implicit ones.
    pub entries: Vec<Handle>,
}

impl ObjectControl {
    /// Empty control, as used when the record could not be decoded.
    pub fn empty(kind: TableKind, handle: Handle) -> Self {
        Self {
            kind,
            handle,
            entries: Vec::new(),
        }
    }

    /// Decode the control record in `streams`.
    ///
    /// The caller checks the type code first and validates the streams
    /// afterwards, so the listed entries survive a truncated record.
    pub fn read<'a>(reader: &ObjectReader<'a>, streams: &mut StreamSet<'a>, kind: TableKind) -> Result<Self> {
        let caps = reader.caps();
        let header = reader.read_common_non_entity_data(streams)?;

        // BL: number of entries.
        let count = streams.object_reader.read_bit_long();
        if count < 0 || count as usize > MAX_ITEM_COUNT {
            return Err(DwgError::InvalidRecord {
                handle: header.handle,
                reason: format!("{} control lists {count} entries", kind.name()),
            });
        }

        // DIMSTYLE (R2000+): RC count of extra handles after the entries.
        let extra = if caps.control_extra_byte(kind) {
            streams.object_reader.read_raw_char() as usize
        } else {
            0
        };

        // R2007+: string stream bit, nothing to read from it here.
        if caps.has_string_stream_bit() {
            let _has_strings = streams.object_reader.read_bit();
        }

        let total = count as usize + kind.implicit_members();
        let mut entries = Vec::with_capacity(total);
        for _ in 0..total {
            let handle = streams.handle_ref();
            if !handle.is_null() {
                entries.push(handle);
            }
        }

        for _ in 0..extra {
            let _unknown = streams.handle_ref();
        }

        Ok(Self {
            kind,
            handle: header.handle,
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
