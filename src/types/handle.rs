//! Handle types for DWG records
//!
//! Every record in a drawing is identified by a handle. Records refer to
//! each other through handle references, which are stored either as an
//! absolute value or as an offset from the referring record's own handle.

use std::fmt;

/// Identifier of one record. 0 means "no record".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub const NULL: Handle = Handle(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::NULL
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

impl fmt::UpperHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// A handle reference exactly as stored: `|code:4|size:4|size bytes|`.
///
/// `value` is the big-endian magnitude. Whether it is an absolute handle or
/// an offset depends on `code`; see [`HandleRef::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleRef {
    pub code: u8,
    pub size: u8,
    pub value: u64,
}

impl HandleRef {
    /// Create a reference from its stored parts.
    pub const fn new(code: u8, size: u8, value: u64) -> Self {
        Self { code, size, value }
    }

    /// Absolute handle this reference points at, given the handle of the
    /// record it was read from.
    ///
    /// | code | meaning          |
    /// |------|------------------|
    /// | 0-5  | absolute `value` |
    /// | 6    | `base + 1`       |
    /// | 8    | `base - 1`       |
    /// | 0xA  | `base + value`   |
    /// | 0xC  | `base - value`   |
    pub fn resolve(&self, base: Handle) -> Handle {
        let base = base.value();
        let abs = match self.code {
            0x6 => base.wrapping_add(1),
            0x8 => base.wrapping_sub(1),
            0xA => base.wrapping_add(self.value),
            0xC => base.wrapping_sub(self.value),
            _ => self.value,
        };
        Handle(abs)
    }

    /// `true` when the stored value is a plain absolute handle.
    pub fn is_absolute(&self) -> bool {
        self.code <= 5
    }
}
