//! Bit-level cursor over one DWG record.
//!
//! DWG object data is a bit stream: most fields are not byte aligned and
//! many use compact prefix encodings (BS, BL, BD, ...). `BitBuffer` borrows
//! a record's bytes and decodes those primitives.
//!
//! Reads never fail. A read that would run past the end of the buffer
//! returns zero (or an empty value) and clears the liveness flag; callers
//! decode a whole structure and check [`BitBuffer::is_good`] once at the
//! end.

use byteorder::{ByteOrder, LittleEndian};

use crate::io::dwg::text_codec::TextCodec;
use crate::types::{Color, DwgVersion, Handle, HandleRef, Vector2, Vector3};

/// Entity color as stored in the ENC field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnColor {
    pub color: Color,
    /// Raw transparency value when the 0x2000 flag was set.
    pub transparency: Option<u32>,
    /// A color-book handle follows in the handle stream.
    pub has_book_color: bool,
}

/// Positionable bit cursor over a borrowed byte span.
#[derive(Debug, Clone)]
pub struct BitBuffer<'a> {
    data: &'a [u8],
    byte_pos: usize,
    bit_shift: u8,
    good: bool,
    is_empty: bool,
    version: DwgVersion,
    codec: TextCodec,
}

impl<'a> BitBuffer<'a> {
    /// Create a cursor at bit 0 of `data`.
    pub fn new(data: &'a [u8], version: DwgVersion, codec: TextCodec) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_shift: 0,
            good: true,
            is_empty: false,
            version,
            codec,
        }
    }

    /// Get the DWG version.
    pub fn version(&self) -> DwgVersion {
        self.version
    }

    /// Liveness flag: `false` once any read ran out of data.
    pub fn is_good(&self) -> bool {
        self.good
    }

    /// `true` when this cursor was positioned on an absent string stream.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Length of the underlying span in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Byte position (the partially consumed byte counts as current).
    pub fn position(&self) -> usize {
        self.byte_pos
    }

    /// Move to a byte boundary.
    pub fn set_position(&mut self, pos: usize) {
        self.byte_pos = pos.min(self.data.len());
        self.bit_shift = 0;
    }

    pub fn position_in_bits(&self) -> u64 {
        self.byte_pos as u64 * 8 + self.bit_shift as u64
    }

    pub fn set_position_in_bits(&mut self, pos: u64) {
        let byte = (pos >> 3) as usize;
        if byte > self.data.len() || (byte == self.data.len() && pos & 7 != 0) {
            self.underrun();
            return;
        }
        self.byte_pos = byte;
        self.bit_shift = (pos & 7) as u8;
    }

    /// Whole bytes left after the cursor.
    pub fn remaining_bytes(&self) -> usize {
        let bits = (self.data.len() * 8) as u64;
        ((bits.saturating_sub(self.position_in_bits())) / 8) as usize
    }

    fn remaining_bits(&self) -> u64 {
        ((self.data.len() * 8) as u64).saturating_sub(self.position_in_bits())
    }

    fn underrun(&mut self) {
        self.good = false;
        self.byte_pos = self.data.len();
        self.bit_shift = 0;
    }

    /// Skip `count` bytes.
    pub fn advance(&mut self, count: usize) {
        let target = self.position_in_bits() + (count as u64) * 8;
        if target > (self.data.len() * 8) as u64 {
            self.underrun();
        } else {
            self.set_position_in_bits(target);
        }
    }

    // ---------------------------------------------------------------
    // Bits
    // ---------------------------------------------------------------

    /// B
    pub fn read_bit(&mut self) -> bool {
        let Some(&byte) = self.data.get(self.byte_pos) else {
            self.underrun();
            return false;
        };
        let value = (byte >> (7 - self.bit_shift)) & 1 == 1;
        self.bit_shift += 1;
        if self.bit_shift == 8 {
            self.bit_shift = 0;
            self.byte_pos += 1;
        }
        value
    }

    /// BB
    pub fn read_2bits(&mut self) -> u8 {
        let hi = self.read_bit() as u8;
        let lo = self.read_bit() as u8;
        (hi << 1) | lo
    }

    /// 3B
    pub fn read_3bits(&mut self) -> u8 {
        let b1 = self.read_bit() as u8;
        let b2 = (b1 << 1) | self.read_bit() as u8;
        (b2 << 1) | self.read_bit() as u8
    }

    // ---------------------------------------------------------------
    // Raw values
    // ---------------------------------------------------------------

    /// RC
    pub fn read_byte(&mut self) -> u8 {
        if self.bit_shift == 0 {
            let Some(&b) = self.data.get(self.byte_pos) else {
                self.underrun();
                return 0;
            };
            self.byte_pos += 1;
            return b;
        }

        if self.byte_pos + 1 >= self.data.len() {
            self.underrun();
            return 0;
        }
        let hi = self.data[self.byte_pos] << self.bit_shift;
        let lo = self.data[self.byte_pos + 1] >> (8 - self.bit_shift);
        self.byte_pos += 1;
        hi | lo
    }

    pub fn read_raw_char(&mut self) -> u8 {
        self.read_byte()
    }

    /// Read `length` bytes. Returns an empty vector on underrun.
    pub fn read_bytes(&mut self, length: usize) -> Vec<u8> {
        if (length as u64) * 8 > self.remaining_bits() {
            self.underrun();
            return Vec::new();
        }
        (0..length).map(|_| self.read_byte()).collect()
    }

    fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut arr = [0u8; N];
        if (N as u64) * 8 > self.remaining_bits() {
            self.underrun();
            return arr;
        }
        for b in arr.iter_mut() {
            *b = self.read_byte();
        }
        arr
    }

    /// RS
    pub fn read_raw_short(&mut self) -> i16 {
        LittleEndian::read_i16(&self.read_array::<2>())
    }

    pub fn read_raw_ushort(&mut self) -> u16 {
        LittleEndian::read_u16(&self.read_array::<2>())
    }

    /// RL
    pub fn read_raw_long(&mut self) -> i32 {
        LittleEndian::read_i32(&self.read_array::<4>())
    }

    /// RD
    pub fn read_raw_double(&mut self) -> f64 {
        LittleEndian::read_f64(&self.read_array::<8>())
    }

    /// 2RD
    pub fn read_2raw_double(&mut self) -> Vector2 {
        let x = self.read_raw_double();
        let y = self.read_raw_double();
        Vector2::new(x, y)
    }

    /// 3RD
    pub fn read_3raw_double(&mut self) -> Vector3 {
        let x = self.read_raw_double();
        let y = self.read_raw_double();
        let z = self.read_raw_double();
        Vector3::new(x, y, z)
    }

    // ---------------------------------------------------------------
    // Bit-coded values
    // ---------------------------------------------------------------

    /// BS: 00 short, 01 unsigned char, 10 zero, 11 256.
    pub fn read_bit_short(&mut self) -> i16 {
        match self.read_2bits() {
            0 => self.read_raw_short(),
            1 => self.read_byte() as i16,
            2 => 0,
            _ => 256,
        }
    }

    /// BL: 00 long, 01 unsigned char, 10 zero, 11 invalid.
    pub fn read_bit_long(&mut self) -> i32 {
        match self.read_2bits() {
            0 => self.read_raw_long(),
            1 => self.read_byte() as i32,
            2 => 0,
            _ => {
                self.good = false;
                0
            }
        }
    }

    /// BLL: 3-bit byte count followed by that many LE bytes.
    pub fn read_bit_long_long(&mut self) -> i64 {
        let size = self.read_3bits();
        let mut value: u64 = 0;
        for i in 0..size as u64 {
            value |= (self.read_byte() as u64) << (i << 3);
        }
        value as i64
    }

    /// BD: 00 double, 01 1.0, 10 0.0, 11 invalid.
    pub fn read_bit_double(&mut self) -> f64 {
        match self.read_2bits() {
            0 => self.read_raw_double(),
            1 => 1.0,
            2 => 0.0,
            _ => {
                self.good = false;
                0.0
            }
        }
    }

    /// DD: a double patched over `default`.
    pub fn read_bit_double_with_default(&mut self, default: f64) -> f64 {
        let mut arr = default.to_le_bytes();
        match self.read_2bits() {
            0 => default,
            1 => {
                let patch = self.read_array::<4>();
                arr[..4].copy_from_slice(&patch);
                f64::from_le_bytes(arr)
            }
            2 => {
                let hi = self.read_array::<2>();
                let lo = self.read_array::<4>();
                arr[4..6].copy_from_slice(&hi);
                arr[..4].copy_from_slice(&lo);
                f64::from_le_bytes(arr)
            }
            _ => self.read_raw_double(),
        }
    }

    /// 2BD
    pub fn read_2bit_double(&mut self) -> Vector2 {
        let x = self.read_bit_double();
        let y = self.read_bit_double();
        Vector2::new(x, y)
    }

    /// 2DD
    pub fn read_2bit_double_with_default(&mut self, default: Vector2) -> Vector2 {
        let x = self.read_bit_double_with_default(default.x);
        let y = self.read_bit_double_with_default(default.y);
        Vector2::new(x, y)
    }

    /// 3BD
    pub fn read_3bit_double(&mut self) -> Vector3 {
        let x = self.read_bit_double();
        let y = self.read_bit_double();
        let z = self.read_bit_double();
        Vector3::new(x, y, z)
    }

    /// 3DD
    pub fn read_3bit_double_with_default(&mut self, default: Vector3) -> Vector3 {
        let x = self.read_bit_double_with_default(default.x);
        let y = self.read_bit_double_with_default(default.y);
        let z = self.read_bit_double_with_default(default.z);
        Vector3::new(x, y, z)
    }

    /// BE: R2000+ stores a single set bit for the default (0,0,1).
    pub fn read_bit_extrusion(&mut self) -> Vector3 {
        if self.version >= DwgVersion::AC1015 && self.read_bit() {
            return Vector3::UNIT_Z;
        }
        self.read_3bit_double()
    }

    /// BT: R2000+ stores a single set bit for zero thickness.
    pub fn read_bit_thickness(&mut self) -> f64 {
        if self.version >= DwgVersion::AC1015 && self.read_bit() {
            return 0.0;
        }
        self.read_bit_double()
    }

    // ---------------------------------------------------------------
    // Modular values
    // ---------------------------------------------------------------

    /// Unsigned MC: 7 bits per byte, high bit continues.
    pub fn read_umodular_char(&mut self) -> u64 {
        let mut value: u64 = 0;
        let mut shift = 0u32;
        loop {
            let b = self.read_byte();
            if shift < 64 {
                value |= ((b & 0x7F) as u64) << shift;
            } else {
                self.good = false;
            }
            if b & 0x80 == 0 {
                break;
            }
            shift += 7;
        }
        value
    }

    /// Signed MC: like the unsigned form, bit 6 of the last byte is the sign.
    pub fn read_modular_char(&mut self) -> i64 {
        let mut value: i64 = 0;
        let mut shift = 0u32;
        loop {
            let b = self.read_byte();
            if b & 0x80 == 0 {
                if shift < 63 {
                    value |= ((b & 0x3F) as i64) << shift;
                }
                if b & 0x40 != 0 {
                    value = -value;
                }
                return value;
            }
            if shift < 63 {
                value |= ((b & 0x7F) as i64) << shift;
            } else {
                self.good = false;
            }
            shift += 7;
        }
    }

    /// MS: 15 bits per little-endian byte pair, 0x80 of the second byte
    /// continues.
    pub fn read_modular_short(&mut self) -> u32 {
        let mut value: u32 = 0;
        let mut shift = 0u32;
        loop {
            let lo = self.read_byte();
            let hi = self.read_byte();
            let word = (lo as u32) | (((hi & 0x7F) as u32) << 8);
            if shift < 32 {
                value |= word << shift;
            } else {
                self.good = false;
            }
            if hi & 0x80 == 0 {
                break;
            }
            shift += 15;
        }
        value
    }

    // ---------------------------------------------------------------
    // Handles
    // ---------------------------------------------------------------

    /// H: `|code:4|size:4|size bytes, big-endian|`.
    pub fn read_handle(&mut self) -> HandleRef {
        let form = self.read_byte();
        let code = form >> 4;
        let size = form & 0x0F;
        if size > 8 {
            self.good = false;
            return HandleRef::new(code, size, 0);
        }

        let mut value: u64 = 0;
        for _ in 0..size {
            value = (value << 8) | self.read_byte() as u64;
        }
        HandleRef::new(code, size, value)
    }

    /// Read a handle reference and resolve it against `base`.
    pub fn read_offset_handle(&mut self, base: Handle) -> Handle {
        self.read_handle().resolve(base)
    }

    // ---------------------------------------------------------------
    // Text and colors
    // ---------------------------------------------------------------

    /// TV: BS length, then code-page bytes (R2007+: UTF-16LE code units).
    pub fn read_variable_text(&mut self) -> String {
        if self.is_empty {
            return String::new();
        }
        let length = self.read_bit_short();
        if length <= 0 {
            return String::new();
        }
        if self.codec.is_unicode() {
            let bytes = self.read_bytes(length as usize * 2);
            self.codec.decode_utf16(&bytes)
        } else {
            let bytes = self.read_bytes(length as usize);
            self.codec.decode(&bytes)
        }
    }

    /// CMC
    pub fn read_cm_color(&mut self) -> Color {
        if self.version < DwgVersion::AC1018 {
            return Color::from_index(self.read_bit_short());
        }

        let index = self.read_bit_short();
        let rgb = self.read_bit_long() as u32;
        let color = match rgb >> 24 {
            0xC0 => Color::ByLayer,
            0xC1 => Color::ByBlock,
            0xC2 => Color::from_packed_rgb(rgb),
            0xC3 => Color::Index((rgb & 0xFF) as u8),
            _ => Color::from_index(index),
        };

        let flags = self.read_byte();
        if flags & 1 != 0 {
            let _color_name = self.read_variable_text();
        }
        if flags & 2 != 0 {
            let _book_name = self.read_variable_text();
        }
        color
    }

    /// ENC
    pub fn read_en_color(&mut self) -> EnColor {
        if self.version < DwgVersion::AC1018 {
            return EnColor {
                color: Color::from_index(self.read_bit_short()),
                ..EnColor::default()
            };
        }

        let size = self.read_bit_short() as u16;
        if size == 0 {
            return EnColor {
                color: Color::ByBlock,
                ..EnColor::default()
            };
        }

        let flags = size & 0xFF00;
        let mut result = EnColor::default();
        if flags & 0x4000 != 0 {
            result.color = Color::ByBlock;
            result.has_book_color = true;
        } else if flags & 0x8000 != 0 {
            let rgb = self.read_bit_long() as u32;
            result.color = Color::from_packed_rgb(rgb);
        } else {
            result.color = Color::from_index((size & 0x0FFF) as i16);
        }

        if flags & 0x2000 != 0 {
            result.transparency = Some(self.read_bit_long() as u32);
        }
        result
    }

    // ---------------------------------------------------------------
    // Record helpers
    // ---------------------------------------------------------------

    /// OT: BS before R2010, afterwards a 2-bit selector.
    pub fn read_object_type(&mut self) -> i16 {
        if self.version < DwgVersion::AC1024 {
            return self.read_bit_short();
        }
        match self.read_2bits() {
            0 => self.read_byte() as i16,
            1 => 0x1F0 + self.read_byte() as i16,
            _ => self.read_raw_short(),
        }
    }

    /// Position on the string stream whose presence flag sits at `flag_pos`
    /// (one bit before the handle stream).
    ///
    /// Returns `false` and marks the cursor empty when the record has no
    /// string data; string reads then yield empty strings.
    pub fn set_position_by_flag(&mut self, flag_pos: u64) -> bool {
        self.set_position_in_bits(flag_pos);
        if !self.read_bit() {
            self.is_empty = true;
            self.byte_pos = self.data.len();
            self.bit_shift = 0;
            return false;
        }

        let mut length = flag_pos.saturating_sub(16);
        self.set_position_in_bits(length);
        let mut size = self.read_raw_ushort() as u64;
        if size & 0x8000 != 0 {
            length = length.saturating_sub(16);
            self.set_position_in_bits(length);
            let hi = self.read_raw_ushort() as u64;
            size = (size & 0x7FFF) | (hi << 15);
        }

        match length.checked_sub(size) {
            Some(start) => self.set_position_in_bits(start),
            None => self.underrun(),
        }
        self.good
    }
}
