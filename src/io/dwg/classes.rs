//! Class table: extended type codes (500 and up).
//!
//! Records whose type code is 500 or more are instances of a class listed in
//! the file's class section. For the classes that are really built-in kinds
//! stored under an extended code (LWPOLYLINE, HATCH, ...), the class also
//! gives the fixed code the decoder should dispatch on.

use ahash::AHashMap;

use crate::io::dwg::bit_buffer::BitBuffer;

/// First class-based type code.
pub const FIRST_CLASS_CODE: i16 = 500;

/// One entry of the class section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DwgClass {
    /// Type code records of this class are stored under.
    pub class_number: i16,
    pub proxy_flags: u16,
    pub application_name: String,
    pub cpp_class_name: String,
    pub dxf_name: String,
    pub was_zombie: bool,
    /// 0x1F2 for entity classes, 0x1F3 for object classes.
    pub item_class_id: i16,
    pub instance_count: i32,
    /// Fixed type code this class stands for, or 0.
    pub dwg_type: i16,
}

impl DwgClass {
    /// Class with the fixed code derived from its DXF name.
    pub fn new(class_number: i16, dxf_name: impl Into<String>) -> Self {
        let dxf_name = dxf_name.into();
        Self {
            class_number,
            dwg_type: dwg_type_for_name(&dxf_name),
            dxf_name,
            ..Default::default()
        }
    }

    /// Decode one class-section entry.
    ///
    /// `text` is the string stream for R2007+ sections; pass `None` when the
    /// strings are inline.
    pub fn read<'a>(reader: &mut BitBuffer<'a>, mut text: Option<&mut BitBuffer<'a>>) -> Self {
        let r2004_plus = reader.version() >= crate::types::DwgVersion::AC1018;
        let mut class = DwgClass::default();

        class.class_number = reader.read_bit_short();
        class.proxy_flags = reader.read_bit_short() as u16;

        let source = match text.as_deref_mut() {
            Some(t) => t,
            None => &mut *reader,
        };
        class.application_name = source.read_variable_text();
        class.cpp_class_name = source.read_variable_text();
        class.dxf_name = source.read_variable_text();

        class.was_zombie = reader.read_bit();
        class.item_class_id = reader.read_bit_short();

        if r2004_plus {
            class.instance_count = reader.read_bit_long();
            // dwg version, maintenance version, two unknowns
            for _ in 0..4 {
                reader.read_bit_long();
            }
        }

        class.dwg_type = dwg_type_for_name(&class.dxf_name);
        class
    }

    pub fn is_entity(&self) -> bool {
        self.item_class_id == 0x1F2
    }
}

/// Fixed type code for the built-in kinds that may be stored as classes.
pub fn dwg_type_for_name(dxf_name: &str) -> i16 {
    match dxf_name {
        "LWPOLYLINE" => 77,
        "HATCH" => 78,
        "GROUP" => 72,
        "LAYOUT" => 82,
        "IMAGE" => 101,
        "IMAGEDEF" => 102,
        _ => 0,
    }
}

/// Class number → class lookup.
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    classes: AHashMap<i16, DwgClass>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, replacing any class with the same number.
    pub fn insert(&mut self, class: DwgClass) {
        self.classes.insert(class.class_number, class);
    }

    pub fn get(&self, code: i16) -> Option<&DwgClass> {
        self.classes.get(&code)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Code to dispatch a record stored under `code` on.
    ///
    /// Codes below 500 are returned unchanged. Class codes give the class's
    /// fixed type when it has one, else the class code itself. An unknown
    /// class gives `None`.
    pub fn resolve(&self, code: i16) -> Option<i16> {
        if code < FIRST_CLASS_CODE {
            return Some(code);
        }
        let class = self.classes.get(&code)?;
        Some(if class.dwg_type != 0 { class.dwg_type } else { code })
    }
}

impl FromIterator<DwgClass> for ClassMap {
    fn from_iter<T: IntoIterator<Item = DwgClass>>(iter: T) -> Self {
        let mut map = ClassMap::new();
        for class in iter {
            map.insert(class);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dwg::text_codec::TextCodec;
    use crate::types::DwgVersion;

    fn push_bits(bits: &mut Vec<bool>, value: u64, count: usize) {
        for i in (0..count).rev() {
            bits.push((value >> i) & 1 == 1);
        }
    }

    fn push_bs_byte(bits: &mut Vec<bool>, value: u8) {
        push_bits(bits, 0b01, 2);
        push_bits(bits, value as u64, 8);
    }

    fn push_tv(bits: &mut Vec<bool>, s: &str) {
        push_bs_byte(bits, s.len() as u8);
        for b in s.bytes() {
            push_bits(bits, b as u64, 8);
        }
    }

    fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
        bits.chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| if b { acc | (1 << (7 - i)) } else { acc })
            })
            .collect()
    }

    #[test]
    fn test_read_class_r2000() {
        let mut bits = Vec::new();
        // classnum 500 as a raw short
        push_bits(&mut bits, 0b00, 2);
        push_bits(&mut bits, 0xF4, 8);
        push_bits(&mut bits, 0x01, 8);
        push_bs_byte(&mut bits, 0); // proxy flags
        push_tv(&mut bits, "ObjectDBX Classes");
        push_tv(&mut bits, "AcDbPolyline");
        push_tv(&mut bits, "LWPOLYLINE");
        bits.push(false);
        // item class id 0x1F2
        push_bits(&mut bits, 0b00, 2);
        push_bits(&mut bits, 0xF2, 8);
        push_bits(&mut bits, 0x01, 8);
        let data = bits_to_bytes(&bits);

        let mut reader = BitBuffer::new(&data, DwgVersion::AC1015, TextCodec::default());
        let class = DwgClass::read(&mut reader, None);
        assert!(reader.is_good());
        assert_eq!(class.class_number, 500);
        assert_eq!(class.dxf_name, "LWPOLYLINE");
        assert_eq!(class.cpp_class_name, "AcDbPolyline");
        assert!(class.is_entity());
        assert_eq!(class.dwg_type, 77);
    }

    #[test]
    fn test_resolve() {
        let map: ClassMap = [DwgClass::new(500, "HATCH"), DwgClass::new(501, "ACDBPLACEHOLDER")]
            .into_iter()
            .collect();
        assert_eq!(map.resolve(0x13), Some(0x13));
        assert_eq!(map.resolve(500), Some(78));
        assert_eq!(map.resolve(501), Some(501));
        assert_eq!(map.resolve(502), None);
    }

    #[test]
    fn test_dwg_type_for_name() {
        assert_eq!(dwg_type_for_name("IMAGEDEF"), 102);
        assert_eq!(dwg_type_for_name("LAYOUT"), 82);
        assert_eq!(dwg_type_for_name("MLEADERSTYLE"), 0);
    }
}
