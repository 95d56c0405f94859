//! Line weights as stored in DWG records

use std::fmt;

/// Widths in 1/100 mm for the stored indices 0-23.
const DWG_WEIGHTS: [i16; 24] = [
    0, 5, 9, 13, 15, 18, 20, 25, 30, 35, 40, 50, 53, 60, 70, 80, 90, 100, 106, 120, 140, 158,
    200, 211,
];

/// Line weight of a layer or entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LineWeight {
    #[default]
    ByLayer,
    ByBlock,
    Default,
    /// Width in 1/100 mm.
    Value(i16),
}

impl LineWeight {
    /// Convert the compact DWG line weight index.
    ///
    /// Indices 0-23 select a width from the standard table, 29/30/31 are
    /// ByLayer/ByBlock/Default. Anything else falls back to Default.
    pub fn from_dwg_index(index: u8) -> Self {
        match index {
            0..=23 => LineWeight::Value(DWG_WEIGHTS[index as usize]),
            29 => LineWeight::ByLayer,
            30 => LineWeight::ByBlock,
            _ => LineWeight::Default,
        }
    }
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => f.write_str("ByLayer"),
            LineWeight::ByBlock => f.write_str("ByBlock"),
            LineWeight::Default => f.write_str("Default"),
            LineWeight::Value(v) => write!(f, "{:.2}mm", *v as f64 / 100.0),
        }
    }
}
