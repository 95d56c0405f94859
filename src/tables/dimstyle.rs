//! Dimension style table entry

use super::TableEntryCommon;
use crate::types::{Color, Handle};

/// A dimension style table entry.
///
/// Only the variables stored in every generation are kept; each field is
/// named after its DIMxxx system variable.
#[derive(Debug, Clone, PartialEq)]
pub struct DimStyle {
    pub common: TableEntryCommon,

    // ─── Text ───
    /// Text prefix/suffix (DIMPOST)
    pub dimpost: String,
    /// Alternate text prefix/suffix (DIMAPOST)
    pub dimapost: String,
    /// Text height (DIMTXT)
    pub dimtxt: f64,
    /// Text vertical position (DIMTAD)
    pub dimtad: i16,
    /// Text vertical offset (DIMTVP)
    pub dimtvp: f64,
    /// Gap around text (DIMGAP)
    pub dimgap: f64,
    /// Text inside horizontal (DIMTIH)
    pub dimtih: bool,
    /// Text outside horizontal (DIMTOH)
    pub dimtoh: bool,
    /// Horizontal justification (DIMJUST)
    pub dimjust: i16,
    /// Text style (DIMTXSTY)
    pub dimtxsty: Handle,

    // ─── Lines and arrows ───
    /// Overall scale (DIMSCALE)
    pub dimscale: f64,
    /// Arrow size (DIMASZ)
    pub dimasz: f64,
    /// Extension line offset (DIMEXO)
    pub dimexo: f64,
    /// Baseline increment (DIMDLI)
    pub dimdli: f64,
    /// Extension line extension (DIMEXE)
    pub dimexe: f64,
    /// Dimension line extension (DIMDLE)
    pub dimdle: f64,
    /// Center mark size (DIMCEN)
    pub dimcen: f64,
    /// Tick size (DIMTSZ)
    pub dimtsz: f64,
    /// Suppress first extension line (DIMSE1)
    pub dimse1: bool,
    /// Suppress second extension line (DIMSE2)
    pub dimse2: bool,
    /// Suppress first dimension line (DIMSD1)
    pub dimsd1: bool,
    /// Suppress second dimension line (DIMSD2)
    pub dimsd2: bool,
    /// Separate arrow blocks (DIMSAH)
    pub dimsah: bool,
    pub dimclrd: Color,
    pub dimclre: Color,
    pub dimclrt: Color,
    /// Leader arrow block (DIMLDRBLK)
    pub dimldrblk: Handle,
    /// Arrow block (DIMBLK)
    pub dimblk: Handle,
    pub dimblk1: Handle,
    pub dimblk2: Handle,

    // ─── Units and tolerances ───
    /// Linear measurement factor (DIMLFAC)
    pub dimlfac: f64,
    /// Rounding (DIMRND)
    pub dimrnd: f64,
    /// Plus tolerance (DIMTP)
    pub dimtp: f64,
    /// Minus tolerance (DIMTM)
    pub dimtm: f64,
    /// Tolerance text scale (DIMTFAC)
    pub dimtfac: f64,
    /// Generate tolerances (DIMTOL)
    pub dimtol: bool,
    /// Generate limits (DIMLIM)
    pub dimlim: bool,
    /// Zero suppression (DIMZIN)
    pub dimzin: i16,
    /// Decimal places (DIMDEC)
    pub dimdec: i16,
    /// Tolerance decimal places (DIMTDEC)
    pub dimtdec: i16,
    /// Angular units (DIMAUNIT)
    pub dimaunit: i16,
    /// Linear units (DIMLUNIT, code 277; DIMUNIT before R2000)
    pub dimlunit: i16,

    // ─── Alternate units ───
    /// Alternate units on (DIMALT)
    pub dimalt: bool,
    /// Alternate unit decimal places (DIMALTD)
    pub dimaltd: i16,
    /// Alternate unit factor (DIMALTF)
    pub dimaltf: f64,

    // ─── Fit ───
    /// Force line between extension lines (DIMTOFL)
    pub dimtofl: bool,
    /// Force text inside (DIMTIX)
    pub dimtix: bool,
    /// Suppress outside dimension lines (DIMSOXD)
    pub dimsoxd: bool,
    /// User positioned text (DIMUPT)
    pub dimupt: bool,
}

impl Default for DimStyle {
    fn default() -> Self {
        DimStyle {
            common: TableEntryCommon::default(),
            dimpost: String::new(),
            dimapost: String::new(),
            dimtxt: 0.18,
            dimtad: 0,
            dimtvp: 0.0,
            dimgap: 0.09,
            dimtih: true,
            dimtoh: true,
            dimjust: 0,
            dimtxsty: Handle::NULL,
            dimscale: 1.0,
            dimasz: 0.18,
            dimexo: 0.0625,
            dimdli: 0.38,
            dimexe: 0.18,
            dimdle: 0.0,
            dimcen: 0.09,
            dimtsz: 0.0,
            dimse1: false,
            dimse2: false,
            dimsd1: false,
            dimsd2: false,
            dimsah: false,
            dimclrd: Color::ByBlock,
            dimclre: Color::ByBlock,
            dimclrt: Color::ByBlock,
            dimldrblk: Handle::NULL,
            dimblk: Handle::NULL,
            dimblk1: Handle::NULL,
            dimblk2: Handle::NULL,
            dimlfac: 1.0,
            dimrnd: 0.0,
            dimtp: 0.0,
            dimtm: 0.0,
            dimtfac: 1.0,
            dimtol: false,
            dimlim: false,
            dimzin: 0,
            dimdec: 4,
            dimtdec: 4,
            dimaunit: 0,
            dimlunit: 2,
            dimalt: false,
            dimaltd: 2,
            dimaltf: 25.4,
            dimtofl: false,
            dimtix: false,
            dimsoxd: false,
            dimupt: false,
        }
    }
}

impl DimStyle {
    pub fn new(name: impl Into<String>) -> Self {
        DimStyle {
            common: TableEntryCommon {
                name: name.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
