//! QR capacity estimation for versions 1-8.
//!
//! The numbers are approximate character capacities and are only advisory:
//! the encoder decides the real capacity and may pick a larger version.

/// Approximate max characters per level, indexed by `version - 1`.
const CAPACITY_L: [i32; 8] = [25, 47, 77, 114, 154, 195, 224, 279];
const CAPACITY_M: [i32; 8] = [20, 38, 61, 90, 122, 154, 178, 221];
const CAPACITY_Q: [i32; 8] = [16, 29, 47, 67, 87, 108, 125, 157];
const CAPACITY_H: [i32; 8] = [10, 20, 35, 50, 64, 84, 93, 122];

/// Highest version covered by the capacity table.
pub const MAX_TABULATED_VERSION: u32 = 8;

/// Sentinel returned by [`max_chars`] for unsupported inputs.
pub const UNSUPPORTED: i32 = -1;

/// Module grid size and approximate capacity for a version/level pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityEntry {
    pub version: u32,
    pub module_count: u32,
    pub max_chars: i32,
}

/// Number of modules per side of a QR symbol of the given version.
pub fn module_count(version: u32) -> u32 {
    21 + version.saturating_sub(1) * 4
}

/// Approximate max character count for `version` at error-correction `level`.
///
/// Returns [`UNSUPPORTED`] for versions outside 1..=8 or a level other than
/// L, M, Q or H.
pub fn max_chars(version: u32, level: &str) -> i32 {
    let Some(row) = table_row(level) else {
        return UNSUPPORTED;
    };
    if !(1..=MAX_TABULATED_VERSION).contains(&version) {
        return UNSUPPORTED;
    }
    row[(version - 1) as usize]
}

/// Both numbers for a version/level pair, or `None` when the table has no entry.
pub fn capacity(version: u32, level: &str) -> Option<CapacityEntry> {
    let max_chars = max_chars(version, level);
    (max_chars != UNSUPPORTED).then(|| CapacityEntry {
        version,
        module_count: module_count(version),
        max_chars,
    })
}

fn table_row(level: &str) -> Option<&'static [i32; 8]> {
    match level {
        "L" => Some(&CAPACITY_L),
        "M" => Some(&CAPACITY_M),
        "Q" => Some(&CAPACITY_Q),
        "H" => Some(&CAPACITY_H),
        _ => None,
    }
}
