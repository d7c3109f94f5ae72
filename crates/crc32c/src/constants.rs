//! CRC32-C (Castagnoli) constants and lookup tables.
//!
//! Polynomial: 0x1EDC6F41 (reflected: 0x82F63B78)
//! Used by: iSCSI, SCTP, Btrfs, ext4
//!
//! All tables here are computed at compile time, so they exist before any
//! caller can observe them and are never written afterwards.

// All indexing below uses bounded loop indices (0..N where N is the array
// size); clippy cannot prove this inside const fns.
#![allow(clippy::indexing_slicing)]

/// CRC32-C polynomial in reflected (bit-reversed) form.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// Default lane width for the short 3-lane strategy, in bytes.
pub const DEFAULT_SHORT_BLOCK: usize = 256;

/// Default lane width for the long 3-lane strategy, in bytes.
pub const DEFAULT_LONG_BLOCK: usize = 8192;

/// Bytes folded per word step.
pub const WORD: usize = core::mem::size_of::<u64>();

/// Wrapper type to force 64-byte (cache line) alignment.
#[repr(align(64))]
pub struct Aligned64<T>(pub T);

/// Slicing-by-8 lookup tables.
///
/// Row `k`, column `b` is the CRC contribution of byte `b` followed by `k`
/// zero bytes. Total size: 8 * 256 * 4 = 8KB.
pub static TABLES: Aligned64<[[u32; 256]; 8]> = Aligned64(generate_slicing_tables(POLYNOMIAL));

/// Generate the byte-at-a-time table (row 0) for a reflected polynomial.
pub const fn generate_table_0(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;

  while i < 256 {
    let mut crc = i as u32;
    let mut j = 0;
    while j < 8 {
      if crc & 1 != 0 {
        crc = (crc >> 1) ^ poly;
      } else {
        crc >>= 1;
      }
      j += 1;
    }
    table[i] = crc;
    i += 1;
  }

  table
}

/// Generate all 8 slicing-by-8 tables.
///
/// Row `t` is row `t - 1` advanced by one more zero byte.
pub const fn generate_slicing_tables(poly: u32) -> [[u32; 256]; 8] {
  let table0 = generate_table_0(poly);
  let mut tables = [[0u32; 256]; 8];
  tables[0] = table0;

  let mut t = 1;
  while t < 8 {
    let mut i = 0;
    while i < 256 {
      let prev = tables[t - 1][i];
      tables[t][i] = (prev >> 8) ^ table0[(prev & 0xFF) as usize];
      i += 1;
    }
    t += 1;
  }

  tables
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_0_known_entries() {
    let t = &TABLES.0[0];
    assert_eq!(t[0], 0);
    assert_eq!(t[1], 0xF26B_8303);
    assert_eq!(t[128], POLYNOMIAL);
    assert_eq!(t[255], 0xAD7D_5351);
  }

  #[test]
  fn each_row_appends_one_zero_byte() {
    let t = &TABLES.0;
    for row in 1..8 {
      for b in 0..256 {
        let prev = t[row - 1][b];
        assert_eq!(t[row][b], (prev >> 8) ^ t[0][(prev & 0xFF) as usize]);
      }
    }
  }

  #[test]
  fn tables_are_cache_line_aligned() {
    assert_eq!((&TABLES as *const Aligned64<_>).align_offset(64), 0);
  }

  #[test]
  fn default_blocks_are_word_multiples_and_powers_of_two() {
    assert!(DEFAULT_SHORT_BLOCK.is_power_of_two());
    assert!(DEFAULT_LONG_BLOCK.is_power_of_two());
    assert_eq!(DEFAULT_SHORT_BLOCK % WORD, 0);
    assert_eq!(DEFAULT_LONG_BLOCK % DEFAULT_SHORT_BLOCK, 0);
  }
}
