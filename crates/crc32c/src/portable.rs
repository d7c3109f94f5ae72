//! Portable CRC32-C engine using slicing-by-8.
//!
//! Each 8-byte word is XORed into the register and resolved with 8
//! independent table lookups, one per byte position, which the CPU can issue
//! in parallel. On top of that the 3-lane strategy in [`crate::lanes`] keeps
//! three independent lookup chains in flight.

// Table indices are masked to a single byte.
#![allow(clippy::indexing_slicing)]

use crate::{
  constants::TABLES,
  lanes::{self, Fold},
  shift::LanePlan,
};

/// Table-driven fold.
pub(crate) struct TableFold;

impl Fold for TableFold {
  #[inline(always)]
  unsafe fn word(state: u32, word: u64) -> u32 {
    fold_word(state, word)
  }

  #[inline(always)]
  unsafe fn byte(state: u32, byte: u8) -> u32 {
    fold_byte(state, byte)
  }
}

/// Fold 8 little-endian bytes into the register.
///
/// `TABLES[7]` handles the first byte (furthest from the end), `TABLES[0]`
/// the last.
#[inline(always)]
#[must_use]
pub fn fold_word(state: u32, word: u64) -> u32 {
  let t = &TABLES.0;
  let v = (state as u64) ^ word;
  t[7][(v & 0xFF) as usize]
    ^ t[6][((v >> 8) & 0xFF) as usize]
    ^ t[5][((v >> 16) & 0xFF) as usize]
    ^ t[4][((v >> 24) & 0xFF) as usize]
    ^ t[3][((v >> 32) & 0xFF) as usize]
    ^ t[2][((v >> 40) & 0xFF) as usize]
    ^ t[1][((v >> 48) & 0xFF) as usize]
    ^ t[0][(v >> 56) as usize]
}

/// Fold one byte into the register.
#[inline(always)]
#[must_use]
pub fn fold_byte(state: u32, byte: u8) -> u32 {
  TABLES.0[0][((state ^ byte as u32) & 0xFF) as usize] ^ (state >> 8)
}

/// Advance the inverted register over `data` with the 3-lane strategy.
#[inline]
#[must_use]
pub fn compute(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: `TableFold` uses no target-specific instructions.
  unsafe { lanes::compute::<TableFold>(state, data, plan) }
}

/// Advance the inverted register with 3-lane short blocks only.
#[inline]
#[must_use]
pub fn compute_short(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: `TableFold` uses no target-specific instructions.
  unsafe { lanes::compute_short::<TableFold>(state, data, &plan.short) }
}

/// Advance the inverted register over `data` with a single lane.
#[inline]
#[must_use]
pub fn compute_1way(state: u32, data: &[u8]) -> u32 {
  // SAFETY: `TableFold` uses no target-specific instructions.
  unsafe { lanes::compute_1way::<TableFold>(state, data) }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;
  use crate::shift::DEFAULT_PLAN;

  /// Standard CRC32-C test vector: "123456789" -> 0xE3069283
  const CHECK_VALUE: u32 = 0xE306_9283;

  fn crc(data: &[u8]) -> u32 {
    !compute(!0, data, &DEFAULT_PLAN)
  }

  /// Bitwise reference, one bit at a time.
  fn bitwise(data: &[u8]) -> u32 {
    let mut crc = !0u32;
    for &b in data {
      crc ^= b as u32;
      for _ in 0..8 {
        crc = if crc & 1 != 0 { (crc >> 1) ^ crate::constants::POLYNOMIAL } else { crc >> 1 };
      }
    }
    !crc
  }

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 7)) as u8).collect()
  }

  #[test]
  fn test_check_string() {
    assert_eq!(crc(b"123456789"), CHECK_VALUE);
  }

  #[test]
  fn test_empty() {
    assert_eq!(crc(b""), 0);
    assert_eq!(compute(0x1234_5678, b"", &DEFAULT_PLAN), 0x1234_5678);
  }

  #[test]
  fn test_single_byte() {
    assert_eq!(crc(&[0x00]), 0x527D_5351);
  }

  #[test]
  fn fold_word_equals_eight_byte_folds() {
    let bytes = *b"\x01\x23\x45\x67\x89\xAB\xCD\xEF";
    let mut expected = 0xA5A5_5A5Au32;
    for b in bytes {
      expected = fold_byte(expected, b);
    }
    assert_eq!(fold_word(0xA5A5_5A5A, u64::from_le_bytes(bytes)), expected);
  }

  #[test]
  fn matches_bitwise_across_regimes() {
    for len in [0, 1, 7, 8, 9, 63, 767, 768, 769, 1500, 24575, 24576, 24577, 30000] {
      let data = pattern(len);
      assert_eq!(crc(&data), bitwise(&data), "len={len}");
    }
  }

  #[test]
  fn one_way_matches_three_way() {
    for len in [0, 5, 768, 4096, 24576 + 768 + 7] {
      let data = pattern(len);
      assert_eq!(compute_1way(!0, &data), compute(!0, &data, &DEFAULT_PLAN), "len={len}");
    }
  }

  #[test]
  fn short_only_matches_bitwise() {
    for len in [0, 767, 768, 769, 24575, 24576, 24577, 30000] {
      let data = pattern(len);
      assert_eq!(!compute_short(!0, &data, &DEFAULT_PLAN), bitwise(&data), "len={len}");
    }
    let plan = LanePlan::new(8, 32);
    for len in 0..200 {
      let data = pattern(len);
      assert_eq!(!compute_short(!0, &data, &plan), bitwise(&data), "len={len}");
    }
  }

  #[test]
  fn small_plan_exercises_lanes() {
    let plan = LanePlan::new(8, 32);
    for len in 0..300 {
      let data = pattern(len);
      assert_eq!(!compute(!0, &data, &plan), bitwise(&data), "len={len}");
    }
  }
}
