//! Byte-indexed zero-shift tables and the lane plan that owns them.
//!
//! A [`ShiftTable`] applies a zero-shift operator to a CRC in four lookups
//! instead of a 32-row matrix-vector product. The 3-lane kernels use one table
//! per block width to fold lane results back together.

// All indexing in this module uses bounded loop indices or masked bytes.
#![allow(clippy::indexing_slicing)]

use crate::{
  constants::{DEFAULT_LONG_BLOCK, DEFAULT_SHORT_BLOCK},
  gf2::{Gf2Matrix32, zeros_operator},
};

/// Four 256-entry tables applying a zero-shift operator byte by byte.
#[derive(Clone, PartialEq, Eq)]
#[repr(align(64))]
pub struct ShiftTable([[u32; 256]; 4]);

impl ShiftTable {
  /// Decompose `op` into per-byte-position lookup tables.
  ///
  /// `table[p][v] = op * (v << 8p)`.
  #[must_use]
  pub const fn from_operator(op: &Gf2Matrix32) -> Self {
    let mut table = [[0u32; 256]; 4];
    let mut v = 0usize;
    while v < 256 {
      let n = v as u32;
      table[0][v] = op.mul_vec(n);
      table[1][v] = op.mul_vec(n << 8);
      table[2][v] = op.mul_vec(n << 16);
      table[3][v] = op.mul_vec(n << 24);
      v += 1;
    }
    Self(table)
  }

  /// Table that appends `len` zero bytes (`len` a power of two).
  #[must_use]
  pub const fn for_zeros(len: usize) -> Self {
    Self::from_operator(&zeros_operator(len))
  }

  /// Apply the shift to `crc`.
  #[inline(always)]
  #[must_use]
  pub const fn apply(&self, crc: u32) -> u32 {
    self.0[0][(crc & 0xFF) as usize]
      ^ self.0[1][((crc >> 8) & 0xFF) as usize]
      ^ self.0[2][((crc >> 16) & 0xFF) as usize]
      ^ self.0[3][(crc >> 24) as usize]
  }
}

impl core::fmt::Debug for ShiftTable {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ShiftTable").finish_non_exhaustive()
  }
}

/// One 3-lane block size with the table that shifts a lane across it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockShift {
  /// Bytes per lane.
  pub width: usize,
  /// Appends `width` zero bytes.
  pub table: ShiftTable,
}

impl BlockShift {
  #[must_use]
  pub const fn new(width: usize) -> Self {
    Self {
      width,
      table: ShiftTable::for_zeros(width),
    }
  }

  /// Bytes consumed by one 3-lane step.
  #[inline(always)]
  #[must_use]
  pub const fn stride(&self) -> usize {
    3 * self.width
  }
}

/// Short and long block widths used by the 3-lane strategies.
///
/// Both widths are powers of two, multiples of 8, and `long > short`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanePlan {
  pub short: BlockShift,
  pub long: BlockShift,
}

impl LanePlan {
  /// The default 256 / 8192 byte plan, built at compile time.
  pub const DEFAULT: Self = Self::new(DEFAULT_SHORT_BLOCK, DEFAULT_LONG_BLOCK);

  #[must_use]
  pub const fn new(short: usize, long: usize) -> Self {
    Self {
      short: BlockShift::new(short),
      long: BlockShift::new(long),
    }
  }

  /// Whether `short`/`long` can drive the 3-lane kernels.
  #[must_use]
  pub const fn is_valid(short: usize, long: usize) -> bool {
    short.is_power_of_two() && long.is_power_of_two() && short >= crate::constants::WORD && long > short
  }
}

/// The default plan, shared by every caller that does not override block sizes.
pub static DEFAULT_PLAN: LanePlan = LanePlan::DEFAULT;
