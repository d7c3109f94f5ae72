//! GF(2) matrix operations for CRC32-C zero-shift operators.
//!
//! Appending zero bits to a CRC register is a linear map over GF(2), so it is
//! a 32x32 bit matrix. Squaring that matrix doubles the number of zeros, which
//! lets partial CRCs of disjoint blocks be merged without touching their bytes:
//!
//! ```text
//! crc(A || B) = zeros(len(B)) * crc(A) XOR crc(B)
//! ```
//!
//! Everything here is `const fn` so the default operators are evaluated at
//! compile time.

// All indexing in this module uses bounded loop indices (0..32); clippy cannot
// prove this in const fn contexts.
#![allow(clippy::indexing_slicing)]

use crate::constants::POLYNOMIAL;

/// A 32x32 GF(2) matrix represented as 32 u32 rows.
///
/// Row `i` is the image of the unit vector `1 << i`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Gf2Matrix32([u32; 32]);

impl Gf2Matrix32 {
  /// Build a matrix from its rows.
  #[inline]
  #[must_use]
  pub const fn from_rows(rows: [u32; 32]) -> Self {
    Self(rows)
  }

  /// The rows of the matrix.
  #[inline]
  #[must_use]
  pub const fn rows(&self) -> &[u32; 32] {
    &self.0
  }

  /// Create the identity matrix.
  #[must_use]
  pub const fn identity() -> Self {
    let mut m = [0u32; 32];
    let mut i = 0;
    while i < 32 {
      m[i] = 1 << i;
      i += 1;
    }
    Self(m)
  }

  /// The operator for one zero bit.
  ///
  /// Row 0 is the reflected polynomial; rows 1..31 shift each bit down by one.
  #[must_use]
  pub const fn one_zero_bit(poly: u32) -> Self {
    let mut m = [0u32; 32];
    m[0] = poly;
    let mut row = 1u32;
    let mut n = 1;
    while n < 32 {
      m[n] = row;
      row <<= 1;
      n += 1;
    }
    Self(m)
  }

  /// Multiply the matrix by a vector.
  ///
  /// XORs row `i` for each set bit `i` of `vec`, least significant first,
  /// stopping as soon as no bits remain.
  #[inline]
  #[must_use]
  pub const fn mul_vec(&self, vec: u32) -> u32 {
    let mut sum = 0u32;
    let mut vec = vec;
    let mut i = 0;
    while vec != 0 {
      if vec & 1 != 0 {
        sum ^= self.0[i];
      }
      vec >>= 1;
      i += 1;
    }
    sum
  }

  /// Multiply two matrices (`self * other`, i.e. apply `other` first).
  #[must_use]
  pub const fn mul_mat(&self, other: &Self) -> Self {
    let mut result = [0u32; 32];
    let mut i = 0;
    while i < 32 {
      result[i] = self.mul_vec(other.0[i]);
      i += 1;
    }
    Self(result)
  }

  /// Square the matrix: two applications of the same transform.
  #[inline]
  #[must_use]
  pub const fn square(&self) -> Self {
    self.mul_mat(self)
  }
}

impl core::fmt::Debug for Gf2Matrix32 {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.0.iter().map(|&row| Row(row))).finish()
  }
}

struct Row(u32);

impl core::fmt::Debug for Row {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "{:#010x}", self.0)
  }
}

/// Operator that appends `len` zero bytes to a CRC32-C register.
///
/// Squares the one-zero-bit operator up to one zero byte, then keeps squaring
/// while shifting bits out of `len`, ping-ponging between the `even` and
/// `odd` working matrices. `len` is meant to be a power of two; any other
/// value yields the operator for the largest power of two below it, and
/// `len == 0` yields the same operator as `len == 1`.
#[must_use]
pub const fn zeros_operator(len: usize) -> Gf2Matrix32 {
  let mut odd = Gf2Matrix32::one_zero_bit(POLYNOMIAL);

  // two zero bits
  let mut even = odd.square();
  // four zero bits
  odd = even.square();

  let mut len = len;
  loop {
    // first pass: one zero byte in `even`
    even = odd.square();
    len >>= 1;
    if len == 0 {
      return even;
    }
    odd = even.square();
    len >>= 1;
    if len == 0 {
      return odd;
    }
  }
}

/// Operator that appends any number of zero bytes to a CRC32-C register.
///
/// General square-and-multiply over the bits of `len`; `len == 0` is the
/// identity.
#[must_use]
pub const fn shift_operator(len: usize) -> Gf2Matrix32 {
  let one_byte = {
    let bit = Gf2Matrix32::one_zero_bit(POLYNOMIAL);
    bit.square().square().square()
  };

  let mut result = Gf2Matrix32::identity();
  let mut power = one_byte;
  let mut remaining = len;
  while remaining > 0 {
    if remaining & 1 != 0 {
      result = power.mul_mat(&result);
    }
    power = power.square();
    remaining >>= 1;
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::TABLES;

  /// Bit-at-a-time register update with a zero input bit.
  fn zero_bits(mut crc: u32, bits: usize) -> u32 {
    for _ in 0..bits {
      crc = if crc & 1 != 0 { (crc >> 1) ^ POLYNOMIAL } else { crc >> 1 };
    }
    crc
  }

  #[test]
  fn mul_vec_selects_rows() {
    let m = Gf2Matrix32::identity();
    assert_eq!(m.mul_vec(0), 0);
    assert_eq!(m.mul_vec(0xDEAD_BEEF), 0xDEAD_BEEF);

    let mut rows = [0u32; 32];
    rows[0] = 0x11;
    rows[3] = 0x22;
    rows[31] = 0x44;
    let m = Gf2Matrix32::from_rows(rows);
    assert_eq!(m.mul_vec(1), 0x11);
    assert_eq!(m.mul_vec(0b1001), 0x33);
    assert_eq!(m.mul_vec(0x8000_0009), 0x77);
  }

  #[test]
  fn one_zero_bit_matches_register_step() {
    let op = Gf2Matrix32::one_zero_bit(POLYNOMIAL);
    for crc in [0u32, 1, 2, 0x8000_0000, 0x1234_5678, u32::MAX] {
      assert_eq!(op.mul_vec(crc), zero_bits(crc, 1), "crc={crc:#x}");
    }
  }

  #[test]
  fn square_doubles_the_shift() {
    let op = Gf2Matrix32::one_zero_bit(POLYNOMIAL).square().square();
    assert_eq!(op.mul_vec(0xCAFE_F00D), zero_bits(0xCAFE_F00D, 4));
  }

  #[test]
  fn zeros_operator_one_byte_matches_table() {
    let op = zeros_operator(1);
    for b in 0..256u32 {
      assert_eq!(op.mul_vec(b), TABLES.0[0][b as usize]);
    }
  }

  #[test]
  fn zeros_operator_zero_equals_one() {
    assert_eq!(zeros_operator(0), zeros_operator(1));
  }

  #[test]
  fn zeros_operator_powers_of_two() {
    for shift in 0..14 {
      let len = 1usize << shift;
      let op = zeros_operator(len);
      let crc = 0x9E37_79B9u32.rotate_left(shift);
      assert_eq!(op.mul_vec(crc), zero_bits(crc, len * 8), "len={len}");
    }
  }

  #[test]
  fn zeros_operator_rounds_down_to_power_of_two() {
    assert_eq!(zeros_operator(3), zeros_operator(2));
    assert_eq!(zeros_operator(300), zeros_operator(256));
  }

  #[test]
  fn shift_operator_any_length() {
    assert_eq!(shift_operator(0), Gf2Matrix32::identity());
    for len in [1usize, 2, 3, 7, 8, 100, 255, 256, 1000] {
      let crc = 0x0BAD_CAFE;
      assert_eq!(shift_operator(len).mul_vec(crc), zero_bits(crc, len * 8), "len={len}");
    }
  }

  #[test]
  fn shift_operator_agrees_with_zeros_operator_on_powers_of_two() {
    for len in [1usize, 2, 64, 256, 8192] {
      assert_eq!(shift_operator(len), zeros_operator(len));
    }
  }
}
