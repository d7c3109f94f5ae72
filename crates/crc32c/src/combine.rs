//! CRC combination.
//!
//! Computes `crc(A || B)` from `crc(A)`, `crc(B)` and `len(B)` in
//! O(log len(B)) time, without touching the bytes of either part. The first
//! CRC is multiplied by `x^(8 * len(B))` modulo the generator polynomial (the
//! zero-shift operator for `len(B)` bytes) and XORed with the second.

use crate::{constants::POLYNOMIAL, gf2::Gf2Matrix32};

/// Combine two CRC32-C values.
///
/// `crc_a` and `crc_b` are [`crate::crc32c`] results over `A` and `B`, each
/// started from 0.
///
/// # Examples
///
/// ```
/// let a = crc32c::crc32c(b"12345", 0);
/// let b = crc32c::crc32c(b"6789", 0);
/// assert_eq!(crc32c::combine(a, b, 4), 0xE306_9283);
/// ```
#[must_use]
pub const fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
  if len_b == 0 {
    return crc_a;
  }

  // x -> x^2 -> x^4 -> x^8: one zero byte.
  let mut op = Gf2Matrix32::one_zero_bit(POLYNOMIAL).square().square().square();

  // Apply (x^8)^len_b to crc_a, square-and-multiply on the byte length.
  let mut crc = crc_a;
  let mut len = len_b;
  loop {
    if len & 1 != 0 {
      crc = op.mul_vec(crc);
    }
    len >>= 1;
    if len == 0 {
      break;
    }
    op = op.square();
  }

  crc ^ crc_b
}
