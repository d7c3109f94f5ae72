//! Checksum verification error.

use core::fmt;

/// A buffer's CRC32-C did not match the expected value.
///
/// # Examples
///
/// ```
/// use crc32c::{ChecksumMismatch, verify};
///
/// assert!(verify(b"123456789", 0xE306_9283).is_ok());
///
/// let err = verify(b"123456780", 0xE306_9283).unwrap_err();
/// assert_eq!(err.expected(), 0xE306_9283);
/// assert_ne!(err.actual(), err.expected());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChecksumMismatch {
  expected: u32,
  actual: u32,
}

impl ChecksumMismatch {
  #[inline]
  #[must_use]
  pub const fn new(expected: u32, actual: u32) -> Self {
    Self { expected, actual }
  }

  /// The checksum the caller expected.
  #[inline]
  #[must_use]
  pub const fn expected(&self) -> u32 {
    self.expected
  }

  /// The checksum of the data.
  #[inline]
  #[must_use]
  pub const fn actual(&self) -> u32 {
    self.actual
  }
}

impl fmt::Display for ChecksumMismatch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "crc32c mismatch: expected {:#010x}, got {:#010x}",
      self.expected, self.actual
    )
  }
}

impl core::error::Error for ChecksumMismatch {}

/// Check `buf` against an expected CRC32-C (seed 0).
#[inline]
pub fn verify(buf: &[u8], expected: u32) -> Result<(), ChecksumMismatch> {
  let actual = crate::crc32c(buf, 0);
  if actual == expected {
    Ok(())
  } else {
    Err(ChecksumMismatch::new(expected, actual))
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn display_message() {
    let err = ChecksumMismatch::new(0xE306_9283, 0x1);
    assert_eq!(err.to_string(), "crc32c mismatch: expected 0xe3069283, got 0x00000001");
  }

  #[test]
  fn verify_paths() {
    assert_eq!(verify(b"", 0), Ok(()));
    assert_eq!(verify(b"123456789", 0xE306_9283), Ok(()));
    let err = verify(b"123456789", 0).unwrap_err();
    assert_eq!(err, ChecksumMismatch::new(0, 0xE306_9283));
  }

  #[test]
  fn error_trait_impl() {
    use core::error::Error;

    let err = ChecksumMismatch::new(1, 2);
    assert!(err.source().is_none());
  }

  #[test]
  fn trait_bounds() {
    fn assert_send_sync<T: Send + Sync + Copy>() {}
    assert_send_sync::<ChecksumMismatch>();
  }
}
