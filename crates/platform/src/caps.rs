//! CPU capability representation.
//!
//! This module answers one question for the CRC32C dispatcher: "can this
//! machine run a hardware CRC32C instruction?"
//!
//! # Bit Layout
//!
//! - Bits 0-31: x86/x86_64 features
//! - Bits 32-63: aarch64 features
//!
//! # Usage
//!
//! ```
//! use platform::caps::{Caps, x86};
//!
//! let caps = Caps::NONE | x86::SSE42;
//! assert!(caps.has(x86::CRC32C_READY));
//! assert!(!Caps::NONE.has(x86::CRC32C_READY));
//! ```

use core::fmt;

/// CPU capabilities: a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Create a capability set from a raw word.
  ///
  /// Only available in test builds or with the `testing` feature.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(bits: u64) -> Self {
    Self(bits)
  }

  /// Access the raw underlying word.
  #[inline]
  #[must_use]
  pub const fn as_raw(self) -> u64 {
    self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Remove every feature of `other` from `self`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit % 64))
  }

  /// Names of every known feature present in this set.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES
      .iter()
      .filter(move |(caps, _)| self.has(*caps))
      .map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.feature_names()).finish()
  }
}

const FEATURE_NAMES: [(Caps, &str); 2] = [(x86::SSE42, "sse4.2"), (aarch64::CRC, "crc")];

/// x86/x86_64 features.
pub mod x86 {
  use super::Caps;

  /// SSE4.2, which carries the `crc32` instruction (CRC32C polynomial only).
  pub const SSE42: Caps = Caps::bit(4);

  /// Everything the hardware CRC32C engine needs.
  pub const CRC32C_READY: Caps = SSE42;
}

/// aarch64 features.
pub mod aarch64 {
  use super::Caps;

  /// ARMv8 CRC32 extension (`crc32c{b,h,w,x}`).
  pub const CRC: Caps = Caps::bit(40);

  /// Everything the hardware CRC32C engine needs.
  pub const CRC_READY: Caps = CRC;
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Architecture plus the capabilities detected on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Detected {
  pub arch: Arch,
  pub caps: Caps,
}

impl Detected {
  /// Portable-only result (no hardware CRC).
  pub const PORTABLE: Self = Self {
    arch: Arch::current(),
    caps: Caps::NONE,
  };

  /// Whether the hardware CRC32C instruction can run on this machine.
  #[inline]
  #[must_use]
  pub const fn has_crc32c(self) -> bool {
    match self.arch {
      Arch::X86_64 => self.caps.has(x86::CRC32C_READY),
      Arch::Aarch64 => self.caps.has(aarch64::CRC_READY),
      Arch::Other => false,
    }
  }
}

impl fmt::Display for Detected {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {:?}", self.arch, self.caps)
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, vec::Vec};

  use super::*;

  #[test]
  fn has_is_subset_check() {
    let caps = x86::SSE42 | aarch64::CRC;
    assert!(caps.has(x86::SSE42));
    assert!(caps.has(aarch64::CRC));
    assert!(caps.has(Caps::NONE));
    assert!(!Caps::NONE.has(x86::SSE42));
  }

  #[test]
  fn difference_clears_bits() {
    let caps = (x86::SSE42 | aarch64::CRC).difference(x86::SSE42);
    assert!(!caps.has(x86::SSE42));
    assert!(caps.has(aarch64::CRC));
    assert!(caps.difference(aarch64::CRC).is_empty());
  }

  #[test]
  fn feature_names_lists_present_features() {
    let names: Vec<_> = x86::SSE42.feature_names().collect();
    assert_eq!(names, ["sse4.2"]);
    assert_eq!(Caps::NONE.feature_names().count(), 0);
    assert_eq!(format!("{:?}", aarch64::CRC), r#"{"crc"}"#);
  }

  #[test]
  fn has_crc32c_is_arch_specific() {
    let x86 = Detected {
      arch: Arch::X86_64,
      caps: x86::SSE42,
    };
    assert!(x86.has_crc32c());

    // aarch64 bit on an x86 machine does not count.
    let mismatched = Detected {
      arch: Arch::X86_64,
      caps: aarch64::CRC,
    };
    assert!(!mismatched.has_crc32c());

    let other = Detected {
      arch: Arch::Other,
      caps: x86::SSE42 | aarch64::CRC,
    };
    assert!(!other.has_crc32c());
    assert!(!Detected::PORTABLE.has_crc32c());
  }
}
