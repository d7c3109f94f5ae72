//! Runtime CPU detection.
//!
//! Provides the cached [`get()`] used by the CRC32C dispatcher. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via `is_x86_feature_detected!` / `is_aarch64_feature_detected!`)
//! - Caching (via `OnceLock` with `std`; compile-time only without)
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always returns portable caps)

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::{Arch, Caps, Detected};

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

/// Set or clear the capabilities override.
///
/// When set, [`get()`] returns the override instead of detecting. Pass `None`
/// to resume detection. Consumers that cache their own selection (such as the
/// CRC32C dispatcher) only observe an override installed before their first
/// call.
pub fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

/// Check if an override is currently set.
#[inline]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

fn get_override() -> Option<Detected> {
  if !has_override() {
    return None;
  }
  Some(Detected {
    arch: Arch::current(),
    caps: Caps(OVERRIDE_BITS.load(Ordering::Acquire)),
  })
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get detected CPU capabilities.
///
/// The probe runs at most once per process under `std`.
#[inline]
#[must_use]
pub fn get() -> Detected {
  // Miri cannot interpret CRC intrinsics.
  if cfg!(miri) {
    return Detected::PORTABLE;
  }

  if let Some(result) = get_override() {
    return result;
  }

  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<Detected> = OnceLock::new();
    *CACHED.get_or_init(detect_uncached)
  }

  #[cfg(not(feature = "std"))]
  {
    detect_uncached()
  }
}

/// Detect capabilities without caching.
#[must_use]
pub fn detect_uncached() -> Detected {
  Detected {
    arch: Arch::current(),
    caps: caps_static().union(caps_runtime()),
  }
}

/// Capabilities guaranteed by the compilation target.
#[inline]
#[must_use]
pub const fn caps_static() -> Caps {
  let mut caps = Caps::NONE;
  if cfg!(all(target_arch = "x86_64", target_feature = "sse4.2")) {
    caps = caps.union(crate::caps::x86::SSE42);
  }
  if cfg!(all(target_arch = "aarch64", target_feature = "crc")) {
    caps = caps.union(crate::caps::aarch64::CRC);
  }
  caps
}

#[cfg(all(feature = "std", target_arch = "x86_64"))]
fn caps_runtime() -> Caps {
  if std::arch::is_x86_feature_detected!("sse4.2") {
    crate::caps::x86::SSE42
  } else {
    Caps::NONE
  }
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn caps_runtime() -> Caps {
  if std::arch::is_aarch64_feature_detected!("crc") {
    crate::caps::aarch64::CRC
  } else {
    Caps::NONE
  }
}

#[cfg(not(all(feature = "std", any(target_arch = "x86_64", target_arch = "aarch64"))))]
fn caps_runtime() -> Caps {
  Caps::NONE
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cached_matches_uncached() {
    if has_override() {
      return;
    }
    assert_eq!(get(), detect_uncached());
  }

  #[test]
  fn static_caps_are_subset_of_detected() {
    assert!(detect_uncached().caps.has(caps_static()));
  }

  #[test]
  fn detected_arch_matches_target() {
    assert_eq!(detect_uncached().arch, Arch::current());
  }

  #[cfg(all(feature = "std", target_arch = "x86_64"))]
  #[test]
  fn x86_runtime_probe_agrees_with_std() {
    let expected = std::arch::is_x86_feature_detected!("sse4.2");
    assert_eq!(detect_uncached().has_crc32c(), expected);
  }
}
