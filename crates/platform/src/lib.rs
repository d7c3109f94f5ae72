//! CPU capability detection for the CRC32C engine.
//!
//! This crate is the **single source of truth** for the one question the
//! checksum dispatcher asks: is a hardware CRC32C instruction available?
//!
//! # Main Entry Point
//!
//! ```
//! let detected = platform::get();
//!
//! if detected.has_crc32c() {
//!   // SSE4.2 `crc32` (x86_64) or the ARMv8 CRC extension (aarch64).
//! }
//! ```
//!
//! # Design Philosophy
//!
//! 1. **One API**: algorithms query [`get()`] instead of doing ad-hoc detection.
//! 2. **Zero-cost when possible**: compile-time features are detected via `cfg!`.
//! 3. **Cached otherwise**: runtime detection is cached in a `OnceLock` (std).
//! 4. **Miri-safe**: under Miri, always returns portable-only caps.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps, Detected};
pub use detect::{caps_static, detect_uncached, has_override, set_caps_override};

/// Get detected CPU capabilities.
///
/// With `std` the probe runs once and is cached; without `std` only
/// compile-time target features are reported.
#[inline]
#[must_use]
pub fn get() -> Detected {
  detect::get()
}

/// Get just the capability bits.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  get().caps
}

/// Whether the hardware CRC32C instruction is usable on this machine.
#[inline]
#[must_use]
pub fn has_crc32c() -> bool {
  get().has_crc32c()
}

/// Initialize with user-supplied capabilities, bypassing detection.
///
/// Useful on bare metal where the CPU is known at deployment.
#[inline]
pub fn init_with_caps(caps: Caps) {
  set_caps_override(Some(caps));
}
