//! Explicit engine entry points, bypassing backend selection.
//!
//! These exist for equivalence testing and benchmarking. They take and
//! return the same external accumulator as [`crate::crc32c`] and use the
//! active lane plan. The hardware entry points return `None` when the CPU
//! lacks the CRC32C instruction (or a capability override hides it).

use crate::{dispatch, portable as table};

/// Table-driven engine, length-dependent 1/3-lane strategy.
#[inline]
#[must_use]
pub fn portable(buf: &[u8], crc_in: u32) -> u32 {
  !table::compute(!crc_in, buf, dispatch::active().plan)
}

/// Table-driven engine, single lane at every length.
#[inline]
#[must_use]
pub fn portable_1way(buf: &[u8], crc_in: u32) -> u32 {
  !table::compute_1way(!crc_in, buf)
}

/// Table-driven engine, 3-lane short blocks only (single lane below
/// three short blocks).
#[inline]
#[must_use]
pub fn portable_short(buf: &[u8], crc_in: u32) -> u32 {
  !table::compute_short(!crc_in, buf, dispatch::active().plan)
}

/// Hardware engine, length-dependent 1/3-lane strategy.
#[inline]
#[must_use]
pub fn hardware(buf: &[u8], crc_in: u32) -> Option<u32> {
  if !platform::has_crc32c() {
    return None;
  }
  let plan = dispatch::active().plan;

  #[cfg(target_arch = "x86_64")]
  {
    Some(!crate::x86_64::compute_sse42_safe(!crc_in, buf, plan))
  }
  #[cfg(target_arch = "aarch64")]
  {
    Some(!crate::aarch64::compute_crc_safe(!crc_in, buf, plan))
  }
  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    let _ = (buf, crc_in, plan);
    None
  }
}

/// Hardware engine, 3-lane short blocks only.
#[inline]
#[must_use]
pub fn hardware_short(buf: &[u8], crc_in: u32) -> Option<u32> {
  if !platform::has_crc32c() {
    return None;
  }
  let plan = dispatch::active().plan;

  #[cfg(target_arch = "x86_64")]
  {
    Some(!crate::x86_64::compute_sse42_short_safe(!crc_in, buf, plan))
  }
  #[cfg(target_arch = "aarch64")]
  {
    Some(!crate::aarch64::compute_crc_short_safe(!crc_in, buf, plan))
  }
  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    let _ = (buf, crc_in, plan);
    None
  }
}

/// Hardware engine, single lane at every length.
#[inline]
#[must_use]
pub fn hardware_1way(buf: &[u8], crc_in: u32) -> Option<u32> {
  if !platform::has_crc32c() {
    return None;
  }

  #[cfg(target_arch = "x86_64")]
  {
    Some(!crate::x86_64::compute_sse42_1way_safe(!crc_in, buf))
  }
  #[cfg(target_arch = "aarch64")]
  {
    Some(!crate::aarch64::compute_crc_1way_safe(!crc_in, buf))
  }
  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    let _ = (buf, crc_in);
    None
  }
}
