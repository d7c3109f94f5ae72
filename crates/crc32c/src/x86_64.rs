//! x86_64 hardware CRC32-C engine (SSE4.2 `crc32` instruction).
//!
//! # Safety
//!
//! Uses `unsafe` for x86 intrinsics. Callers must ensure SSE4.2 is available
//! before executing the accelerated path (the dispatcher does this).
#![allow(unsafe_code)]

use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u64};

use crate::{
  lanes::{self, Fold},
  shift::LanePlan,
};

/// `crc32` instruction fold.
pub(crate) struct Sse42Fold;

impl Fold for Sse42Fold {
  #[inline(always)]
  unsafe fn word(state: u32, word: u64) -> u32 {
    // SAFETY: caller guarantees SSE4.2. The upper half of the result is zero.
    unsafe { _mm_crc32_u64(state as u64, word) as u32 }
  }

  #[inline(always)]
  unsafe fn byte(state: u32, byte: u8) -> u32 {
    // SAFETY: caller guarantees SSE4.2.
    unsafe { _mm_crc32_u8(state, byte) }
  }
}

/// 3-lane CRC32-C update using SSE4.2.
///
/// `state` is the current state (pre-inverted).
///
/// # Safety
///
/// Caller must ensure SSE4.2 is available.
#[inline]
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn compute_sse42(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: target_feature enables SSE4.2 for the inlined folds.
  unsafe { lanes::compute::<Sse42Fold>(state, data, plan) }
}

/// 3-lane CRC32-C update using SSE4.2, short blocks only.
///
/// # Safety
///
/// Caller must ensure SSE4.2 is available.
#[inline]
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn compute_sse42_short(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: target_feature enables SSE4.2 for the inlined folds.
  unsafe { lanes::compute_short::<Sse42Fold>(state, data, &plan.short) }
}

/// Single-lane CRC32-C update using SSE4.2.
///
/// # Safety
///
/// Caller must ensure SSE4.2 is available.
#[inline]
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn compute_sse42_1way(state: u32, data: &[u8]) -> u32 {
  // SAFETY: target_feature enables SSE4.2 for the inlined folds.
  unsafe { lanes::compute_1way::<Sse42Fold>(state, data) }
}

/// Safe wrapper for the 3-lane SSE4.2 engine.
///
/// Only selected by the dispatcher after SSE4.2 was detected.
#[inline]
pub(crate) fn compute_sse42_safe(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: Dispatcher verifies SSE4.2 before selecting this kernel.
  unsafe { compute_sse42(state, data, plan) }
}

/// Safe wrapper for the short-block SSE4.2 engine.
#[inline]
pub(crate) fn compute_sse42_short_safe(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: Callers verify SSE4.2 before reaching this kernel.
  unsafe { compute_sse42_short(state, data, plan) }
}

/// Safe wrapper for the single-lane SSE4.2 engine.
#[inline]
pub(crate) fn compute_sse42_1way_safe(state: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies SSE4.2 before selecting this kernel.
  unsafe { compute_sse42_1way(state, data) }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;
  use crate::{portable, shift::DEFAULT_PLAN};

  fn available() -> bool {
    platform::caps().has(platform::caps::x86::CRC32C_READY)
  }

  #[test]
  fn fold_matches_table_fold() {
    if !available() {
      return;
    }
    for state in [0u32, 1, 0xFFFF_FFFF, 0xDEAD_BEEF] {
      for word in [0u64, 1, u64::MAX, 0x0123_4567_89AB_CDEF] {
        // SAFETY: SSE4.2 checked above.
        let hw = unsafe { Sse42Fold::word(state, word) };
        assert_eq!(hw, portable::fold_word(state, word));
      }
      for byte in [0u8, 0x5A, 0xFF] {
        // SAFETY: SSE4.2 checked above.
        let hw = unsafe { Sse42Fold::byte(state, byte) };
        assert_eq!(hw, portable::fold_byte(state, byte));
      }
    }
  }

  #[test]
  fn matches_portable_across_regimes() {
    if !available() {
      return;
    }
    let data: Vec<u8> = (0..30_000u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
    for len in [0, 1, 7, 8, 767, 768, 769, 8191, 24575, 24576, 24577, 30_000] {
      let buf = &data[..len];
      assert_eq!(
        compute_sse42_safe(!0, buf, &DEFAULT_PLAN),
        portable::compute(!0, buf, &DEFAULT_PLAN),
        "len={len}"
      );
      assert_eq!(compute_sse42_1way_safe(!0, buf), portable::compute_1way(!0, buf), "len={len}");
      assert_eq!(
        compute_sse42_short_safe(!0, buf, &DEFAULT_PLAN),
        portable::compute_short(!0, buf, &DEFAULT_PLAN),
        "len={len}"
      );
    }
  }
}
