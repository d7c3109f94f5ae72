//! aarch64 hardware CRC32-C engine (ARMv8 CRC extension).
//!
//! # Safety
//!
//! Uses `unsafe` for ARM intrinsics. Callers must ensure the CRC extension is
//! available before executing the accelerated path (the dispatcher does this).
#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cb, __crc32cd};

use crate::{
  lanes::{self, Fold},
  shift::LanePlan,
};

/// `crc32c{b,d}` instruction fold.
pub(crate) struct ArmCrcFold;

impl Fold for ArmCrcFold {
  #[inline(always)]
  unsafe fn word(state: u32, word: u64) -> u32 {
    // SAFETY: caller guarantees the CRC extension.
    unsafe { __crc32cd(state, word) }
  }

  #[inline(always)]
  unsafe fn byte(state: u32, byte: u8) -> u32 {
    // SAFETY: caller guarantees the CRC extension.
    unsafe { __crc32cb(state, byte) }
  }
}

/// 3-lane CRC32-C update using the ARM CRC extension.
///
/// # Safety
///
/// Caller must ensure the CRC extension is available.
#[inline]
#[target_feature(enable = "crc")]
pub(crate) unsafe fn compute_crc(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: target_feature enables CRC for the inlined folds.
  unsafe { lanes::compute::<ArmCrcFold>(state, data, plan) }
}

/// 3-lane CRC32-C update using the ARM CRC extension, short blocks only.
///
/// # Safety
///
/// Caller must ensure the CRC extension is available.
#[inline]
#[target_feature(enable = "crc")]
pub(crate) unsafe fn compute_crc_short(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: target_feature enables CRC for the inlined folds.
  unsafe { lanes::compute_short::<ArmCrcFold>(state, data, &plan.short) }
}

/// Single-lane CRC32-C update using the ARM CRC extension.
///
/// # Safety
///
/// Caller must ensure the CRC extension is available.
#[inline]
#[target_feature(enable = "crc")]
pub(crate) unsafe fn compute_crc_1way(state: u32, data: &[u8]) -> u32 {
  // SAFETY: target_feature enables CRC for the inlined folds.
  unsafe { lanes::compute_1way::<ArmCrcFold>(state, data) }
}

#[inline]
pub(crate) fn compute_crc_safe(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: Dispatcher verifies the CRC extension before selecting this kernel.
  unsafe { compute_crc(state, data, plan) }
}

#[inline]
pub(crate) fn compute_crc_short_safe(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  // SAFETY: Callers verify the CRC extension before reaching this kernel.
  unsafe { compute_crc_short(state, data, plan) }
}

#[inline]
pub(crate) fn compute_crc_1way_safe(state: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies the CRC extension before selecting this kernel.
  unsafe { compute_crc_1way(state, data) }
}
