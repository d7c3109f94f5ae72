//! Shared control structure for every CRC32-C engine.
//!
//! Engines differ only in how they fold one 8-byte word or one byte into the
//! register ([`Fold`]); the strategy selection, alignment handling and 3-lane
//! interleaving live here once.
//!
//! # Strategy
//!
//! | Length | Path |
//! |--------|------|
//! | `< 3 * short` | single lane: bytes to alignment, words, trailing bytes |
//! | `< 3 * long` | bytes to alignment, 3-lane short blocks, words, bytes |
//! | otherwise | bytes to alignment, 3-lane long blocks, 3-lane short blocks, words, bytes |
//!
//! In a 3-lane step of width `W`, lane 0 continues the running CRC over
//! `[0, W)` while lanes 1 and 2 start from zero over `[W, 2W)` and
//! `[2W, 3W)`. The lanes have no data dependency on each other, which hides
//! the latency of the fold. They are merged with the `W`-byte shift table:
//! `crc = shift(lane0) ^ lane1; crc = shift(crc) ^ lane2`.
//!
//! All functions operate on the inverted register; callers complement on the
//! way in and out.

use crate::{
  constants::WORD,
  shift::{BlockShift, LanePlan},
};

/// Per-word and per-byte register update.
///
/// Implementations are zero-sized markers; the methods are always inlined
/// into the engine entry point so hardware folds compile under that entry
/// point's `#[target_feature]`.
pub(crate) trait Fold {
  /// Fold 8 little-endian bytes into `state`.
  ///
  /// # Safety
  /// The CPU must support every instruction the implementation uses.
  unsafe fn word(state: u32, word: u64) -> u32;

  /// Fold one byte into `state`.
  ///
  /// # Safety
  /// The CPU must support every instruction the implementation uses.
  unsafe fn byte(state: u32, byte: u8) -> u32;
}

#[inline(always)]
unsafe fn bytes<F: Fold>(mut state: u32, data: &[u8]) -> u32 {
  for &b in data {
    // SAFETY: forwarded from the caller.
    state = unsafe { F::byte(state, b) };
  }
  state
}

#[inline(always)]
unsafe fn words<F: Fold>(mut state: u32, data: &[u8]) -> u32 {
  let (words, tail) = data.as_chunks::<WORD>();
  for w in words {
    // SAFETY: forwarded from the caller.
    state = unsafe { F::word(state, u64::from_le_bytes(*w)) };
  }
  // SAFETY: forwarded from the caller.
  unsafe { bytes::<F>(state, tail) }
}

/// Split `data` so the second half starts on an 8-byte boundary.
#[inline(always)]
fn split_unaligned(data: &[u8]) -> (&[u8], &[u8]) {
  let head = data.as_ptr().align_offset(WORD).min(data.len());
  data.split_at(head)
}

/// Run 3-lane steps of `block` while a full step remains.
///
/// Returns the merged register and the unprocessed tail.
#[inline(always)]
unsafe fn three_way<'a, F: Fold>(mut state: u32, mut data: &'a [u8], block: &BlockShift) -> (u32, &'a [u8]) {
  let stride = block.stride();
  while data.len() >= stride {
    let (step, rest) = data.split_at(stride);
    let (lane0, lanes12) = step.split_at(block.width);
    let (lane1, lane2) = lanes12.split_at(block.width);

    // Widths are multiples of WORD, so the chunk tails are empty.
    let (w0, _) = lane0.as_chunks::<WORD>();
    let (w1, _) = lane1.as_chunks::<WORD>();
    let (w2, _) = lane2.as_chunks::<WORD>();

    let mut crc0 = state;
    let mut crc1 = 0u32;
    let mut crc2 = 0u32;
    for ((a, b), c) in w0.iter().zip(w1).zip(w2) {
      // SAFETY: forwarded from the caller.
      unsafe {
        crc0 = F::word(crc0, u64::from_le_bytes(*a));
        crc1 = F::word(crc1, u64::from_le_bytes(*b));
        crc2 = F::word(crc2, u64::from_le_bytes(*c));
      }
    }

    state = block.table.apply(crc0) ^ crc1;
    state = block.table.apply(state) ^ crc2;
    data = rest;
  }
  (state, data)
}

/// Single-lane pass over any length.
///
/// # Safety
/// The CPU must support every instruction `F` uses.
#[inline(always)]
pub(crate) unsafe fn compute_1way<F: Fold>(state: u32, data: &[u8]) -> u32 {
  let (head, body) = split_unaligned(data);
  // SAFETY: forwarded from the caller.
  unsafe {
    let state = bytes::<F>(state, head);
    words::<F>(state, body)
  }
}

/// Length-dependent single/3-lane pass.
///
/// # Safety
/// The CPU must support every instruction `F` uses.
#[inline(always)]
pub(crate) unsafe fn compute<F: Fold>(state: u32, data: &[u8], plan: &LanePlan) -> u32 {
  if data.len() < plan.short.stride() {
    // SAFETY: forwarded from the caller.
    return unsafe { compute_1way::<F>(state, data) };
  }

  let (head, body) = split_unaligned(data);
  // SAFETY: forwarded from the caller.
  unsafe {
    let mut state = bytes::<F>(state, head);
    let mut rest = body;
    if data.len() >= plan.long.stride() {
      (state, rest) = three_way::<F>(state, rest, &plan.long);
    }
    (state, rest) = three_way::<F>(state, rest, &plan.short);
    words::<F>(state, rest)
  }
}

/// Single lane below `3 * block.width`, otherwise 3-lane steps of `block`
/// only (no long blocks at any length).
///
/// # Safety
/// The CPU must support every instruction `F` uses.
#[inline(always)]
pub(crate) unsafe fn compute_short<F: Fold>(state: u32, data: &[u8], block: &BlockShift) -> u32 {
  if data.len() < block.stride() {
    // SAFETY: forwarded from the caller.
    return unsafe { compute_1way::<F>(state, data) };
  }

  let (head, body) = split_unaligned(data);
  // SAFETY: forwarded from the caller.
  unsafe {
    let state = bytes::<F>(state, head);
    let (state, rest) = three_way::<F>(state, body, block);
    words::<F>(state, rest)
  }
}

/// Which path [`compute`] takes for `len` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
  /// Single lane.
  OneWay,
  /// 3-lane short blocks.
  ShortBlocks,
  /// 3-lane long blocks, then short blocks.
  LongBlocks,
}

impl Regime {
  #[inline]
  #[must_use]
  pub const fn for_len(len: usize, plan: &LanePlan) -> Self {
    if len < plan.short.stride() {
      Self::OneWay
    } else if len < plan.long.stride() {
      Self::ShortBlocks
    } else {
      Self::LongBlocks
    }
  }
}
