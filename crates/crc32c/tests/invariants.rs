//! Algebraic invariants of the dispatched and explicit engines.
//!
//! Regime boundaries are derived from the active lane plan, so these hold
//! under any valid `CRC32C_SHORT_BLOCK` / `CRC32C_LONG_BLOCK` override.

use crc32c::{combine, crc32c, kernels};

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

fn crc32c_bitwise(crc_in: u32, data: &[u8]) -> u32 {
  let mut crc = !crc_in;
  for &b in data {
    crc ^= b as u32;
    for _ in 0..8 {
      let mask = 0u32.wrapping_sub(crc & 1);
      crc = (crc >> 1) ^ (0x82F6_3B78 & mask);
    }
  }
  !crc
}

/// `(3 * short, 3 * long)` for the active plan.
fn strides() -> (usize, usize) {
  let plan = crc32c::active().plan;
  (plan.short.stride(), plan.long.stride())
}

fn boundary_lengths() -> Vec<usize> {
  let (short, long) = strides();
  let mut lens = vec![0, 1, 7, 8, 9, 63, 64, 65];
  for edge in [short, 2 * short, long, long + short, 2 * long] {
    lens.extend([edge - 1, edge, edge + 1]);
  }
  lens.push(long + short + 7);
  lens
}

#[test]
fn empty_input_is_identity() {
  for seed in [0u32, 0xFFFF_FFFF, 0x1234_5678] {
    assert_eq!(crc32c(&[], seed), seed);
    assert_eq!(kernels::portable(&[], seed), seed);
    assert_eq!(kernels::portable_1way(&[], seed), seed);
    if let Some(crc) = kernels::hardware(&[], seed) {
      assert_eq!(crc, seed);
    }
  }
}

#[test]
fn matches_bitwise_reference_at_boundaries() {
  for len in boundary_lengths() {
    let data = gen_bytes(len, len as u64 + 1);
    for seed in [0u32, 0xFFFF_FFFF] {
      assert_eq!(crc32c(&data, seed), crc32c_bitwise(seed, &data), "len={len} seed={seed:#x}");
    }
  }
}

#[test]
fn composable_at_every_split_below_long_regime() {
  let (short, _) = strides();
  let data = gen_bytes(2 * short + 17, 0xC0FF_EE00);
  let whole = crc32c(&data, 0);
  for split in 0..=data.len() {
    let (a, b) = data.split_at(split);
    assert_eq!(crc32c(b, crc32c(a, 0)), whole, "split={split}");
  }
}

#[test]
fn composable_across_long_regime() {
  let (short, long) = strides();
  let data = gen_bytes(long + short + 7, 0xFACE_B00C);
  let whole = crc32c(&data, 0);

  // Running prefix CRC, one byte per step.
  let mut prefix = 0u32;
  for split in 0..=data.len() {
    let (a, b) = data.split_at(split);
    assert_eq!(crc32c(b, prefix), whole, "split={split}");
    assert_eq!(combine(prefix, crc32c(b, 0), b.len()), whole, "split={split}");
    if split % 4099 == 0 {
      assert_eq!(prefix, crc32c(a, 0), "split={split}");
    }
    if let Some(byte) = b.first() {
      prefix = crc32c(core::slice::from_ref(byte), prefix);
    }
  }
  assert_eq!(prefix, whole);
}

#[test]
fn alignment_does_not_change_the_result() {
  let (short, long) = strides();
  let backing = gen_bytes(long + short + 64, 0x5EED);
  for len in [5, 64, short - 1, short + 13, long + 9] {
    let expected = crc32c(&backing[..len], 0);
    for offset in 1..8 {
      let mut shifted = vec![0u8; len + offset];
      shifted[offset..].copy_from_slice(&backing[..len]);
      assert_eq!(crc32c(&shifted[offset..], 0), expected, "len={len} offset={offset}");
    }
  }
}

#[test]
fn engines_agree_on_every_offset() {
  let (short, long) = strides();
  let data = gen_bytes(long + 2 * short + 16, 0xA11C_E5ED);
  for len in boundary_lengths().into_iter().filter(|&l| l + 8 <= data.len()) {
    for offset in 0..8 {
      let buf = &data[offset..offset + len];
      let expected = kernels::portable_1way(buf, 0);
      assert_eq!(kernels::portable(buf, 0), expected, "portable len={len} offset={offset}");
      assert_eq!(crc32c(buf, 0), expected, "dispatch len={len} offset={offset}");
      if let Some(hw) = kernels::hardware(buf, 0) {
        assert_eq!(hw, expected, "hardware len={len} offset={offset}");
      }
      if let Some(hw) = kernels::hardware_1way(buf, 0) {
        assert_eq!(hw, expected, "hardware-1way len={len} offset={offset}");
      }
      assert_eq!(kernels::portable_short(buf, 0), expected, "portable-short len={len} offset={offset}");
      if let Some(hw) = kernels::hardware_short(buf, 0) {
        assert_eq!(hw, expected, "hardware-short len={len} offset={offset}");
      }
    }
  }
}

#[test]
fn large_input_matches_chunked_calls() {
  let (short, long) = strides();
  let data = gen_bytes(long + short + 7, 0x00BA_DDAD);
  let whole = crc32c(&data, 0);
  assert_eq!(whole, crc32c_bitwise(0, &data));

  for chunk in [1usize, 7, 8, 255, 4096] {
    let chunked = data.chunks(chunk).fold(0, |crc, part| crc32c(part, crc));
    assert_eq!(chunked, whole, "chunk={chunk}");
  }
}
