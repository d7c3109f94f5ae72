//! Fuzz target for CRC combine operations.
//!
//! Tests combine correctness over a chain of splits.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  splits: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;

  // Normalize splits to valid range and sort
  let mut splits: Vec<usize> = input.splits.iter().map(|s| s % (data.len() + 1)).collect();
  splits.sort_unstable();
  splits.dedup();

  let expected = crc32c::crc32c(data, 0);

  let mut combined = 0u32;
  let mut prev = 0;
  for split in splits.into_iter().chain([data.len()]) {
    let chunk = &data[prev..split];
    combined = crc32c::combine(combined, crc32c::crc32c(chunk, 0), chunk.len());
    prev = split;
  }

  assert_eq!(
    combined,
    expected,
    "combine chain mismatch: combined={combined:#010x}, expected={expected:#010x}, len={}",
    data.len()
  );
});
