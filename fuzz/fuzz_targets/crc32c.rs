//! Fuzz target for the CRC32-C entry point.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Continuing from a partial result matches one-shot
//! - Offsetting the buffer does not change the result

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split_point: usize,
  seed: u32,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let split = input.split_point % (data.len() + 1);

  let oneshot = crc32c::crc32c(data, input.seed);

  let (a, b) = data.split_at(split);
  let resumed = crc32c::crc32c(b, crc32c::crc32c(a, input.seed));
  assert_eq!(oneshot, resumed, "resume mismatch at split {split}");

  assert_eq!(crc32c::crc32c_vectored(&[a, b], input.seed), oneshot, "vectored mismatch");

  // Same bytes at a different address.
  let mut shifted = Vec::with_capacity(data.len() + 8);
  shifted.resize(split % 8 + 1, 0u8);
  let start = shifted.len();
  shifted.extend_from_slice(data);
  assert_eq!(crc32c::crc32c(&shifted[start..], input.seed), oneshot, "alignment mismatch");
});
