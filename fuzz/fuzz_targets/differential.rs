//! Differential fuzzing: every engine against each other and against
//! `crc-fast`.

#![no_main]

use crc_fast::CrcAlgorithm;
use crc32c::kernels;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let ours = crc32c::crc32c(data, 0);
  let reference = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, data) as u32;
  assert_eq!(
    ours,
    reference,
    "differential mismatch: ours={ours:#010x}, reference={reference:#010x}, len={}",
    data.len()
  );

  assert_eq!(kernels::portable(data, 0), ours, "portable mismatch");
  assert_eq!(kernels::portable_1way(data, 0), ours, "portable-1way mismatch");
  assert_eq!(kernels::portable_short(data, 0), ours, "portable-short mismatch");
  if let Some(hw) = kernels::hardware(data, 0) {
    assert_eq!(hw, ours, "hardware mismatch");
  }
  if let Some(hw) = kernels::hardware_1way(data, 0) {
    assert_eq!(hw, ours, "hardware-1way mismatch");
  }
  if let Some(hw) = kernels::hardware_short(data, 0) {
    assert_eq!(hw, ours, "hardware-short mismatch");
  }
});
