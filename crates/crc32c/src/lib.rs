//! CRC32-C (Castagnoli) checksum with hardware acceleration.
//!
//! Polynomial 0x1EDC6F41 (reflected 0x82F63B78), initial value and final XOR
//! `0xFFFFFFFF`, as used by iSCSI, SCTP, ext4 and Btrfs.
//!
//! # Engines
//!
//! | Backend | Word fold | Selected when |
//! |---------|-----------|---------------|
//! | `x86_64/sse4.2` | `crc32` (64-bit) | SSE4.2 detected |
//! | `aarch64/crc` | `crc32cd` | ARMv8 CRC extension detected |
//! | `portable/slice8` | 8 table lookups | otherwise |
//!
//! Every engine shares one control structure: inputs shorter than three
//! short lanes run a single lane; longer inputs run three independent lanes
//! whose results are merged with precomputed zero-shift tables.
//!
//! # Example
//!
//! ```rust
//! // One-shot computation
//! let crc = crc32c::crc32c(b"123456789", 0);
//! assert_eq!(crc, 0xE306_9283);
//!
//! // Continue from a previous result
//! let partial = crc32c::crc32c(b"1234", 0);
//! assert_eq!(crc32c::crc32c(b"56789", partial), crc);
//!
//! // Combine independently computed parts
//! let tail = crc32c::crc32c(b"56789", 0);
//! assert_eq!(crc32c::combine(partial, tail, 5), crc);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Without the `std` feature the hardware
//! engine is only used when enabled at compile time
//! (`-C target-feature=+sse4.2` or `+crc`), and environment overrides are
//! not read:
//!
//! ```toml
//! [dependencies]
//! crc32c = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_arch = "aarch64")]
mod aarch64;
mod combine;
pub mod config;
pub mod constants;
mod dispatch;
mod error;
pub mod gf2;
mod introspect;
pub mod kernels;
mod lanes;
pub mod portable;
pub mod shift;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use combine::combine;
pub use config::{Crc32cConfig, Crc32cForce, Crc32cTunables};
#[cfg(feature = "std")]
pub use dispatch::crc32c_io_slices;
pub use dispatch::{Backend, Selected, active, crc32c, crc32c_vectored};
pub use error::{ChecksumMismatch, verify};
pub use introspect::{DispatchInfo, kernel_name_for_len, selected_backend};
pub use lanes::Regime;
