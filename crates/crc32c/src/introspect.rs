//! Dispatch introspection for verifying which engine runs.
//!
//! # Examples
//!
//! ```
//! use crc32c::DispatchInfo;
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! println!("CRC32-C backend: {}", crc32c::selected_backend());
//! println!("CRC32-C @ 4KB: {}", crc32c::kernel_name_for_len(4096));
//! ```

use core::fmt;

use platform::Detected;

use crate::{
  config::{self, Crc32cConfig},
  dispatch::{self, Backend},
  lanes::Regime,
};

/// Snapshot of detection, configuration and selection.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DispatchInfo {
  detected: Detected,
  config: Crc32cConfig,
  backend: Backend,
  short_block: usize,
  long_block: usize,
}

impl DispatchInfo {
  /// Returns dispatch info for the current process.
  ///
  /// Everything it reads is cached after first use.
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    let selected = dispatch::active();
    Self {
      detected: platform::get(),
      config: config::get(),
      backend: selected.backend,
      short_block: selected.plan.short.width,
      long_block: selected.plan.long.width,
    }
  }

  #[inline]
  #[must_use]
  pub const fn detected(&self) -> Detected {
    self.detected
  }

  #[inline]
  #[must_use]
  pub const fn config(&self) -> Crc32cConfig {
    self.config
  }

  #[inline]
  #[must_use]
  pub const fn backend(&self) -> Backend {
    self.backend
  }

  /// Short and long lane widths in use.
  #[inline]
  #[must_use]
  pub const fn blocks(&self) -> (usize, usize) {
    (self.short_block, self.long_block)
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} via {} (force {}, blocks {}/{})",
      self.detected,
      self.backend.name(),
      self.config.effective_force.as_str(),
      self.short_block,
      self.long_block
    )
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("detected", &format_args!("{}", self.detected))
      .field("backend", &self.backend)
      .field("force", &self.config.effective_force)
      .field("short_block", &self.short_block)
      .field("long_block", &self.long_block)
      .finish()
  }
}

/// Name of the selected backend, e.g. `"x86_64/sse4.2"` or `"portable/slice8"`.
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  dispatch::active().name()
}

/// Name of the path [`crate::crc32c`] takes for a buffer of `len` bytes.
///
/// e.g. `"x86_64/sse4.2-3way-long"` or `"portable/slice8-1way"`.
#[inline]
#[must_use]
pub fn kernel_name_for_len(len: usize) -> &'static str {
  let selected = dispatch::active();
  selected.backend.kernel_name(Regime::for_len(len, selected.plan))
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::format;

  use super::*;

  #[test]
  fn dispatch_info_display_names_backend() {
    let info = DispatchInfo::current();
    let s = format!("{info}");
    assert!(s.contains(selected_backend()));
  }

  #[test]
  fn dispatch_info_debug_not_empty() {
    let s = format!("{:?}", DispatchInfo::current());
    assert!(s.contains("DispatchInfo"));
  }

  #[test]
  fn kernel_name_follows_regimes() {
    let (short, long) = DispatchInfo::current().blocks();
    let backend = selected_backend();

    assert!(kernel_name_for_len(0).ends_with("-1way"));
    assert!(kernel_name_for_len(3 * short - 1).ends_with("-1way"));
    assert!(kernel_name_for_len(3 * short).ends_with("-3way-short"));
    assert!(kernel_name_for_len(3 * long - 1).ends_with("-3way-short"));
    assert!(kernel_name_for_len(3 * long).ends_with("-3way-long"));
    assert!(kernel_name_for_len(1 << 20).starts_with(backend));
  }
}
