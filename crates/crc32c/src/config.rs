//! CRC32-C runtime configuration (overrides + block widths).
//!
//! This module centralizes selection knobs:
//! - optional forced backend selection
//! - short and long lane widths for the 3-lane strategies
//!
//! Environment overrides (std only, read once):
//!
//! | Variable | Values |
//! |----------|--------|
//! | `CRC32C_FORCE` | `auto`, `portable`, `hwcrc` |
//! | `CRC32C_SHORT_BLOCK` | power of two, at least 8 |
//! | `CRC32C_LONG_BLOCK` | power of two, greater than the short block |
//!
//! Safety note: forced modes are always clamped to detected CPU capabilities.

use platform::Detected;

use crate::{
  constants::{DEFAULT_LONG_BLOCK, DEFAULT_SHORT_BLOCK},
  shift::LanePlan,
};

/// Forced backend selection for CRC32-C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Crc32cForce {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Force the portable table-based implementation.
  Portable,
  /// Force hardware CRC instructions (if available).
  ///
  /// - x86_64: SSE4.2 `crc32`
  /// - aarch64: ARMv8 CRC extension
  Hwcrc,
}

impl Crc32cForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Hwcrc => "hwcrc",
    }
  }

  /// Parse a force mode, accepting a few aliases. Case-insensitive.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable")
      || value.eq_ignore_ascii_case("software")
      || value.eq_ignore_ascii_case("table")
    {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("hwcrc")
      || value.eq_ignore_ascii_case("hardware")
      || value.eq_ignore_ascii_case("sse4.2")
      || value.eq_ignore_ascii_case("crc")
    {
      return Some(Self::Hwcrc);
    }
    None
  }
}

/// Lane widths for the 3-lane strategies, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32cTunables {
  /// Width of one short lane. Inputs below `3 * short_block` take the single
  /// lane path.
  pub short_block: usize,
  /// Width of one long lane. Inputs of at least `3 * long_block` start with
  /// long steps.
  pub long_block: usize,
}

impl Crc32cTunables {
  pub const DEFAULT: Self = Self {
    short_block: DEFAULT_SHORT_BLOCK,
    long_block: DEFAULT_LONG_BLOCK,
  };

  /// Whether these widths can drive the 3-lane kernels.
  #[inline]
  #[must_use]
  pub const fn is_valid(&self) -> bool {
    LanePlan::is_valid(self.short_block, self.long_block)
  }

  #[inline]
  #[must_use]
  pub const fn is_default(&self) -> bool {
    self.short_block == DEFAULT_SHORT_BLOCK && self.long_block == DEFAULT_LONG_BLOCK
  }
}

impl Default for Crc32cTunables {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Full CRC32-C runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32cConfig {
  /// Requested force mode (env).
  pub requested_force: Crc32cForce,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Crc32cForce,
  /// Lane widths used by the engines.
  pub tunables: Crc32cTunables,
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Crc32cForce,
  short_block: Option<usize>,
  long_block: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() {
      return None;
    }
    Some(value)
  }

  fn parse_usize(name: &str) -> Option<usize> {
    let value = var(name)?;
    match value.trim().parse::<usize>() {
      Ok(v) => Some(v),
      Err(_) => {
        log::warn!("ignoring {name}={value:?}: not an unsigned integer");
        None
      }
    }
  }

  fn parse_force(name: &str) -> Option<Crc32cForce> {
    let value = var(name)?;
    let force = Crc32cForce::parse(&value);
    if force.is_none() {
      log::warn!("ignoring {name}={value:?}: expected auto, portable or hwcrc");
    }
    force
  }

  Overrides {
    force: parse_force("CRC32C_FORCE").unwrap_or_default(),
    short_block: parse_usize("CRC32C_SHORT_BLOCK"),
    long_block: parse_usize("CRC32C_LONG_BLOCK"),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
fn clamp_force_to_caps(requested: Crc32cForce, detected: Detected) -> Crc32cForce {
  match requested {
    Crc32cForce::Auto | Crc32cForce::Portable => requested,
    Crc32cForce::Hwcrc if detected.has_crc32c() => Crc32cForce::Hwcrc,
    Crc32cForce::Hwcrc => Crc32cForce::Auto,
  }
}

#[must_use]
fn resolve_tunables(ov: &Overrides) -> Crc32cTunables {
  let tunables = Crc32cTunables {
    short_block: ov.short_block.unwrap_or(DEFAULT_SHORT_BLOCK),
    long_block: ov.long_block.unwrap_or(DEFAULT_LONG_BLOCK),
  };
  if tunables.is_valid() {
    return tunables;
  }
  log::warn!(
    "ignoring block widths short={} long={}: need powers of two, short >= 8, long > short",
    tunables.short_block,
    tunables.long_block
  );
  Crc32cTunables::DEFAULT
}

#[must_use]
fn resolve(ov: &Overrides, detected: Detected) -> Crc32cConfig {
  Crc32cConfig {
    requested_force: ov.force,
    effective_force: clamp_force_to_caps(ov.force, detected),
    tunables: resolve_tunables(ov),
  }
}

/// Get the effective CRC32-C configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Crc32cConfig {
  resolve(&overrides(), platform::get())
}
