//! Backend selection and the cached dispatch entry point.
//!
//! # Design
//!
//! Backends are registered as an ordered list of `Candidate`s, best first.
//! The first candidate whose required capabilities are present wins, unless
//! the configuration forces the portable engine.
//!
//! 1. **Runtime selection** (std): the CPU is probed once, the selection and
//!    its lane plan are cached in a `OnceLock`, and every later call is a
//!    single indirect call.
//! 2. **Compile-time selection** (no_std): only `cfg!(target_feature)` is
//!    visible and no overrides exist, so the selection folds to a constant.

use platform::{Caps, Detected};

#[cfg(feature = "std")]
use crate::config::{self, Crc32cConfig};
use crate::{
  config::Crc32cForce,
  lanes::Regime,
  portable,
  shift::{DEFAULT_PLAN, LanePlan},
};

/// Signature of a 3-lane engine over the inverted register.
pub(crate) type Crc32cFn = fn(u32, &[u8], &LanePlan) -> u32;

/// The engine families this crate can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
  /// Slicing-by-8 lookup tables.
  Portable,
  /// SSE4.2 `crc32` instruction.
  X86Sse42,
  /// ARMv8 CRC extension.
  Aarch64Crc,
}

impl Backend {
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Portable => "portable/slice8",
      Self::X86Sse42 => "x86_64/sse4.2",
      Self::Aarch64Crc => "aarch64/crc",
    }
  }

  /// Name of the path this backend takes for one regime.
  #[must_use]
  pub const fn kernel_name(self, regime: Regime) -> &'static str {
    match (self, regime) {
      (Self::Portable, Regime::OneWay) => "portable/slice8-1way",
      (Self::Portable, Regime::ShortBlocks) => "portable/slice8-3way-short",
      (Self::Portable, Regime::LongBlocks) => "portable/slice8-3way-long",
      (Self::X86Sse42, Regime::OneWay) => "x86_64/sse4.2-1way",
      (Self::X86Sse42, Regime::ShortBlocks) => "x86_64/sse4.2-3way-short",
      (Self::X86Sse42, Regime::LongBlocks) => "x86_64/sse4.2-3way-long",
      (Self::Aarch64Crc, Regime::OneWay) => "aarch64/crc-1way",
      (Self::Aarch64Crc, Regime::ShortBlocks) => "aarch64/crc-3way-short",
      (Self::Aarch64Crc, Regime::LongBlocks) => "aarch64/crc-3way-long",
    }
  }
}

/// A backend with its capability requirements.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate {
  pub backend: Backend,
  /// Must be a subset of the detected caps.
  pub requires: Caps,
  pub func: Crc32cFn,
}

impl Candidate {
  const fn new(backend: Backend, requires: Caps, func: Crc32cFn) -> Self {
    Self {
      backend,
      requires,
      func,
    }
  }
}

const PORTABLE: Candidate = Candidate::new(Backend::Portable, Caps::NONE, portable::compute);

/// Candidates for this target, best first. Portable is always last.
const CANDIDATES: &[Candidate] = &[
  #[cfg(target_arch = "x86_64")]
  Candidate::new(
    Backend::X86Sse42,
    platform::caps::x86::CRC32C_READY,
    crate::x86_64::compute_sse42_safe,
  ),
  #[cfg(target_arch = "aarch64")]
  Candidate::new(
    Backend::Aarch64Crc,
    platform::caps::aarch64::CRC_READY,
    crate::aarch64::compute_crc_safe,
  ),
  PORTABLE,
];

/// The resolved strategy: backend, engine and lane plan.
#[derive(Clone, Copy, Debug)]
pub struct Selected {
  pub backend: Backend,
  pub(crate) func: Crc32cFn,
  pub plan: &'static LanePlan,
}

impl Selected {
  #[inline]
  #[must_use]
  pub const fn name(&self) -> &'static str {
    self.backend.name()
  }

  /// Advance the inverted register over `data`.
  #[inline]
  pub(crate) fn compute(&self, state: u32, data: &[u8]) -> u32 {
    (self.func)(state, data, self.plan)
  }
}

/// Pick the first candidate the CPU supports, honoring a forced mode.
///
/// `force` must already be clamped to `detected`.
#[must_use]
pub(crate) const fn select_candidate(detected: Detected, force: Crc32cForce, candidates: &[Candidate]) -> Candidate {
  if matches!(force, Crc32cForce::Portable) || !detected.has_crc32c() {
    return PORTABLE;
  }
  let mut remaining = candidates;
  while let [first, rest @ ..] = remaining {
    if detected.caps.has(first.requires) {
      return *first;
    }
    remaining = rest;
  }
  PORTABLE
}

#[cfg(feature = "std")]
fn plan_for(cfg: &Crc32cConfig) -> &'static LanePlan {
  use std::sync::OnceLock;

  if cfg.tunables.is_default() {
    return &DEFAULT_PLAN;
  }
  static CUSTOM_PLAN: OnceLock<LanePlan> = OnceLock::new();
  CUSTOM_PLAN.get_or_init(|| LanePlan::new(cfg.tunables.short_block, cfg.tunables.long_block))
}

#[cfg(feature = "std")]
fn select() -> Selected {
  let detected = platform::get();
  let cfg = config::get();
  let candidate = select_candidate(detected, cfg.effective_force, CANDIDATES);
  let plan = plan_for(&cfg);

  log::debug!(
    "crc32c: selected {} (requested force {}, effective {}, caps {}, blocks {}/{})",
    candidate.backend.name(),
    cfg.requested_force.as_str(),
    cfg.effective_force.as_str(),
    detected,
    plan.short.width,
    plan.long.width,
  );
  if cfg.effective_force == Crc32cForce::Auto && candidate.backend == Backend::Portable {
    log::debug!("crc32c: no hardware CRC32C instruction, using table-driven engine");
  }

  Selected {
    backend: candidate.backend,
    func: candidate.func,
    plan,
  }
}

/// The process-wide selection, resolved on first use.
#[cfg(feature = "std")]
#[inline]
#[must_use]
pub fn active() -> Selected {
  use std::sync::OnceLock;
  static ACTIVE: OnceLock<Selected> = OnceLock::new();
  *ACTIVE.get_or_init(select)
}

/// Selection for builds without `std`: compile-time caps, no overrides,
/// default lane plan.
#[cfg(not(feature = "std"))]
const STATIC_SELECTION: Selected = {
  let detected = Detected {
    arch: platform::Arch::current(),
    caps: if cfg!(miri) { Caps::NONE } else { platform::caps_static() },
  };
  let candidate = select_candidate(detected, Crc32cForce::Auto, CANDIDATES);
  Selected {
    backend: candidate.backend,
    func: candidate.func,
    plan: &DEFAULT_PLAN,
  }
};

/// The selection for this build target, fixed at compile time.
#[cfg(not(feature = "std"))]
#[inline]
#[must_use]
pub fn active() -> Selected {
  use core::sync::atomic::{AtomicBool, Ordering};

  static LOGGED: AtomicBool = AtomicBool::new(false);
  if !LOGGED.load(Ordering::Relaxed) && !LOGGED.swap(true, Ordering::Relaxed) {
    log::debug!(
      "crc32c: selected {} (compile-time caps {:?})",
      STATIC_SELECTION.name(),
      platform::caps_static()
    );
  }
  STATIC_SELECTION
}

/// Compute the CRC32-C of `buf`, continuing from `crc_in`.
///
/// `crc_in` is a previous result (or 0 to start). Chaining calls over
/// consecutive pieces yields the CRC of their concatenation, and an empty
/// `buf` returns `crc_in` unchanged.
///
/// # Examples
///
/// ```
/// assert_eq!(crc32c::crc32c(b"123456789", 0), 0xE306_9283);
///
/// let head = crc32c::crc32c(b"12345", 0);
/// assert_eq!(crc32c::crc32c(b"6789", head), 0xE306_9283);
/// ```
#[inline]
#[must_use]
pub fn crc32c(buf: &[u8], crc_in: u32) -> u32 {
  !active().compute(!crc_in, buf)
}

/// Compute the CRC32-C over several buffers as if they were concatenated.
///
/// # Examples
///
/// ```
/// let bufs: [&[u8]; 3] = [b"1234", b"", b"56789"];
/// assert_eq!(crc32c::crc32c_vectored(&bufs, 0), 0xE306_9283);
/// ```
#[must_use]
pub fn crc32c_vectored(bufs: &[&[u8]], crc_in: u32) -> u32 {
  let selected = active();
  let state = bufs.iter().fold(!crc_in, |state, buf| selected.compute(state, buf));
  !state
}

/// [`crc32c_vectored`] over `std::io::IoSlice`s, as filled by vectored reads.
#[cfg(feature = "std")]
#[must_use]
pub fn crc32c_io_slices(bufs: &[std::io::IoSlice<'_>], crc_in: u32) -> u32 {
  let selected = active();
  let state = bufs.iter().fold(!crc_in, |state, buf| selected.compute(state, buf));
  !state
}
