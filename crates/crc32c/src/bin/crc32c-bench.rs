//! CRC32-C engine timing table.
//!
//! Times the table-driven engine, the single-lane hardware engine and the
//! 3-lane hardware engine over power-of-two lengths, odd lengths, and odd
//! lengths on a buffer that starts one byte past alignment.
//!
//! Run: `cargo run --release -p crc32c --features cli --bin crc32c-bench`

use core::hint::black_box;
use std::{env, process::ExitCode, time::Instant};

use crc32c::kernels;
use log::{info, warn};

type Engine = fn(&[u8], u32) -> Option<u32>;

#[derive(Clone, Debug)]
struct Args {
  iterations: u32,
  max_size: usize,
}

impl Default for Args {
  fn default() -> Self {
    Self {
      iterations: 1000,
      max_size: 8 * 1024 * 1024,
    }
  }
}

fn parse_args() -> Result<Args, String> {
  let mut args = Args::default();
  let mut it = env::args().skip(1);
  while let Some(arg) = it.next() {
    match arg.as_str() {
      "--" => continue,
      "--quick" => {
        args.iterations = 50;
        args.max_size = 512 * 1024;
      }
      "--iterations" => {
        let Some(value) = it.next() else {
          return Err("--iterations requires a value".to_owned());
        };
        args.iterations = value.parse().map_err(|_| format!("invalid --iterations: {value}"))?;
        if args.iterations == 0 {
          return Err("--iterations must be at least 1".to_owned());
        }
      }
      "--max-size" => {
        let Some(value) = it.next() else {
          return Err("--max-size requires a value".to_owned());
        };
        args.max_size = value.parse().map_err(|_| format!("invalid --max-size: {value}"))?;
      }
      "--help" | "-h" => {
        print_help();
        return Err(String::new());
      }
      other => return Err(format!("Unknown arg: {other}")),
    }
  }
  Ok(args)
}

fn print_help() {
  eprintln!(
    "\
crc32c-bench: CRC32-C engine timing table

USAGE:
  crc32c-bench [--quick] [--iterations N] [--max-size BYTES]

OPTIONS:
  --quick            50 iterations, sizes up to 512 KiB
  --iterations N     timed calls per size (default 1000)
  --max-size BYTES   largest input (default 8 MiB)

ENV:
  RUST_LOG           log filter (default crc32c=info)
  CRC32C_FORCE, CRC32C_SHORT_BLOCK, CRC32C_LONG_BLOCK
"
  );
}

fn setup_logger() {
  let filter = env::var("RUST_LOG").unwrap_or_else(|_| "crc32c=info".to_owned());
  pretty_env_logger::formatted_timed_builder().parse_filters(&filter).init();
}

/// Deterministic bytes, seeded by length.
fn gen_bytes(len: usize, unalignment: usize) -> Vec<u8> {
  let mut out = vec![0u8; len + unalignment];
  let mut x = len as u64 | 1;
  for b in &mut out[unalignment..] {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = x as u8;
  }
  out
}

/// Mean nanoseconds per call, or `None` if the engine is unavailable.
fn time_engine(engine: Engine, data: &[u8], iterations: u32) -> Option<u64> {
  engine(data, 0)?;
  let mut total = 0u128;
  for _ in 0..iterations {
    let start = Instant::now();
    black_box(engine(black_box(data), 0));
    total += start.elapsed().as_nanos();
  }
  Some((total / u128::from(iterations)).max(1) as u64)
}

fn gib_per_sec(len: usize, ns: u64) -> f64 {
  (len as f64 / (ns as f64 / 1e9)) / (1024.0 * 1024.0 * 1024.0)
}

const COLUMNS: [&str; 9] = [
  "Data size (bytes) ",
  "SW ns      ",
  "SW GiB/s   ",
  "HW ns      ",
  "HW GiB/s   ",
  "HW vs SW ",
  "HW opt ns  ",
  "HW opt GiB/s ",
  "HW vs HW opt ",
];

fn print_banner() {
  for head in COLUMNS {
    print!("{head}: ");
  }
  println!();
}

fn print_row(cells: [String; 9]) {
  for (cell, head) in cells.iter().zip(COLUMNS) {
    print!("{cell:<width$}: ", width = head.len());
  }
  println!();
}

fn fmt_ns(ns: Option<u64>) -> String {
  ns.map_or_else(|| "n/a".to_owned(), |ns| ns.to_string())
}

fn fmt_rate(len: usize, ns: Option<u64>) -> String {
  ns.map_or_else(|| "n/a".to_owned(), |ns| format!("{:.3}", gib_per_sec(len, ns)))
}

fn fmt_ratio(num: Option<u64>, den: Option<u64>) -> String {
  match (num, den) {
    (Some(n), Some(d)) => format!("{:.6}", n as f64 / d as f64),
    _ => "n/a".to_owned(),
  }
}

fn bench_size(len: usize, unalignment: usize, iterations: u32) {
  let backing = gen_bytes(len, unalignment);
  let data = &backing[unalignment..];

  let software: Engine = |buf, crc| Some(kernels::portable(buf, crc));
  let sw = time_engine(software, data, iterations);
  let hw = time_engine(kernels::hardware_1way, data, iterations);
  let hw_opt = time_engine(kernels::hardware, data, iterations);

  print_row([
    len.to_string(),
    fmt_ns(sw),
    fmt_rate(len, sw),
    fmt_ns(hw),
    fmt_rate(len, hw),
    fmt_ratio(sw, hw),
    fmt_ns(hw_opt),
    fmt_rate(len, hw_opt),
    fmt_ratio(hw, hw_opt),
  ]);
}

/// `start`, `4 * start`, `16 * start`, ... up to `max`, stopping before the
/// multiplication would overflow.
fn sizes(start: usize, max: usize) -> impl Iterator<Item = usize> {
  core::iter::successors(Some(start), |&size| size.checked_mul(4)).take_while(move |&size| size <= max)
}

fn main() -> ExitCode {
  let args = match parse_args() {
    Ok(args) => args,
    Err(msg) if msg.is_empty() => return ExitCode::SUCCESS,
    Err(msg) => {
      eprintln!("{msg}");
      print_help();
      return ExitCode::FAILURE;
    }
  };

  setup_logger();
  info!("{}", crc32c::DispatchInfo::current());
  if kernels::hardware(&[], 0).is_none() {
    warn!("no hardware CRC32C instruction; HW columns will be n/a");
  }

  print_banner();

  println!("Power of 2 lengths.");
  for size in sizes(32, args.max_size) {
    bench_size(size, 0, args.iterations);
  }
  println!();

  println!("Non-power of 2 lengths.");
  for size in sizes(33, args.max_size) {
    bench_size(size, 0, args.iterations);
  }
  println!();

  println!("Unaligned buffer of odd lengths");
  for size in sizes(33, args.max_size) {
    let odd = if size % 2 == 0 { size + 1 } else { size };
    bench_size(odd, 1, args.iterations);
  }

  ExitCode::SUCCESS
}
