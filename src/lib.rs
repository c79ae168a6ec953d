//! # Message Decoding Combinations
//!
//! A message made of letters A–Z is encoded by replacing each letter with its position in the
//! alphabet (A=1 .. Z=26) and concatenating the numbers. This library counts how many distinct
//! letter messages could have produced a given digit string. The count grows exponentially with
//! the length of the string, so it is computed with arbitrary-precision integers (`BigUint`).
//!
//! ## How the count is built
//! The digit string is scanned once from left to right. Adjacent digits that may be read either
//! as one two-digit code or as two single-digit codes (11–19 and 21–26) form a **cluster**. A
//! cluster of `k` such pairs admits F(k + 2) segmentations, where F is the Fibonacci sequence,
//! and clusters are independent of each other, so the answer is the product of one Fibonacci
//! factor per cluster. A '0' has no code of its own: it must be read together with the '1' or
//! '2' before it, which takes that digit out of the surrounding cluster.
//!
//! ## Modules
//!
//! ### `fibonacci`
//! `FibonacciTable`, a memoized table of Fibonacci numbers that grows on demand and never
//! recomputes an entry. Tables are ordinary values owned by the caller; there is no global cache.
//!
//! ### `codes`
//! Pure predicates over digit bytes: which bytes are digits, which pairs are ambiguous, and
//! which digits a '0' may follow.
//!
//! ### `combinations`
//! `count_combinations`, the single-pass counter, the `CombinationCounter` convenience wrapper
//! that owns a table, and `StructuralError` describing why a string cannot be decoded at all.
//!
//! ### `batch`
//! Counting many messages at once: sequentially, with Rayon, with `std::thread` workers
//! reporting over a `kanal` channel, or with Tokio tasks gated by a semaphore. Every worker
//! owns its own Fibonacci table.
//!
//! ### `config` and `app`
//! The command-line driver: argument parsing and reading inputs from files or standard input.
//!
//! ## Usage Example
//! ```rust
//! use decode_combinations::combinations::CombinationCounter;
//! use num_bigint::BigUint;
//! let mut counter = CombinationCounter::new();
//! assert_eq!(counter.count(b"12").unwrap(), BigUint::from(2u32));
//! assert!(counter.count(b"30").is_err());
//! ```

pub mod app;
pub mod batch;
pub mod codes;
pub mod combinations;
pub mod config;
pub mod fibonacci;

pub use combinations::{count, count_combinations, CombinationCounter, StructuralError};
pub use fibonacci::FibonacciTable;
