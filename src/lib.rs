//! Time-ordered UUID version 7 identifiers
//!
//! ```rust
//! use uuid7_ts::{uuid7, Uuid7};
//!
//! let uuid = uuid7();
//! println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian array
//!
//! let parsed: Uuid7 = uuid.to_string().parse()?;
//! assert_eq!(parsed, uuid);
//! # Ok::<(), uuid7_ts::Error>(())
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        rand_a         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 2-bit `var` field is set at `10`.
//! - The 12-bit `rand_a` and 62-bit `rand_b` fields are filled with a
//!   cryptographically strong random number.
//!
//! The ten bytes following `unix_ts_ms` (`ver`, `rand_a`, `var` and `rand_b`)
//! are called the tail and are exposed by [`Uuid7::tail()`].
//!
//! # Ordering
//!
//! [`Uuid7::compare()`] orders identifiers by `unix_ts_ms` only, so two
//! identifiers generated within the same millisecond compare as equal while
//! still being distinct values. Equality, hashing and the [`Ord`] impl take
//! every bit into account.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` enables `SystemTime`-based functions and `String` conversions.
//! - `global_gen` (implies `std`) enables the process-wide generator behind
//!   [`uuid7()`] and [`uuid7_at()`].
//!
//! Optional features:
//!
//! - `serde` enables serialization and deserialization of [`Uuid7`] objects.
//! - `uuid` enables conversion between [`Uuid7`] and `uuid::Uuid`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
pub use codec::Format;

mod error;
pub use error::Error;

mod id;
pub use id::Uuid7;

pub mod generator;
#[doc(inline)]
pub use generator::{RandSource, StdSystemTime, TimeSource, V7Generator};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid7, uuid7_at};
