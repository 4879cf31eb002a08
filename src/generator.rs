//! UUIDv7 generator and related types.

use crate::id::TAIL_LEN;
use crate::{Error, Uuid7};

pub mod with_rand08;

#[cfg(all(test, feature = "std"))]
mod tests;

/// A trait that defines the minimum random number generator interface for [`V7Generator`].
///
/// Implementors used for production identifiers should be cryptographically secure. Tests may
/// plug in a deterministic source to obtain reproducible identifiers.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the clock interface for [`V7Generator`].
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch, negative before 1970.
    fn unix_ts_ms(&mut self) -> i64;
}

/// The default [`TimeSource`] that reads [`SystemTime::now()`](std::time::SystemTime::now).
///
/// It implements [`TimeSource`] only with the `std` feature; `no_std` users plug in their own clock
/// through [`V7Generator::with_rand_and_time_sources()`].
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> i64 {
        use std::time;
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            Err(err) => i64::try_from(err.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
        }
    }
}

/// Represents a UUIDv7 generator that reads the timestamp from a [`TimeSource`] and fills the bits
/// following it from a [`RandSource`].
///
/// Identifiers generated within the same millisecond share the timestamp and are distinguished by
/// their 74 random bits only; their relative order is not defined.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use uuid7_ts::V7Generator;
///
/// let mut g = V7Generator::with_rand08(OsRng);
/// let uuid = g.generate_core(0x0123_4567_89ab)?;
/// assert!(uuid.to_string().starts_with("01234567-89ab-7"));
/// # Ok::<(), uuid7_ts::Error>(())
/// ```
///
/// # Generator functions
///
/// | Flavor            | Timestamp            | Fails on                          |
/// | ----------------- | -------------------- | --------------------------------- |
/// | [`generate`]      | From [`TimeSource`]  | Never (clamps out-of-range clock) |
/// | [`generate_at`]   | `SystemTime` given   | Before 1970 or beyond 48 bits     |
/// | [`generate_core`] | `unix_ts_ms` given   | Beyond 48 bits                    |
///
/// [`generate`]: V7Generator::generate
/// [`generate_at`]: V7Generator::generate_at
/// [`generate_core`]: V7Generator::generate_core
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V7Generator<R, T = StdSystemTime> {
    /// The random number generator used by the generator.
    rng: R,

    /// The clock used by the generator.
    time_source: T,
}

impl<R> V7Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl<R, T> V7Generator<R, T> {
    /// Creates a generator instance with the specified random number generator and clock.
    pub const fn with_rand_and_time_sources(rng: R, time_source: T) -> Self {
        Self { rng, time_source }
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the current timestamp.
    ///
    /// A clock set before the Unix epoch is read as `0`, and one beyond the 48-bit range is read as
    /// [`Uuid7::MAX_TIMESTAMP`].
    pub fn generate(&mut self) -> Uuid7 {
        let unix_ts_ms = self
            .time_source
            .unix_ts_ms()
            .clamp(0, Uuid7::MAX_TIMESTAMP as i64) as u64;
        self.generate_core(unix_ts_ms)
            .expect("clamped timestamp and tagged tail always form a valid UUIDv7")
    }
}

impl<R: RandSource, T> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the `SystemTime` passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimestamp`] if `at` is earlier than the Unix epoch or later than the
    /// 48-bit millisecond range allows.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate_at(&mut self, at: std::time::SystemTime) -> Result<Uuid7, Error> {
        let elapsed = at
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| Error::InvalidTimestamp)?;
        let unix_ts_ms = u64::try_from(elapsed.as_millis()).map_err(|_| Error::InvalidTimestamp)?;
        self.generate_core(unix_ts_ms)
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// The 10 bytes following the timestamp are drawn from the random source, and then the upper
    /// half of the first byte is overwritten with the version `7` and the top two bits of the third
    /// byte with the variant `10`. Each overwritten byte keeps its own remaining random bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimestamp`] if `unix_ts_ms` does not fit in 48 bits.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Result<Uuid7, Error> {
        let mut tail = [0u8; TAIL_LEN];
        self.rng.fill_bytes(&mut tail);
        tail[0] = 0x70 | (tail[0] & 0x0f);
        tail[2] = 0x80 | (tail[2] & 0x3f);
        Uuid7::new(unix_ts_ms, &tail)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid7_ts::V7Generator;
///
/// V7Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid7;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for V7Generator<R, T> {}
