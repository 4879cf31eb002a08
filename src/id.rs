use core::cmp;

use crate::Error;

/// Number of bytes following the 48-bit timestamp.
pub(crate) const TAIL_LEN: usize = 10;

/// Represents a UUID version 7 identifier.
///
/// The value is kept as its two logical fields, the 48-bit `unix_ts_ms` and the 10-byte tail that
/// carries the version nibble, the variant bits and the random bits. The 16-byte big-endian form
/// is derived on demand by [`Uuid7::to_bytes()`].
///
/// Equality and hashing take every bit into account, whereas [`Uuid7::compare()`] looks at the
/// timestamp only.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Uuid7 {
    unix_ts_ms: u64,
    tail: [u8; TAIL_LEN],
}

impl Uuid7 {
    /// The largest timestamp representable in the 48-bit field.
    pub const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

    /// The smallest valid UUIDv7 (00000000-0000-7000-8000-000000000000).
    pub const MIN: Self = Self {
        unix_ts_ms: 0,
        tail: [0x70, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    };

    /// The largest valid UUIDv7 (ffffffff-ffff-7fff-bfff-ffffffffffff).
    pub const MAX: Self = Self {
        unix_ts_ms: Self::MAX_TIMESTAMP,
        tail: [0x7f, 0xff, 0xbf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
    };

    /// Creates a UUIDv7 from a Unix timestamp in milliseconds and the 10 bytes that follow it.
    ///
    /// The tail must already carry the version nibble `7` in the upper half of its first byte and
    /// the variant bits `10` at the top of its third byte. The bytes are copied, so later changes
    /// to `tail` do not affect the returned value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `tail` is not 10 bytes long,
    /// [`Error::InvalidVersion`] or [`Error::InvalidVariant`] if the tagged bits are wrong, and
    /// [`Error::InvalidTimestamp`] if `unix_ts_ms` does not fit in 48 bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_ts::Uuid7;
    ///
    /// let tail = [0x7a, 0x01, 0x9b, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
    /// let uuid = Uuid7::new(1_718_313_494_000, &tail)?;
    /// assert_eq!(uuid.timestamp(), 1_718_313_494_000);
    /// assert_eq!(uuid.to_string(), "01901377-25f0-7a01-9b02-030405060708");
    /// # Ok::<(), uuid7_ts::Error>(())
    /// ```
    pub fn new(unix_ts_ms: u64, tail: &[u8]) -> Result<Self, Error> {
        let tail = <[u8; TAIL_LEN]>::try_from(tail).map_err(|_| Error::InvalidLength {
            expected: TAIL_LEN,
            found: tail.len(),
        })?;

        if tail[0] >> 4 != 0x7 {
            return Err(Error::InvalidVersion { found: tail[0] >> 4 });
        }
        if tail[2] >> 6 != 0b10 {
            return Err(Error::InvalidVariant { found: tail[2] >> 6 });
        }
        if unix_ts_ms > Self::MAX_TIMESTAMP {
            return Err(Error::InvalidTimestamp);
        }

        Ok(Self { unix_ts_ms, tail })
    }

    /// Creates a UUIDv7 from its 16-byte big-endian representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] or [`Error::InvalidVariant`] if the bytes do not form a
    /// UUIDv7.
    pub fn from_bytes(bytes: [u8; 16]) -> Result<Self, Error> {
        let mut timestamp = [0u8; 8];
        timestamp[2..].copy_from_slice(&bytes[..6]);
        Self::new(u64::from_be_bytes(timestamp), &bytes[6..])
    }

    /// Returns the 16-byte big-endian representation.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&self.unix_ts_ms.to_be_bytes()[2..]);
        bytes[6..].copy_from_slice(&self.tail);
        bytes
    }

    /// Returns the embedded Unix timestamp in milliseconds.
    pub const fn timestamp(&self) -> u64 {
        self.unix_ts_ms
    }

    /// Returns the 10 bytes following the timestamp, version and variant bits included.
    pub const fn tail(&self) -> &[u8; TAIL_LEN] {
        &self.tail
    }

    /// Returns the embedded timestamp as a [`SystemTime`](std::time::SystemTime).
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn system_time(&self) -> std::time::SystemTime {
        std::time::UNIX_EPOCH + std::time::Duration::from_millis(self.unix_ts_ms)
    }

    /// Compares two identifiers by their embedded timestamps only.
    ///
    /// Identifiers created within the same millisecond compare as [`Equal`](cmp::Ordering::Equal)
    /// even when they are not `==`. Use [`Ord`] for a total order consistent with equality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    /// use uuid7_ts::Uuid7;
    ///
    /// let a: Uuid7 = "01901504-6af0-7a01-9b02-030405060708".parse()?;
    /// let b: Uuid7 = "01901504-6af0-7fff-bfff-ffffffffffff".parse()?;
    /// assert_eq!(a.compare(&b), Ordering::Equal);
    /// assert_ne!(a, b);
    /// # Ok::<(), uuid7_ts::Error>(())
    /// ```
    pub fn compare(&self, other: &Self) -> cmp::Ordering {
        self.unix_ts_ms.cmp(&other.unix_ts_ms)
    }
}

impl Ord for Uuid7 {
    /// Orders by timestamp and then by tail bytes, matching the order of the byte representation.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.compare(other).then_with(|| self.tail.cmp(&other.tail))
    }
}

impl PartialOrd for Uuid7 {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Uuid7> for [u8; 16] {
    fn from(src: Uuid7) -> Self {
        src.to_bytes()
    }
}

impl TryFrom<[u8; 16]> for Uuid7 {
    type Error = Error;

    fn try_from(src: [u8; 16]) -> Result<Self, Self::Error> {
        Self::from_bytes(src)
    }
}

impl TryFrom<&[u8]> for Uuid7 {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 16]>::try_from(src)
            .map_err(|_| Error::InvalidLength {
                expected: 16,
                found: src.len(),
            })
            .and_then(Self::from_bytes)
    }
}

impl From<Uuid7> for u128 {
    fn from(src: Uuid7) -> Self {
        Self::from_be_bytes(src.to_bytes())
    }
}

impl TryFrom<u128> for Uuid7 {
    type Error = Error;

    fn try_from(src: u128) -> Result<Self, Self::Error> {
        Self::from_bytes(src.to_be_bytes())
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid7;
    use crate::Error;

    impl From<Uuid7> for uuid::Uuid {
        fn from(src: Uuid7) -> Self {
            uuid::Uuid::from_bytes(src.to_bytes())
        }
    }

    impl TryFrom<uuid::Uuid> for Uuid7 {
        type Error = Error;

        fn try_from(src: uuid::Uuid) -> Result<Self, Self::Error> {
            Self::from_bytes(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::Uuid7;
    use core::fmt;
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid7 {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid7 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid7;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUIDv7 representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Uuid7::parse(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid7::try_from(value).map_err(de::Error::custom)
        }
    }

}
