//! Hexadecimal string encoding and decoding.

use core::{fmt, ops, str};

use fstr::FStr;

use crate::{Error, Uuid7};

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Number of hex digits in a string representation, separators excluded.
const N_DIGITS: usize = 32;

/// Options for the hexadecimal string representation produced by [`Uuid7::format()`].
///
/// The default is [`Format::CANONICAL`]: lowercase digits grouped 8-4-4-4-12 with hyphens.
///
/// # Examples
///
/// ```rust
/// use uuid7_ts::{Format, Uuid7};
///
/// let x: Uuid7 = "0180ae59-078c-7b80-b113-2fe14a615fb3".parse()?;
/// let f = Format::CANONICAL.uppercase(true).hyphens(false);
/// assert_eq!(&x.format(f) as &str, "0180AE59078C7B80B1132FE14A615FB3");
/// # Ok::<(), uuid7_ts::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Format {
    /// Emits `A`-`F` instead of `a`-`f`.
    pub uppercase: bool,
    /// Inserts hyphens after the 8th, 12th, 16th, and 20th digits.
    pub hyphens: bool,
}

impl Format {
    /// Lowercase digits with hyphens (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`).
    pub const CANONICAL: Self = Self {
        uppercase: false,
        hyphens: true,
    };

    /// Returns a copy with the letter case set.
    pub const fn uppercase(self, uppercase: bool) -> Self {
        Self { uppercase, ..self }
    }

    /// Returns a copy with the hyphen grouping set.
    pub const fn hyphens(self, hyphens: bool) -> Self {
        Self { hyphens, ..self }
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Writes the hex digits of `bytes` into `buffer`, returning the number of bytes written.
fn write_hex(bytes: &[u8; 16], format: Format, buffer: &mut [u8; 36]) -> usize {
    let digits = if format.uppercase {
        UPPER_DIGITS
    } else {
        LOWER_DIGITS
    };

    let mut len = 0;
    for (i, e) in bytes.iter().enumerate() {
        buffer[len] = digits[(e >> 4) as usize];
        buffer[len + 1] = digits[(e & 15) as usize];
        len += 2;
        if format.hyphens && (i == 3 || i == 5 || i == 7 || i == 9) {
            buffer[len] = b'-';
            len += 1;
        }
    }
    len
}

impl Uuid7 {
    /// Returns the 8-4-4-4-12 canonical string representation stored in a stack-allocated
    /// [`FStr`].
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the canonical string.
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        let len = write_hex(&self.to_bytes(), Format::CANONICAL, &mut buffer);
        debug_assert!(len == buffer.len() && buffer.is_ascii());
        // SAFETY: `write_hex` fills the whole buffer with ASCII characters.
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the string representation in the given [`Format`], stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// The result is 36 characters long with hyphens and 32 characters long without.
    pub fn format(&self, format: Format) -> impl ops::Deref<Target = str> + fmt::Display {
        let mut buffer = [0u8; 36];
        let len = write_hex(&self.to_bytes(), format, &mut buffer);
        debug_assert!(buffer[..len].is_ascii());
        HexStr { buffer, len }
    }

    /// Creates a UUIDv7 from its hexadecimal string representation.
    ///
    /// Leading and trailing whitespace is ignored, spaces and hyphens anywhere are dropped, and
    /// digits are matched case-insensitively, so both the 8-4-4-4-12 and the plain 32-digit forms
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for a blank string, [`Error::InvalidLength`] unless exactly 32
    /// characters remain after dropping separators, [`Error::InvalidHexDigit`] for a non-hex
    /// character, and [`Error::InvalidVersion`] or [`Error::InvalidVariant`] if the decoded bits do
    /// not form a UUIDv7.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_ts::Uuid7;
    ///
    /// let x = Uuid7::parse("0180ae59-078c-7b80-b113-2fe14a615fb3")?;
    /// let y = Uuid7::parse("0180AE59078C7B80B1132FE14A615FB3")?;
    /// assert_eq!(x, y);
    /// assert_eq!(x.timestamp(), 0x0180_ae59_078c);
    /// # Ok::<(), uuid7_ts::Error>(())
    /// ```
    pub fn parse(src: &str) -> Result<Self, Error> {
        let src = src.trim();
        if src.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut digits = [0u8; N_DIGITS];
        let mut len = 0;
        let mut invalid = None;
        for c in src.chars().filter(|&c| c != ' ' && c != '-') {
            if let Some(slot) = digits.get_mut(len) {
                match c.to_digit(16) {
                    Some(d) => *slot = d as u8,
                    None => {
                        invalid.get_or_insert(Error::InvalidHexDigit {
                            found: c,
                            index: len,
                        });
                    }
                }
            }
            len += 1;
        }

        if len != N_DIGITS {
            return Err(Error::InvalidLength {
                expected: N_DIGITS,
                found: len,
            });
        }
        if let Some(err) = invalid {
            return Err(err);
        }

        let mut bytes = [0u8; 16];
        for (e, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            *e = (pair[0] << 4) | pair[1];
        }
        Self::from_bytes(bytes)
    }

    /// Creates a UUIDv7 from its hexadecimal string representation, returning `None` if
    /// [`Uuid7::parse()`] fails.
    pub fn try_parse(src: &str) -> Option<Self> {
        Self::parse(src).ok()
    }
}

impl fmt::Display for Uuid7 {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid7 {
    type Err = Error;

    /// Creates an object from the hexadecimal string representation. See [`Uuid7::parse()`].
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse(src)
    }
}

impl TryFrom<&str> for Uuid7 {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        Self::parse(src)
    }
}

/// Concrete return type of [`Uuid7::format()`].
struct HexStr {
    buffer: [u8; 36],
    len: usize,
}

impl ops::Deref for HexStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.buffer[..self.len].is_ascii());
        // SAFETY: `write_hex` writes ASCII characters only.
        unsafe { str::from_utf8_unchecked(&self.buffer[..self.len]) }
    }
}

impl fmt::Display for HexStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use crate::{Error, Uuid7};

    impl From<Uuid7> for String {
        fn from(src: Uuid7) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid7 {
        type Error = Error;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            Self::parse(&src)
        }
    }
}
