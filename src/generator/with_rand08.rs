//! Integration with `rand` (v0.8) crate.

use super::{RandSource, V7Generator};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }
}

impl<T: RngCore> V7Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// Pass a cryptographically secure generator such as [`rand::rngs::OsRng`] or
    /// [`rand::rngs::ThreadRng`] unless predictable identifiers are acceptable.
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
