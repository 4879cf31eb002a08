//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::{sync, time};

use crate::{Error, Uuid7};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    // a panic while holding the lock cannot leave the random number generator half-updated
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a UUIDv7 object from the current time.
///
/// This function employs a process-wide generator backed by a cryptographically secure random
/// number generator. Identifiers generated within the same millisecond are not ordered relative to
/// each other. On Unix, this function reseeds the generator when the process ID changes (i.e.,
/// upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_ts::uuid7();
/// println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid7_ts::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid7 {
    lock_global_gen().get_mut().generate()
}

/// Generates a UUIDv7 object from the `SystemTime` passed using the process-wide generator.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if `at` is earlier than the Unix epoch or later than the
/// 48-bit millisecond range allows.
///
/// # Examples
///
/// ```rust
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let at = UNIX_EPOCH + Duration::from_secs(1_718_278_155);
/// let uuid = uuid7_ts::uuid7_at(at)?;
/// assert_eq!(uuid.system_time(), at);
/// # Ok::<(), uuid7_ts::Error>(())
/// ```
pub fn uuid7_at(at: time::SystemTime) -> Result<Uuid7, Error> {
    lock_global_gen().get_mut().generate_at(at)
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{RandSource, V7Generator};

    /// Number of bytes generated before the global generator reseeds itself from [`OsRng`].
    const RESEED_THRESHOLD: u64 = 1024 * 64;

    /// The type alias for the random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl RandSource for GlobalGenRng {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest);
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V7Generator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V7Generator::new(GlobalGenRng(ReseedingRng::new(
                    ChaCha12Core::from_entropy(),
                    RESEED_THRESHOLD,
                    OsRng,
                ))),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V7Generator`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V7Generator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
