use super::*;

/// Replays the same bytes on every call.
struct FixedRandSource([u8; TAIL_LEN]);

impl RandSource for FixedRandSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.copy_from_slice(&self.0[..dest.len()]);
    }
}

fn fixed(bytes: [u8; TAIL_LEN]) -> V7Generator<FixedRandSource> {
    V7Generator::new(FixedRandSource(bytes))
}

/// Starts at a given reading and advances by a fixed step on every call.
struct MockTimeSource {
    now: i64,
    step: i64,
}

impl TimeSource for MockTimeSource {
    fn unix_ts_ms(&mut self) -> i64 {
        let now = self.now;
        self.now = self.now.saturating_add(self.step);
        now
    }
}

fn with_clock(now: i64, step: i64) -> V7Generator<FixedRandSource, MockTimeSource> {
    V7Generator::with_rand_and_time_sources(
        FixedRandSource([0x00; 10]),
        MockTimeSource { now, step },
    )
}

/// Tags version and variant bits over the same bytes
#[test]
fn tags_version_and_variant_bits_over_the_same_bytes() {
    let ts = 0x0123_4567_89abu64;

    let e = fixed([0x00; 10]).generate_core(ts).unwrap();
    assert_eq!(e.tail(), &[0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0]);

    let e = fixed([0xff; 10]).generate_core(ts).unwrap();
    assert_eq!(e.tail(), &[0x7f, 0xff, 0xbf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);

    // bytes 6 and 8 differ from bytes 0 and 2 so that borrowing from them would show
    let e = fixed([0x0c, 0x11, 0x45, 0x03, 0x04, 0x05, 0xf6, 0x07, 0x28, 0x09])
        .generate_core(ts)
        .unwrap();
    assert_eq!(
        e.tail(),
        &[0x7c, 0x11, 0x85, 0x03, 0x04, 0x05, 0xf6, 0x07, 0x28, 0x09]
    );
    assert_eq!(e.timestamp(), ts);
    assert_eq!(e.to_string(), "01234567-89ab-7c11-8503-0405f6072809");
}

/// Produces values that validate and round-trip through text
#[test]
fn produces_values_that_validate_and_round_trip_through_text() {
    let mut g = V7Generator::with_rand08(rand::thread_rng());
    for ts in [0, 1, 1_718_313_494_000, Uuid7::MAX_TIMESTAMP] {
        let e = g.generate_core(ts).unwrap();
        assert_eq!(e.timestamp(), ts);
        assert_eq!(Uuid7::new(e.timestamp(), e.tail()), Ok(e));
        assert_eq!(e.to_string().parse(), Ok(e));
    }
}

/// Rejects timestamps wider than 48 bits
#[test]
fn rejects_timestamps_wider_than_48_bits() {
    let mut g = fixed([0x00; 10]);
    assert_eq!(
        g.generate_core(Uuid7::MAX_TIMESTAMP + 1),
        Err(Error::InvalidTimestamp)
    );
}

/// Generates from system time
#[test]
fn generates_from_system_time() {
    use std::time::{Duration, UNIX_EPOCH};

    let mut g = fixed([0x00; 10]);
    let at = UNIX_EPOCH + Duration::from_millis(1_718_313_494_000);
    let e = g.generate_at(at).unwrap();
    assert_eq!(e.timestamp(), 1_718_313_494_000);
    assert_eq!(e.system_time(), at);

    // sub-millisecond precision is truncated
    let e = g.generate_at(at + Duration::from_micros(999)).unwrap();
    assert_eq!(e.timestamp(), 1_718_313_494_000);

    assert_eq!(g.generate_at(UNIX_EPOCH).unwrap().timestamp(), 0);
}

/// Rejects system time out of range
#[test]
fn rejects_system_time_out_of_range() {
    use std::time::{Duration, UNIX_EPOCH};

    let mut g = fixed([0x00; 10]);
    let before_epoch = UNIX_EPOCH - Duration::from_millis(1);
    assert_eq!(g.generate_at(before_epoch), Err(Error::InvalidTimestamp));

    let past_48_bits = UNIX_EPOCH + Duration::from_millis(Uuid7::MAX_TIMESTAMP + 1);
    assert_eq!(g.generate_at(past_48_bits), Err(Error::InvalidTimestamp));
}

/// Generates up-to-date timestamp
#[test]
fn generates_up_to_date_timestamp() {
    use std::time;

    let mut g = V7Generator::with_rand08(rand::thread_rng());
    for _ in 0..1_000 {
        let ts_now = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as i64;
        let timestamp = g.generate().timestamp() as i64;
        assert!((ts_now - timestamp).abs() < 16);
    }
}

/// Reads the timestamp from the time source
#[test]
fn reads_the_timestamp_from_the_time_source() {
    let mut g = with_clock(1_718_313_494_000, 0);
    let e = g.generate();
    assert_eq!(e.timestamp(), 1_718_313_494_000);
    assert_eq!(e.tail(), &[0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0]);
}

/// Clamps a clock set before the Unix epoch to zero
#[test]
fn clamps_a_clock_set_before_the_unix_epoch_to_zero() {
    for now in [-1, -1_718_313_494_000, i64::MIN] {
        assert_eq!(with_clock(now, 0).generate().timestamp(), 0, "{now}");
    }
}

/// Clamps a clock beyond the 48-bit range to the max timestamp
#[test]
fn clamps_a_clock_beyond_the_48_bit_range_to_the_max_timestamp() {
    let max = Uuid7::MAX_TIMESTAMP as i64;
    assert_eq!(with_clock(max, 0).generate().timestamp(), Uuid7::MAX_TIMESTAMP);
    for now in [max + 1, max * 2, i64::MAX] {
        assert_eq!(
            with_clock(now, 0).generate().timestamp(),
            Uuid7::MAX_TIMESTAMP,
            "{now}"
        );
    }
}

/// Reads the system clock by default
#[test]
fn reads_the_system_clock_by_default() {
    use std::time;

    let ts_now = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("clock may have gone backwards")
        .as_millis() as i64;
    assert!((StdSystemTime.unix_ts_ms() - ts_now).abs() < 16);
}

/// Works as an infinite iterator
#[test]
fn works_as_an_infinite_iterator() {
    let g = V7Generator::with_rand08(rand::thread_rng());
    let v: Vec<Uuid7> = g.take(1_000).collect();
    assert_eq!(v.len(), 1_000);
    for w in v.windows(2) {
        assert_ne!(w[0], w[1]);
    }

    let g = V7Generator::with_rand_and_time_sources(
        with_rand08::Adapter(rand::thread_rng()),
        MockTimeSource {
            now: 1_718_313_494_000,
            step: 1,
        },
    );
    let v: Vec<Uuid7> = g.take(1_000).collect();
    for (i, e) in v.iter().enumerate() {
        assert_eq!(e.timestamp(), 1_718_313_494_000 + i as u64);
    }
    for w in v.windows(2) {
        assert_eq!(w[0].compare(&w[1]), core::cmp::Ordering::Less);
    }
}
