//! Simple command that prints one or '-n count' UUIDv7 strings, checking that each parses back
//!
//! Set `RUST_LOG=debug` to see the round-trip result of every identifier.

use std::{env, io, io::Write, process::ExitCode, thread, time::Duration};

use tracing_subscriber::EnvFilter;
use uuid7_ts::Uuid7;

struct Options {
    count: usize,
    delay: Option<Duration>,
}

fn main() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-d delay_ms]",
                    program.as_deref().unwrap_or("uuid7")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    let mut prev: Option<Uuid7> = None;
    for i in 0..opts.count {
        let uuid = uuid7_ts::uuid7();
        writeln!(buf, "{}", uuid)?;

        match Uuid7::try_parse(&uuid.to_string()) {
            Some(parsed) if parsed == uuid => {
                tracing::debug!(index = i, %parsed, "parsed successfully");
            }
            Some(parsed) => {
                tracing::error!(index = i, %uuid, %parsed, "parsed to a different identifier");
                return Ok(ExitCode::FAILURE);
            }
            None => {
                tracing::error!(index = i, %uuid, "failed to parse");
                return Ok(ExitCode::FAILURE);
            }
        }
        if let Some(prev) = prev {
            tracing::debug!(index = i, ordering = ?prev.compare(&uuid), "compared with previous");
        }
        prev = Some(uuid);

        if let Some(delay) = opts.delay {
            buf.flush()?;
            thread::sleep(delay);
        }
    }

    buf.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut count = None;
    let mut delay = None;
    while let Some(arg) = args.next() {
        let (name, slot_is_set) = match arg.as_str() {
            "-n" => ('n', count.is_some()),
            "-d" => ('d', delay.is_some()),
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        if slot_is_set {
            return Err(format!("option '{}' given more than once", name));
        }
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", name));
        };
        let Ok(n) = value.parse::<u64>() else {
            return Err(format!("invalid argument to option '{}': '{}'", name, value));
        };
        if name == 'n' {
            count = Some(usize::try_from(n).map_err(|_| format!("count too large: {}", n))?);
        } else {
            delay = Some(Duration::from_millis(n));
        }
    }
    Ok(Options {
        count: count.unwrap_or(1),
        delay,
    })
}
