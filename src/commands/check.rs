//! `serial check` command.

use std::fmt;
use std::io::{BufRead, Write};
use std::time::Duration;

use crate::generator::Generator;
use crate::serial::Serial;

/// Outcome of presenting a serial as a nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// First sighting within the age window; it is now marked seen.
    Fresh,
    /// Already seen within the age window.
    Replay,
    /// Older than the age window, so a replay could no longer be detected.
    Stale,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fresh => "fresh",
            Self::Replay => "replay",
            Self::Stale => "stale",
        })
    }
}

/// Judge one serial against the seen set, marking it when fresh.
///
/// The clock is read once: the same cutoff drives expiry and the staleness
/// test, so a serial kept by expiry is never reported `stale`.
pub fn classify(generator: &Generator, serial: Serial, max_age: Duration) -> Verdict {
    let cutoff = generator.now().saturating_sub(max_age);
    generator.expire_seen_before(cutoff);
    if serial < cutoff {
        Verdict::Stale
    } else if generator.consume(serial) {
        Verdict::Fresh
    } else {
        Verdict::Replay
    }
}

/// Execute the `check` command against a fresh generator.
///
/// # Errors
///
/// Returns an error string if input cannot be read or parsed, or output fails.
pub fn run(
    max_age: Duration,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), String> {
    run_with(&Generator::new(), max_age, input, out)
}

/// Read serials line by line and print `<verdict> <serial>` for each.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns an error string naming the line number of the first malformed
/// serial, or if reading or writing fails.
pub fn run_with(
    generator: &Generator,
    max_age: Duration,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), String> {
    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read input: {e}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let serial: Serial = line
            .parse()
            .map_err(|e| format!("Line {}: {e}", index + 1))?;
        let verdict = classify(generator, serial, max_age);
        writeln!(out, "{verdict} {serial}")
            .map_err(|e| format!("Failed to write output: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingClock;
    use crate::cassette::format::ClockCassette;
    use crate::cassette::replayer::CassetteReplayer;
    use crate::ports::Clock;
    use chrono::{DateTime, Utc};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    struct ManualClock(Arc<AtomicI64>);

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp_nanos(self.0.load(Ordering::SeqCst))
        }
    }

    const T0: i64 = 1_718_447_400_000_000_000;
    const SECOND: i64 = 1_000_000_000;
    const WINDOW: Duration = Duration::from_secs(60);

    fn manual() -> (Generator, Arc<AtomicI64>) {
        let nanos = Arc::new(AtomicI64::new(T0));
        (Generator::with_clock(Box::new(ManualClock(Arc::clone(&nanos)))), nanos)
    }

    fn check(generator: &Generator, max_age: Duration, input: &str) -> Result<String, String> {
        let mut out = Vec::new();
        run_with(generator, max_age, &mut Cursor::new(input), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn reports_fresh_then_replay() {
        let (generator, _nanos) = manual();
        let input = format!("{T0}\n{}\n\n{T0}\n", T0 - 1);
        let output = check(&generator, WINDOW, &input).unwrap();
        assert_eq!(
            output,
            format!("fresh {T0}\nfresh {}\nreplay {T0}\n", T0 - 1)
        );
    }

    #[test]
    fn serials_older_than_window_are_stale() {
        let (generator, _nanos) = manual();
        let old = T0 - 61 * SECOND;
        let output = check(&generator, WINDOW, &format!("{old}\n")).unwrap();
        assert_eq!(output, format!("stale {old}\n"));
        assert!(!generator.seen(Serial::from_i64(old)));
    }

    #[test]
    fn replay_turns_stale_once_window_passes() {
        let (generator, nanos) = manual();
        let serial = Serial::from_i64(T0);
        let window = Duration::from_secs(10);
        assert_eq!(classify(&generator, serial, window), Verdict::Fresh);

        nanos.store(T0 + 5 * SECOND, Ordering::SeqCst);
        assert_eq!(classify(&generator, serial, window), Verdict::Replay);

        nanos.store(T0 + 11 * SECOND, Ordering::SeqCst);
        assert_eq!(classify(&generator, serial, window), Verdict::Stale);
        assert!(generator.seen_is_empty());
    }

    #[test]
    fn classify_uses_one_clock_reading_per_serial() {
        // One reading per call: a second read would exhaust the cassette.
        let t0 = DateTime::from_timestamp_nanos(T0);
        let cassette = ClockCassette {
            name: "check".into(),
            recorded_at: t0,
            readings: vec![t0, t0 + chrono::Duration::seconds(10)],
        };
        let replayer = CassetteReplayer::new(&cassette);
        let generator = Generator::with_clock(Box::new(ReplayingClock::new(replayer)));
        let serial = Serial::from_i64(T0);
        let window = Duration::from_secs(10);

        assert_eq!(classify(&generator, serial, window), Verdict::Fresh);
        // The serial sits exactly on the cutoff: kept by expiry, so not stale.
        assert_eq!(classify(&generator, serial, window), Verdict::Replay);
        assert!(generator.seen(serial));
    }

    #[test]
    fn malformed_line_names_its_number() {
        let (generator, _nanos) = manual();
        let input = format!("{T0}\nnonce\n");
        let err = check(&generator, WINDOW, &input).unwrap_err();
        assert!(err.starts_with("Line 2:"));
    }
}
