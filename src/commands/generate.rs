//! `serial generate` command.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::live::LiveClock;
use crate::adapters::recording::RecordingClock;
use crate::adapters::replaying::ReplayingClock;
use crate::cassette::format::ClockCassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::generator::Generator;
use crate::serial::Serial;

/// One line of `--json` output.
#[derive(Debug, Serialize)]
struct IssuedSerial {
    serial: Serial,
    issued_at: DateTime<Utc>,
}

/// Execute the `generate` command, writing one serial per line to `out`.
///
/// With `replay`, the clock is served from a recorded cassette, which must
/// hold at least `count` readings. With `record`, every clock reading is
/// written to a cassette once generation finishes.
///
/// # Errors
///
/// Returns an error string if a cassette cannot be read or written, if the
/// ratchet runs out of serials, or if output fails.
pub fn run(
    count: usize,
    json: bool,
    record: Option<&Path>,
    replay: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), String> {
    if let Some(path) = replay {
        let cassette = ClockCassette::load(path)?;
        let replayer = CassetteReplayer::new(&cassette);
        if replayer.remaining() < count {
            return Err(format!(
                "Cassette {} holds {} readings but {count} serials were requested",
                path.display(),
                replayer.remaining()
            ));
        }
        let generator = Generator::with_clock(Box::new(ReplayingClock::new(replayer)));
        return issue(&generator, count, json, out);
    }

    if let Some(path) = record {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "serial-generate")));
        // Scope the generator so the recorder has a single owner afterwards
        let result = {
            let clock = RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder));
            issue(&Generator::with_clock(Box::new(clock)), count, json, out)
        };
        finish_recording(recorder)?;
        return result;
    }

    issue(&Generator::new(), count, json, out)
}

fn issue(
    generator: &Generator,
    count: usize,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    for _ in 0..count {
        let serial = generator
            .try_generate()
            .ok_or_else(|| format!("Serial ratchet exhausted after {}", generator.last_issued()))?;
        let line = if json {
            let issued = IssuedSerial {
                serial,
                issued_at: serial.issued_at(),
            };
            serde_json::to_string(&issued)
                .map_err(|e| format!("Failed to encode serial {serial}: {e}"))?
        } else {
            serial.to_string()
        };
        writeln!(out, "{line}").map_err(|e| format!("Failed to write output: {e}"))?;
    }
    Ok(())
}

/// Write the recorded cassette and report where it went.
fn finish_recording(recorder: Arc<Mutex<CassetteRecorder>>) -> Result<(), String> {
    let recorder = Arc::try_unwrap(recorder)
        .map_err(|_| "Recording clock still has references".to_string())?
        .into_inner()
        .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
    let readings = recorder.len();
    let path = recorder
        .finish()
        .map_err(|e| format!("Failed to write clock cassette: {e}"))?;
    tracing::info!(path = %path.display(), readings, "clock cassette written");
    eprintln!("Recording saved to: {}", path.display());
    Ok(())
}
