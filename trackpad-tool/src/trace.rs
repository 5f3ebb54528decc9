//! Sensor traces.
//!
//! A trace is a file of json lines, each a raw report from the sensor with
//! the time (in ms) it was read:
//!
//! ```text
//! {"t": 0, "x": 1023, "y": 767, "z": 40}
//! {"t": 10, "x": 1030, "y": 770, "z": 41}
//! {"t": 20, "x": 1030, "y": 770, "z": 0}
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, Result};
use bbq_trackpad::{sim::Simulator, AbsoluteReport, Config, Event, MotionScanner, Timable};
use log::warn;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Sample {
    pub t: u64,
    pub x: u16,
    pub y: u16,
    pub z: u8,
}

impl Sample {
    fn report(&self) -> AbsoluteReport {
        AbsoluteReport {
            x: self.x,
            y: self.y,
            z: self.z,
            buttons: 0,
        }
    }
}

pub fn load<P: AsRef<Path>>(name: P) -> Result<Vec<Sample>> {
    let reader = BufReader::new(File::open(name)?);
    parse(reader)
}

fn parse<R: BufRead>(reader: R) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    for (num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let sample: Sample = serde_json::from_str(line)
            .map_err(|e| anyhow!("line {}: {}", num + 1, e))?;
        samples.push(sample);
    }
    Ok(samples)
}

/// Run the samples through a scanner, in time order.  After the last one,
/// let any timers still running go for up to `settle` ms.  Returns the events
/// with the time they were sent.
pub fn replay(config: &Config, samples: &[Sample], settle: u64) -> Result<Vec<(u64, Event)>> {
    let mut scanner = MotionScanner::new(config)?;
    let mut sim = Simulator::new();

    for sample in samples {
        let now = sim.get_ticks();
        if sample.t < now {
            warn!("sample at {} is before {}, sending now", sample.t, now);
        } else {
            sim.advance(&mut scanner, sample.t - now);
        }
        sim.report(&mut scanner, &sample.report());
    }
    sim.settle(&mut scanner, settle);

    if sim.pending_timers() > 0 {
        warn!("{} timers still running after {} ms", sim.pending_timers(), settle);
    }

    Ok(sim.timed_events().to_vec())
}

#[cfg(test)]
mod tests {
    use super::{parse, replay};
    use bbq_trackpad::{Button, Config, Event};

    const TAP: &str = r#"
        # A quick tap in the middle of the pad.
        {"t": 0, "x": 1023, "y": 767, "z": 40}
        {"t": 10, "x": 1024, "y": 767, "z": 42}
        {"t": 40, "x": 1024, "y": 768, "z": 0}
    "#;

    #[test]
    fn tap_trace() {
        let samples = parse(TAP.as_bytes()).unwrap();
        assert_eq!(samples.len(), 3);

        let events = replay(&Config::default(), &samples, 1000).unwrap();
        assert_eq!(
            events,
            vec![
                (0, Event::TouchStart),
                (40, Event::TouchEnd),
                (40, Event::Tap(Button::Left)),
            ]
        );
    }

    #[test]
    fn bad_line() {
        let err = parse(r#"{"t": 0, "x": 1}"#.as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("line 1:"));
    }
}
