//! Console output and the cross-thread reporter.
//!
//! Per-tick lines look like
//!
//! ```text
//! 3: g0-s1->s2, g1-s1, y0-s4
//! ```
//!
//! where each entry is a line prefix, the train's index on its line, and
//! either the station it is at or the link it is on. Station numbers are
//! global station indices.

use std::fmt::Write as _;
use std::io::{self, Write};

use crossbeam_channel::{Receiver, Sender};
use railsim_engine::{LineWaitSummary, Position, Reporter, TickSnapshot, TrainView};
use railsim_network::RailNetwork;

/// Display prefix of a line: the first character of its name.
pub fn line_prefix(name: &str) -> char {
    name.chars().next().unwrap_or('?')
}

fn write_train(out: &mut String, prefix: char, view: &TrainView) {
    let _ = match view.position {
        Position::Station(side) => write!(out, "{prefix}{}-s{}", view.id.local, side.station.0),
        Position::Link { from, to } => write!(
            out,
            "{prefix}{}-s{}->s{}",
            view.id.local, from.station.0, to.station.0
        ),
    };
}

/// Render one tick as a single line, without the trailing newline.
///
/// `prefixes[i]` is the prefix of line `i`.
pub fn format_tick(snapshot: &TickSnapshot, prefixes: &[char]) -> String {
    let mut out = format!("{}: ", snapshot.tick);
    for (i, view) in snapshot.trains.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let prefix = prefixes.get(view.id.line.0 as usize).copied().unwrap_or('?');
        write_train(&mut out, prefix, view);
    }
    out
}

/// Render the final wait-time summary, one line per simulation line.
pub fn format_summary(summaries: &[LineWaitSummary]) -> String {
    let mut out = String::from("Average waiting times:\n");
    for s in summaries {
        let _ = writeln!(
            out,
            "{}: {} trains -> {:.1}, {:.1}, {:.1}",
            s.name, s.trains, s.mean_wait, s.mean_min, s.mean_max
        );
    }
    out
}

// ── ConsoleReporter ────────────────────────────────────────────────

/// Writes ticks and the summary to any [`Write`] sink.
///
/// The first write error is kept and reported by
/// [`finish`](Self::finish); later output is dropped.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
    prefixes: Vec<char>,
    quiet: bool,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter for `network`'s lines.
    pub fn new(out: W, network: &RailNetwork) -> Self {
        Self::with_prefixes(out, network.lines().iter().map(|l| line_prefix(l.name())).collect())
    }

    /// Reporter with explicit line prefixes.
    pub fn with_prefixes(out: W, prefixes: Vec<char>) -> Self {
        Self {
            out,
            prefixes,
            quiet: false,
            error: None,
        }
    }

    /// Suppress per-tick lines; only the summary is written.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Flush and return the sink, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        if self.quiet {
            return;
        }
        let mut line = format_tick(snapshot, &self.prefixes);
        line.push('\n');
        self.emit(&line);
    }

    fn on_finish(&mut self, summaries: &[LineWaitSummary]) {
        let text = format_summary(summaries);
        self.emit(&text);
    }
}

// ── ChannelReporter ────────────────────────────────────────────────

/// Output forwarded from the simulation thread.
#[derive(Clone, Debug)]
pub enum ReportMessage {
    /// A finished tick.
    Tick(TickSnapshot),
    /// The final summaries. Always the last message.
    Finish(Vec<LineWaitSummary>),
}

/// Forwards everything over a bounded channel.
///
/// The simulation blocks when the receiving side falls `capacity`
/// messages behind. Messages sent after the receiver hung up are dropped.
#[derive(Clone, Debug)]
pub struct ChannelReporter {
    tx: Sender<ReportMessage>,
}

impl ChannelReporter {
    /// Reporter and the receiving end of its channel.
    pub fn bounded(capacity: usize) -> (Self, Receiver<ReportMessage>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self { tx }, rx)
    }
}

impl Reporter for ChannelReporter {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        let _ = self.tx.send(ReportMessage::Tick(snapshot.clone()));
    }

    fn on_finish(&mut self, summaries: &[LineWaitSummary]) {
        let _ = self.tx.send(ReportMessage::Finish(summaries.to_vec()));
    }
}

/// Feed every message from `rx` into `reporter` until the channel closes.
pub fn drain<R: Reporter>(rx: &Receiver<ReportMessage>, reporter: &mut R) {
    for message in rx.iter() {
        match message {
            ReportMessage::Tick(snapshot) => reporter.on_tick(&snapshot),
            ReportMessage::Finish(summaries) => reporter.on_finish(&summaries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railsim_core::{Direction, LineId, NodeIdx, StationId, StationSide, TickId, TrainId};
    use railsim_engine::TrainStatus;

    fn view(line: u32, local: u32, position: Position) -> TrainView {
        TrainView {
            id: TrainId::new(LineId(line), local),
            status: TrainStatus::WaitToLoad,
            node: NodeIdx(0),
            position,
            time_left: 0,
        }
    }

    fn at(station: u32) -> StationSide {
        StationSide::new(StationId(station), Direction::Forward)
    }

    fn snapshot() -> TickSnapshot {
        TickSnapshot {
            tick: TickId(3),
            trains: vec![
                view(0, 0, Position::Link { from: at(1), to: at(2) }),
                view(0, 1, Position::Station(at(1))),
                view(2, 0, Position::Station(StationSide::new(StationId(4), Direction::Backward))),
            ],
        }
    }

    #[test]
    fn tick_line_format() {
        assert_eq!(
            format_tick(&snapshot(), &['g', 'y', 'b']),
            "3: g0-s1->s2, g1-s1, b0-s4"
        );
    }

    #[test]
    fn empty_tick_has_prefix_only() {
        let empty = TickSnapshot {
            tick: TickId(0),
            trains: vec![],
        };
        assert_eq!(format_tick(&empty, &['g']), "0: ");
    }

    #[test]
    fn summary_format() {
        let s = LineWaitSummary {
            line: LineId(0),
            name: "green".into(),
            trains: 4,
            sides_observed: 2,
            arrivals: 9,
            mean_wait: 1.26,
            mean_min: 0.0,
            mean_max: 3.5,
        };
        assert_eq!(
            format_summary(&[s]),
            "Average waiting times:\ngreen: 4 trains -> 1.3, 0.0, 3.5\n"
        );
    }

    #[test]
    fn quiet_reporter_writes_summary_only() {
        let mut r = ConsoleReporter::with_prefixes(Vec::new(), vec!['g', 'y', 'b']).quiet(true);
        r.on_tick(&snapshot());
        r.on_finish(&[]);
        let out = String::from_utf8(r.finish().unwrap()).unwrap();
        assert_eq!(out, "Average waiting times:\n");
    }

    #[test]
    fn channel_round_trip_preserves_order() {
        let (mut tx, rx) = ChannelReporter::bounded(4);
        let handle = std::thread::spawn(move || {
            let mut console = ConsoleReporter::with_prefixes(Vec::new(), vec!['g', 'y', 'b']);
            drain(&rx, &mut console);
            console.finish().unwrap()
        });
        tx.on_tick(&snapshot());
        tx.on_finish(&[]);
        drop(tx);
        let out = String::from_utf8(handle.join().unwrap()).unwrap();
        assert_eq!(out, "3: g0-s1->s2, g1-s1, b0-s4\nAverage waiting times:\n");
    }
}
