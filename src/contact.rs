//! Contact interval extraction.
//!
//! Each channel is walked once over the time window with a two-state
//! machine. A run opens on the first step where the contact predicate holds
//! and closes on the first step where it fails; the closing step is counted
//! in the reported length, so a run lost at step `j` is emitted as
//! `(start, j - start + 1)`. A run still open when the window ends is
//! dropped.

use crate::channels::{Channel, SampleMatrix};
use crate::interval::{ContactInterval, RangeSpec, TimeWindow};
use crate::parallel::map_channels;
use std::fmt;
use tracing::debug;

/// Contact condition selected by the sign of the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactPredicate {
    /// `value >= threshold`, used for thresholds `>= 0`.
    AtLeast(f64),
    /// `value <= threshold`, used for negative thresholds.
    AtMost(f64),
}

impl ContactPredicate {
    /// A threshold of exactly zero takes the `AtLeast` branch.
    pub fn from_threshold(threshold: f64) -> Self {
        if threshold >= 0.0 {
            ContactPredicate::AtLeast(threshold)
        } else {
            ContactPredicate::AtMost(threshold)
        }
    }

    #[inline]
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            ContactPredicate::AtLeast(t) => value >= t,
            ContactPredicate::AtMost(t) => value <= t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactState {
    Idle,
    InContact { start: usize },
}

impl ContactState {
    /// Advance by one step, returning the next state and any closed run.
    #[inline]
    fn step(self, step: usize, touching: bool) -> (Self, Option<ContactInterval>) {
        match (self, touching) {
            (ContactState::Idle, true) => (ContactState::InContact { start: step }, None),
            (ContactState::Idle, false) => (ContactState::Idle, None),
            (ContactState::InContact { .. }, true) => (self, None),
            (ContactState::InContact { start }, false) => (
                ContactState::Idle,
                Some(ContactInterval::new(start, step - start + 1)),
            ),
        }
    }
}

/// Result of walking one channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    pub intervals: Vec<ContactInterval>,
    /// Start step of a run still open at the end of the window. Such a run
    /// is not reported as an interval.
    pub unterminated: Option<usize>,
}

/// Walk `samples` over `window` and collect closed contact runs, also
/// reporting where a dropped trailing run began.
pub fn walk_channel(samples: &[f64], threshold: f64, window: TimeWindow) -> Extraction {
    let predicate = ContactPredicate::from_threshold(threshold);
    let window = window.clamp(samples.len());

    let mut intervals = Vec::new();
    let mut state = ContactState::Idle;
    for (offset, &value) in samples[window.start..window.end].iter().enumerate() {
        let (next, closed) = state.step(window.start + offset, predicate.holds(value));
        if let Some(interval) = closed {
            intervals.push(interval);
        }
        state = next;
    }

    let unterminated = match state {
        ContactState::InContact { start } => Some(start),
        ContactState::Idle => None,
    };

    Extraction {
        intervals,
        unterminated,
    }
}

/// Extract the contact intervals of one channel inside `window`.
pub fn extract_contacts(samples: &[f64], threshold: f64, window: TimeWindow) -> Vec<ContactInterval> {
    walk_channel(samples, threshold, window).intervals
}

/// Contact intervals of one named channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelContacts {
    pub name: String,
    pub intervals: Vec<ContactInterval>,
    pub unterminated: Option<usize>,
}

/// Contact intervals for every channel of a recording, in declaration order,
/// together with the window they were extracted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaitContacts {
    pub window: TimeWindow,
    pub channels: Vec<ChannelContacts>,
}

impl GaitContacts {
    /// Channel names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    /// Total number of intervals across all channels.
    pub fn interval_count(&self) -> usize {
        self.channels.iter().map(|c| c.intervals.len()).sum()
    }

    pub fn stats(&self) -> ContactStats {
        ContactStats {
            channels: self.channels.len(),
            steps: self.window.len(),
            intervals: self.interval_count(),
            unterminated: self
                .channels
                .iter()
                .filter(|c| c.unterminated.is_some())
                .count(),
        }
    }
}

/// Contact extraction over a whole recording.
#[derive(Debug, Clone)]
pub struct ContactCommand {
    /// Contact threshold; its sign selects the predicate direction
    pub threshold: f64,
    /// Requested time window (default: whole recording)
    pub range: RangeSpec,
}

impl ContactCommand {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            range: RangeSpec::all(),
        }
    }

    /// Restrict extraction to a time window.
    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.range = range;
        self
    }

    /// Extract every channel of the matrix.
    pub fn extract(&self, matrix: &SampleMatrix) -> GaitContacts {
        let window = self.range.resolve(matrix.step_count());
        debug!(
            "extracting {} channels over {} with {:?}",
            matrix.channel_count(),
            window,
            ContactPredicate::from_threshold(self.threshold)
        );

        let channels = map_channels(matrix, |channel| self.extract_channel(channel, window));

        GaitContacts { window, channels }
    }

    fn extract_channel(&self, channel: &Channel, window: TimeWindow) -> ChannelContacts {
        let Extraction {
            intervals,
            unterminated,
        } = walk_channel(&channel.samples, self.threshold, window);

        if let Some(start) = unterminated {
            debug!(
                "channel '{}': contact from step {} still open at window end, dropped",
                channel.name, start
            );
        }

        ChannelContacts {
            name: channel.name.clone(),
            intervals,
            unterminated,
        }
    }
}

/// Counters reported by `--stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactStats {
    pub channels: usize,
    pub steps: usize,
    pub intervals: usize,
    /// Channels whose trailing contact run was dropped at the window end
    pub unterminated: usize,
}

impl fmt::Display for ContactStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Channels: {}, Steps: {}, Intervals: {}, Open at end: {}",
            self.channels, self.steps, self.intervals, self.unterminated
        )
    }
}
