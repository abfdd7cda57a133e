//! Core interval types for contact runs and time windows.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::channels::GaitError;

/// A ground-contact run on one channel.
///
/// `start` is the time step at which contact began and `len` the number of
/// steps reported for the run. Lengths are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactInterval {
    pub start: usize,
    pub len: usize,
}

impl ContactInterval {
    /// Create a new interval.
    #[inline]
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Exclusive end step, `start + len`.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns the length of the interval.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the interval covers no steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if this interval shares at least one step with another.
    #[inline]
    pub fn overlaps(&self, other: &ContactInterval) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl fmt::Display for ContactInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.start, self.len)
    }
}

impl Ord for ContactInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then(self.len.cmp(&other.len))
    }
}

impl PartialOrd for ContactInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Half-open range of time steps `[start, end)` considered for extraction
/// and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: usize,
    pub end: usize,
}

impl TimeWindow {
    /// Create a window. A reversed pair collapses to an empty window at `start`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// The whole recording, `[0, steps)`.
    #[inline]
    pub fn full(steps: usize) -> Self {
        Self::new(0, steps)
    }

    /// Restrict the window to `[0, steps)`.
    #[inline]
    pub fn clamp(self, steps: usize) -> Self {
        let end = self.end.min(steps);
        Self::new(self.start.min(end), end)
    }

    /// Number of steps in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the window holds no steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A time window as requested on the command line, before it is resolved
/// against the length of a recording.
///
/// Accepted forms: `MIN:MAX`, `MAX`, `MIN:` and `:MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeSpec {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl RangeSpec {
    /// Range covering the whole recording.
    pub fn all() -> Self {
        Self::default()
    }

    /// Resolve against a recording of `steps` time steps, clamping any bound
    /// that falls outside `[0, steps)`.
    pub fn resolve(&self, steps: usize) -> TimeWindow {
        let requested = TimeWindow::new(self.min.unwrap_or(0), self.max.unwrap_or(steps));
        let window = requested.clamp(steps);
        if window != requested {
            tracing::debug!(
                "requested window {} clamped to {} ({} steps available)",
                requested,
                window,
                steps
            );
        }
        window
    }
}

impl FromStr for RangeSpec {
    type Err = GaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bound = |field: &str| -> Result<Option<usize>, GaitError> {
            let field = field.trim();
            if field.is_empty() {
                return Ok(None);
            }
            field
                .parse()
                .map(Some)
                .map_err(|_| GaitError::InvalidRange(format!("invalid step index '{}'", field)))
        };

        let spec = match s.split_once(':') {
            Some((min, max)) => Self {
                min: bound(min)?,
                max: bound(max)?,
            },
            None => Self {
                min: None,
                max: bound(s)?,
            },
        };

        if let (Some(min), Some(max)) = (spec.min, spec.max) {
            if min > max {
                return Err(GaitError::InvalidRange(format!(
                    "start {} is after end {}",
                    min, max
                )));
            }
        }
        if spec.min.is_none() && spec.max.is_none() {
            return Err(GaitError::InvalidRange(format!("empty range '{}'", s)));
        }

        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_end_and_overlap() {
        let a = ContactInterval::new(1, 3);
        let b = ContactInterval::new(4, 2);
        let c = ContactInterval::new(3, 2);

        assert_eq!(a.end(), 4);
        assert!(!a.overlaps(&b)); // Adjacent, not overlapping
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_interval_ordering() {
        let mut intervals = [
            ContactInterval::new(5, 2),
            ContactInterval::new(1, 3),
            ContactInterval::new(1, 2),
        ];
        intervals.sort();

        assert_eq!(intervals[0], ContactInterval::new(1, 2));
        assert_eq!(intervals[1], ContactInterval::new(1, 3));
        assert_eq!(intervals[2].start, 5);
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(ContactInterval::new(5, 2).to_string(), "5\t2");
    }

    #[test]
    fn test_window_clamp() {
        assert_eq!(TimeWindow::new(2, 50).clamp(10), TimeWindow::new(2, 10));
        assert_eq!(TimeWindow::new(20, 50).clamp(10), TimeWindow::new(10, 10));
        assert!(TimeWindow::new(20, 50).clamp(10).is_empty());
        assert_eq!(TimeWindow::full(7).clamp(7), TimeWindow::new(0, 7));
    }

    #[test]
    fn test_window_len() {
        let w = TimeWindow::new(2, 5);
        assert_eq!(w.len(), 3);
        assert!(!w.is_empty());
        assert_eq!(TimeWindow::new(5, 2).len(), 0);
    }

    #[test]
    fn test_range_spec_forms() {
        let full: RangeSpec = "10:20".parse().unwrap();
        assert_eq!(full.min, Some(10));
        assert_eq!(full.max, Some(20));

        let max_only: RangeSpec = "20".parse().unwrap();
        assert_eq!(max_only.min, None);
        assert_eq!(max_only.max, Some(20));

        let open_end: RangeSpec = "5:".parse().unwrap();
        assert_eq!(open_end.resolve(8), TimeWindow::new(5, 8));

        let open_start: RangeSpec = ":3".parse().unwrap();
        assert_eq!(open_start.resolve(8), TimeWindow::new(0, 3));
    }

    #[test]
    fn test_range_spec_rejects_bad_input() {
        assert!("20:10".parse::<RangeSpec>().is_err());
        assert!("a:10".parse::<RangeSpec>().is_err());
        assert!("-1".parse::<RangeSpec>().is_err());
        assert!(":".parse::<RangeSpec>().is_err());
        assert!("".parse::<RangeSpec>().is_err());
    }

    #[test]
    fn test_range_spec_resolve_clamps() {
        let spec: RangeSpec = "3:100".parse().unwrap();
        assert_eq!(spec.resolve(10), TimeWindow::new(3, 10));
        assert_eq!(RangeSpec::all().resolve(10), TimeWindow::full(10));
        assert_eq!(RangeSpec::all().resolve(0), TimeWindow::new(0, 0));
    }
}
