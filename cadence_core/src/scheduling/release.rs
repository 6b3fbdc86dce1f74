//! Periodic release tracking.
//!
//! Each thread releases a task every `period` units. Two boundary rules are
//! supported:
//!
//! - **Offset**: the first release happens at `period`, and the next release
//!   time is advanced by exactly one period per release. If several
//!   boundaries were crossed since the last check, one task is released per
//!   boundary, so nothing is dropped and nothing drifts.
//! - **Aligned**: a thread releases whenever `time % period == 0`, including
//!   time 0.

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    Offset,
    Aligned,
}

/// Per-thread next-release bookkeeping
#[derive(Debug, Clone)]
pub struct ReleaseClock {
    mode: ReleaseMode,
    periods: Vec<u64>,
    next_release: Vec<u64>,
}

impl ReleaseClock {
    /// Every period must be at least 1.
    pub fn new(mode: ReleaseMode, periods: &[u32]) -> Self {
        let periods: Vec<u64> = periods.iter().map(|&p| u64::from(p)).collect();
        let next_release = match mode {
            ReleaseMode::Offset => periods.clone(),
            ReleaseMode::Aligned => vec![0; periods.len()],
        };

        Self {
            mode,
            periods,
            next_release,
        }
    }

    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    /// Number of tasks thread `index` releases at `time`. Advances the
    /// thread's next release time past `time`.
    pub fn due(&mut self, index: usize, time: u64) -> u32 {
        let period = self.periods[index];
        match self.mode {
            ReleaseMode::Offset => {
                let mut count = 0;
                while self.next_release[index] <= time {
                    self.next_release[index] += period;
                    count += 1;
                }
                if count > 1 {
                    debug!(
                        "thread {} crossed {} release boundaries at t={}",
                        index, count, time
                    );
                }
                count
            }
            ReleaseMode::Aligned => {
                if time % period == 0 {
                    self.next_release[index] = time + period;
                    1
                } else {
                    0
                }
            }
        }
    }

    /// Absolute time of the next pending release for thread `index`
    pub fn next_release(&self, index: usize) -> u64 {
        self.next_release[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_releases_one_period_apart() {
        let mut clock = ReleaseClock::new(ReleaseMode::Offset, &[3]);
        let releases: Vec<u64> = (0..13).filter(|&t| clock.due(0, t) > 0).collect();
        assert_eq!(releases, vec![3, 6, 9, 12]);
        assert_eq!(clock.next_release(0), 15);
    }

    #[test]
    fn test_offset_catches_up_missed_boundaries() {
        let mut clock = ReleaseClock::new(ReleaseMode::Offset, &[2]);
        // Jump straight to t=7: boundaries 2, 4 and 6 were all crossed
        assert_eq!(clock.due(0, 7), 3);
        assert_eq!(clock.next_release(0), 8);
        assert_eq!(clock.due(0, 7), 0);
    }

    #[test]
    fn test_aligned_releases_at_zero() {
        let mut clock = ReleaseClock::new(ReleaseMode::Aligned, &[4, 1]);
        let first: Vec<u64> = (0..9).filter(|&t| clock.due(0, t) > 0).collect();
        assert_eq!(first, vec![0, 4, 8]);
        assert_eq!(clock.next_release(0), 12);
        assert_eq!(clock.due(1, 9), 1);
    }
}
