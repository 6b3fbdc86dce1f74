//! Selection rules shared by the disciplines.
//!
//! These are plain functions over per-thread flags so they can be checked in
//! isolation from the tick loop.

use crate::core::Thread;

/// Which threads currently hold at least one pending task
pub fn pending_flags(threads: &[Thread]) -> Vec<bool> {
    threads.iter().map(Thread::has_pending).collect()
}

/// Index of the pending thread with the numerically lowest priority.
/// Equal priorities resolve to the lowest index.
pub fn highest_priority_pending(pending: &[bool], priorities: &[u32]) -> Option<usize> {
    pending
        .iter()
        .zip(priorities)
        .enumerate()
        .filter(|&(_, (&is_pending, _))| is_pending)
        .min_by_key(|&(index, (_, &priority))| (priority, index))
        .map(|(index, _)| index)
}

/// First pending thread at or after `start`, wrapping around once.
pub fn next_pending_from(pending: &[bool], start: usize) -> Option<usize> {
    let n = pending.len();
    (0..n).map(|step| (start + step) % n).find(|&i| pending[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_priority_pending() {
        let priorities = [3, 1, 2, 4];
        assert_eq!(
            highest_priority_pending(&[true, true, true, true], &priorities),
            Some(1)
        );
        assert_eq!(
            highest_priority_pending(&[true, false, true, true], &priorities),
            Some(2)
        );
        assert_eq!(
            highest_priority_pending(&[false, false, false, true], &priorities),
            Some(3)
        );
        assert_eq!(highest_priority_pending(&[false; 4], &priorities), None);
    }

    #[test]
    fn test_priority_tie_takes_lowest_index() {
        assert_eq!(
            highest_priority_pending(&[false, true, true], &[1, 2, 2]),
            Some(1)
        );
        assert_eq!(highest_priority_pending(&[true, true], &[5, 5]), Some(0));
    }

    #[test]
    fn test_next_pending_wraps_once() {
        let pending = [true, false, false, true];
        assert_eq!(next_pending_from(&pending, 0), Some(0));
        assert_eq!(next_pending_from(&pending, 1), Some(3));
        assert_eq!(next_pending_from(&pending, 3), Some(3));
        assert_eq!(next_pending_from(&[false, true], 1), Some(1));
        assert_eq!(next_pending_from(&[false; 3], 2), None);
        assert_eq!(next_pending_from(&[], 0), None);
    }
}
