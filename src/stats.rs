//! Search counters and the depth-weighted progress estimator.

use std::time::Duration;

/// The number of shallow depths tracked by the progress estimator
/// (spec §4.15: depths `0..=4`).
const PROGRESS_DEPTHS: usize = 5;

/// Per-worker search counters.
///
/// Owned by a single [`crate::engine::BacktrackingEngine`]; never shared
/// across threads (spec §5 — counters are per-worker-owned, no locking).
#[derive(Debug, Clone, Default)]
pub struct StatisticsManager {
    recursive_calls: u64,
    placements: u64,
    backtracks: u64,
    fit_checks: u64,
    singletons_found: u64,
    singletons_placed: u64,
    dead_ends_detected: u64,
    /// `(total_options, current_option)` at each of the shallowest depths,
    /// used to estimate search progress.
    progress_slots: [(usize, usize); PROGRESS_DEPTHS],
    /// Compute time accumulated in prior sessions (loaded from a
    /// checkpoint), added to this session's elapsed time when reporting.
    previous_time_offset: Duration,
}

impl StatisticsManager {
    /// A fresh, zeroed counter set.
    #[must_use]
    pub fn new() -> StatisticsManager {
        StatisticsManager::default()
    }

    /// Restore the cumulative compute time carried over from a checkpoint.
    pub fn set_previous_time_offset(&mut self, offset: Duration) {
        self.previous_time_offset = offset;
    }

    /// Cumulative compute time: this session's elapsed time plus any
    /// carried-over offset.
    #[must_use]
    pub fn cumulative_time(&self, this_session_elapsed: Duration) -> Duration {
        self.previous_time_offset + this_session_elapsed
    }

    /// Record one recursive call into the engine.
    pub fn record_recursive_call(&mut self) {
        self.recursive_calls += 1;
    }

    /// Record a successful tile placement.
    pub fn record_placement(&mut self) {
        self.placements += 1;
    }

    /// Record a backtrack (undo) of a placement.
    pub fn record_backtrack(&mut self) {
        self.backtracks += 1;
    }

    /// Record one `fits` check.
    pub fn record_fit_check(&mut self) {
        self.fit_checks += 1;
    }

    /// Record a singleton tile being found during detection.
    pub fn record_singleton_found(&mut self) {
        self.singletons_found += 1;
    }

    /// Record a singleton tile being placed.
    pub fn record_singleton_placed(&mut self) {
        self.singletons_placed += 1;
    }

    /// Record an AC-3 dead end (a domain emptied by propagation).
    pub fn record_dead_end(&mut self) {
        self.dead_ends_detected += 1;
    }

    /// Number of recursive engine calls so far.
    #[must_use]
    pub const fn recursive_calls(&self) -> u64 {
        self.recursive_calls
    }

    /// Number of tile placements attempted so far.
    #[must_use]
    pub const fn placements(&self) -> u64 {
        self.placements
    }

    /// Number of backtracks so far.
    #[must_use]
    pub const fn backtracks(&self) -> u64 {
        self.backtracks
    }

    /// Number of `fits` checks performed so far.
    #[must_use]
    pub const fn fit_checks(&self) -> u64 {
        self.fit_checks
    }

    /// Number of singleton tiles found so far.
    #[must_use]
    pub const fn singletons_found(&self) -> u64 {
        self.singletons_found
    }

    /// Number of singleton tiles placed so far.
    #[must_use]
    pub const fn singletons_placed(&self) -> u64 {
        self.singletons_placed
    }

    /// Number of AC-3 dead ends detected so far.
    #[must_use]
    pub const fn dead_ends_detected(&self) -> u64 {
        self.dead_ends_detected
    }

    /// Record the branching factor observed at a shallow depth, for the
    /// progress estimate. `depth` beyond the tracked range is ignored.
    pub fn record_branch(&mut self, depth: usize, current_option: usize, total_options: usize) {
        if let Some(slot) = self.progress_slots.get_mut(depth) {
            *slot = (total_options, current_option);
        }
    }

    /// Estimate overall search progress as a percentage in `[0, 100]`.
    ///
    /// `progress = sum_i (current_i / total_i) * prod_{j<i} (1 / total_j)`,
    /// clamped to `[0, 100]` (spec §4.15).
    #[must_use]
    pub fn progress_estimate(&self) -> f64 {
        let mut progress = 0.0;
        let mut prefix_scale = 1.0;
        for &(total, current) in &self.progress_slots {
            if total == 0 {
                break;
            }
            progress += (current as f64 / total as f64) * prefix_scale;
            prefix_scale /= total as f64;
        }
        (progress * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_zero_with_no_branches_recorded() {
        let stats = StatisticsManager::new();
        assert_eq!(stats.progress_estimate(), 0.0);
    }

    #[test]
    fn progress_is_bounded_and_monotonic_in_current_option() {
        let mut stats = StatisticsManager::new();
        stats.record_branch(0, 0, 4);
        let low = stats.progress_estimate();
        stats.record_branch(0, 3, 4);
        let high = stats.progress_estimate();
        assert!(low <= high);
        assert!(high <= 100.0);
    }

    #[test]
    fn cumulative_time_adds_previous_offset() {
        let mut stats = StatisticsManager::new();
        stats.set_previous_time_offset(Duration::from_secs(10));
        assert_eq!(
            stats.cumulative_time(Duration::from_secs(5)),
            Duration::from_secs(15)
        );
    }
}
