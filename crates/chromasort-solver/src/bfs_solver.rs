use std::{
    collections::{HashSet, VecDeque},
    sync::atomic::{AtomicBool, Ordering},
};

use chromasort_core::{Fingerprint, Move, PuzzleState, rules};
use serde::{Deserialize, Serialize};

/// Number of frontier pops between two progress notifications.
pub const PROGRESS_INTERVAL: usize = 256;

/// Bounds that stop a search early.
///
/// Bounds are counts rather than wall-clock timers so that results do not
/// depend on host speed.
///
/// # Examples
///
/// ```
/// use chromasort_solver::SearchLimits;
///
/// let limits = SearchLimits::default();
/// assert_eq!(limits.max_states, 5_000);
/// assert_eq!(limits.max_depth, 50);
///
/// let limits = SearchLimits::default().with_max_states(100_000);
/// assert_eq!(limits.max_states, 100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Maximum number of states taken off the frontier.
    pub max_states: usize,
    /// Maximum solution length in moves.
    pub max_depth: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_states: 5_000,
            max_depth: 50,
        }
    }
}

impl SearchLimits {
    /// Returns a copy with a different state bound.
    #[must_use]
    pub const fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Returns a copy with a different depth bound.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A won state is reachable; `moves` is the shortest solution length.
    Solved {
        /// Optimal number of moves.
        moves: usize,
    },
    /// The whole reachable space was explored without finding a win.
    Unsolvable,
    /// The initial state has no empty container and is not already won.
    NoEmptyContainer,
    /// The state bound was hit before the search finished.
    StateLimitExceeded,
    /// The frontier ran dry, but only because the depth bound cut it off.
    DepthLimitExceeded,
    /// The caller cancelled the search.
    Cancelled,
}

impl SearchOutcome {
    /// Returns `true` if the search stopped without an answer.
    ///
    /// Retrying with larger bounds may change an inconclusive outcome; it
    /// cannot change a conclusive one.
    #[must_use]
    pub fn is_inconclusive(self) -> bool {
        matches!(
            self,
            Self::StateLimitExceeded | Self::DepthLimitExceeded | Self::Cancelled
        )
    }

    /// Returns a description of why no solution was reported.
    #[must_use]
    pub fn failure_reason(self) -> Option<&'static str> {
        match self {
            Self::Solved { .. } => None,
            Self::Unsolvable => Some("exhausted with no solution"),
            Self::NoEmptyContainer => Some("needs at least one empty container"),
            Self::StateLimitExceeded => Some("exceeded state limit"),
            Self::DepthLimitExceeded => Some("exceeded depth limit"),
            Self::Cancelled => Some("search cancelled"),
        }
    }
}

/// Result of a single search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    outcome: SearchOutcome,
    states_explored: usize,
}

impl SearchReport {
    /// Creates a report.
    #[must_use]
    pub const fn new(outcome: SearchOutcome, states_explored: usize) -> Self {
        Self {
            outcome,
            states_explored,
        }
    }

    /// Returns how the search ended.
    #[must_use]
    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }

    /// Returns `true` if a solution was found.
    #[must_use]
    pub fn found(&self) -> bool {
        self.outcome.is_solved()
    }

    /// Returns the optimal move count when a solution was found.
    #[must_use]
    pub fn optimal_move_count(&self) -> Option<usize> {
        match self.outcome {
            SearchOutcome::Solved { moves } => Some(moves),
            _ => None,
        }
    }

    /// Returns the number of states taken off the frontier.
    #[must_use]
    pub fn states_explored(&self) -> usize {
        self.states_explored
    }

    /// Returns why the search did not find a solution.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.outcome.failure_reason()
    }
}

/// Optional callbacks for a running search.
///
/// Both hooks are cheap: cancellation is a flag read once per frontier pop,
/// and progress receives only the explored-state counter.
#[derive(Default)]
pub struct SearchHooks<'a> {
    cancel: Option<&'a AtomicBool>,
    on_progress: Option<&'a mut dyn FnMut(usize)>,
}

impl<'a> SearchHooks<'a> {
    /// Creates hooks that do nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the search once `flag` becomes `true`.
    #[must_use]
    pub fn cancel_on(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Reports the explored-state count every [`PROGRESS_INTERVAL`] pops.
    #[must_use]
    pub fn on_progress(mut self, callback: &'a mut dyn FnMut(usize)) -> Self {
        self.on_progress = Some(callback);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn report_progress(&mut self, explored: usize) {
        if explored % PROGRESS_INTERVAL == 0
            && let Some(callback) = self.on_progress.as_mut()
        {
            callback(explored);
        }
    }
}

/// Breadth-first solvability search.
///
/// The frontier is processed strictly first-in first-out, so the first won
/// state reached gives the optimal move count. A visited set keyed by
/// [`Fingerprint`] keeps identical layouts from being expanded twice.
///
/// Every run owns its frontier and visited set, so one solver can be shared
/// freely between threads.
///
/// # Examples
///
/// ```
/// use chromasort_core::PuzzleState;
/// use chromasort_solver::{BfsSolver, SearchOutcome};
///
/// let state: PuzzleState = "2:RB 2:BR 2:".parse()?;
/// let report = BfsSolver::default().solve(&state);
/// assert_eq!(report.outcome(), SearchOutcome::Solved { moves: 2 });
/// # Ok::<(), chromasort_core::ParseStateError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsSolver {
    limits: SearchLimits,
}

impl BfsSolver {
    /// Creates a solver with the given bounds.
    #[must_use]
    pub const fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    /// Returns the configured bounds.
    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Searches for the shortest solution from `initial`.
    #[must_use]
    pub fn solve(&self, initial: &PuzzleState) -> SearchReport {
        self.solve_with(initial, SearchHooks::new())
    }

    /// Searches for the shortest solution with cancellation and progress hooks.
    pub fn solve_with(&self, initial: &PuzzleState, mut hooks: SearchHooks<'_>) -> SearchReport {
        if rules::is_won(initial) {
            return SearchReport::new(SearchOutcome::Solved { moves: 0 }, 0);
        }
        if initial.empty_count() == 0 {
            return SearchReport::new(SearchOutcome::NoEmptyContainer, 0);
        }

        let mut visited: HashSet<Fingerprint> = HashSet::new();
        visited.insert(initial.fingerprint());
        let mut frontier = VecDeque::from([(initial.clone(), 0_usize)]);
        let mut explored = 0;
        let mut depth_cut = false;

        while !frontier.is_empty() {
            if hooks.is_cancelled() {
                return self.finish(SearchOutcome::Cancelled, explored);
            }
            if explored >= self.limits.max_states {
                return self.finish(SearchOutcome::StateLimitExceeded, explored);
            }
            let Some((state, depth)) = frontier.pop_front() else {
                break;
            };
            explored += 1;
            hooks.report_progress(explored);

            if depth >= self.limits.max_depth {
                depth_cut = true;
                continue;
            }

            for (mv, next) in rules::successors(&state) {
                if is_relabeling(&state, mv) {
                    continue;
                }
                if !visited.insert(next.fingerprint()) {
                    continue;
                }
                if rules::is_won(&next) {
                    return self.finish(SearchOutcome::Solved { moves: depth + 1 }, explored);
                }
                frontier.push_back((next, depth + 1));
            }
        }

        let outcome = if depth_cut {
            SearchOutcome::DepthLimitExceeded
        } else {
            SearchOutcome::Unsolvable
        };
        self.finish(outcome, explored)
    }

    fn finish(&self, outcome: SearchOutcome, explored: usize) -> SearchReport {
        log::trace!(
            "search finished: {outcome:?} after {explored} states (limits: {:?})",
            self.limits
        );
        SearchReport::new(outcome, explored)
    }
}

/// Returns `true` if `mv` only swaps a uniform container into an equivalent
/// empty one.
///
/// Such a move yields a permutation of the current state, so every solution
/// reachable after it is reachable as fast without it.
fn is_relabeling(state: &PuzzleState, mv: Move) -> bool {
    let (Some(from), Some(to)) = (state.container(mv.from), state.container(mv.to)) else {
        return false;
    };
    to.is_empty() && from.is_uniform() && from.capacity() == to.capacity()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use chromasort_core::Color;
    use proptest::prelude::*;

    use super::*;

    fn parse(s: &str) -> PuzzleState {
        s.parse().unwrap()
    }

    fn solve(s: &str) -> SearchReport {
        BfsSolver::default().solve(&parse(s))
    }

    #[test]
    fn test_already_won_short_circuits() {
        let report = solve("2:RR 3:BBB 2:");
        assert_eq!(report.outcome(), SearchOutcome::Solved { moves: 0 });
        assert_eq!(report.states_explored(), 0);
        assert_eq!(report.optimal_move_count(), Some(0));
    }

    #[test]
    fn test_no_empty_container_fails_fast() {
        let report = solve("2:RB 2:BR");
        assert_eq!(report.outcome(), SearchOutcome::NoEmptyContainer);
        assert_eq!(report.states_explored(), 0);
        assert_eq!(report.error(), Some("needs at least one empty container"));
        assert!(!report.outcome().is_inconclusive());
    }

    #[test]
    fn test_single_move_solution() {
        let report = solve("2:RB 2:B 2:R 2:");
        assert_eq!(report.optimal_move_count(), Some(1));
    }

    #[test]
    fn test_known_optimal_lengths() {
        // B out to the spare, then R onto R.
        assert_eq!(solve("2:RB 2:BR 2:").optimal_move_count(), Some(2));
        // Unstack a single mixed container.
        assert_eq!(solve("3:RBR 3: 3:").optimal_move_count(), Some(2));
        // Already sorted except one stray unit.
        assert_eq!(solve("3:RRB 3:BB 3:").optimal_move_count(), Some(1));
    }

    #[test]
    fn test_concrete_scenario_is_solvable() {
        let report = solve("4:RBR 4:BRB 4: 4:");
        assert!(report.found());
        // Both mixed containers must give up their top two runs.
        assert_eq!(report.optimal_move_count(), Some(4));
        assert!(report.states_explored() > 0);
    }

    #[test]
    fn test_optimal_length_matches_shallower_search() {
        let state = parse("4:RBR 4:BRB 4: 4:");
        let optimal = BfsSolver::default()
            .solve(&state)
            .optimal_move_count()
            .unwrap();

        let exact = BfsSolver::new(SearchLimits::default().with_max_depth(optimal)).solve(&state);
        assert_eq!(exact.optimal_move_count(), Some(optimal));

        let short =
            BfsSolver::new(SearchLimits::default().with_max_depth(optimal - 1)).solve(&state);
        assert_eq!(short.outcome(), SearchOutcome::DepthLimitExceeded);
    }

    #[test]
    fn test_exhausted_search_is_unsolvable() {
        // Four colors can never be sorted into three containers.
        let report = solve("2:RB 2:GY 2:");
        assert_eq!(report.outcome(), SearchOutcome::Unsolvable);
        assert_eq!(report.error(), Some("exhausted with no solution"));
        assert!(report.states_explored() > 0);
    }

    #[test]
    fn test_state_limit_on_large_puzzle() {
        // 10 mixed containers, each color exactly 4 times, plus 10 empties.
        let colors = &Color::ALL[..10];
        let mixed = (0..10).map(|i| (0..4).map(move |k| colors[(i + k * 3) % 10]).collect());
        let layout: Vec<Vec<Color>> = mixed.chain((0..10).map(|_| Vec::new())).collect();
        let state = PuzzleState::from_layout(4, layout).unwrap();
        assert_eq!(state.len(), 20);

        let solver = BfsSolver::new(SearchLimits::default().with_max_states(100));
        let report = solver.solve(&state);
        assert_eq!(report.outcome(), SearchOutcome::StateLimitExceeded);
        assert_eq!(report.states_explored(), 100);
        assert_eq!(report.error(), Some("exceeded state limit"));
        assert!(report.outcome().is_inconclusive());
    }

    #[test]
    fn test_cancellation() {
        let cancel = AtomicBool::new(true);
        let report = BfsSolver::default().solve_with(
            &parse("4:RBR 4:BRB 4: 4:"),
            SearchHooks::new().cancel_on(&cancel),
        );
        assert_eq!(report.outcome(), SearchOutcome::Cancelled);
        assert_eq!(report.states_explored(), 0);
        assert!(report.outcome().is_inconclusive());
    }

    #[test]
    fn test_progress_reports_counter() {
        let mut seen = Vec::new();
        let mut record = |explored: usize| seen.push(explored);
        let limits = SearchLimits::default().with_max_states(PROGRESS_INTERVAL * 2);
        let report = BfsSolver::new(limits).solve_with(
            &parse("4:RGBY 4:YBGR 4:GRYB 4:BYRG 4: 4:"),
            SearchHooks::new().on_progress(&mut record),
        );
        let expected: Vec<_> = (1..=report.states_explored() / PROGRESS_INTERVAL)
            .map(|i| i * PROGRESS_INTERVAL)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_relabeling_is_pruned() {
        let state = parse("2:RR 2: 2:B");
        assert!(is_relabeling(&state, Move::new(0, 1)));
        assert!(!is_relabeling(&state, Move::new(2, 0)));
        let mixed = parse("2:RB 2:");
        assert!(!is_relabeling(&mixed, Move::new(0, 1)));
        let uneven = parse("2:RR 3:");
        assert!(!is_relabeling(&uneven, Move::new(0, 1)));
    }

    /// Three colors dealt into three containers of capacity 3, plus two empties.
    fn arb_deal() -> impl Strategy<Value = PuzzleState> {
        let units: Vec<Color> = Color::ALL[..3]
            .iter()
            .flat_map(|&c| [c; 3])
            .collect();
        Just(units).prop_shuffle().prop_map(|units| {
            let layout = units
                .chunks(3)
                .map(<[Color]>::to_vec)
                .chain([Vec::new(), Vec::new()]);
            PuzzleState::from_layout(3, layout).unwrap()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_no_successor_beats_the_optimum(state in arb_deal()) {
            let solver = BfsSolver::new(SearchLimits::default().with_max_states(200_000));
            let report = solver.solve(&state);
            prop_assert!(!report.outcome().is_inconclusive());
            let Some(optimal) = report.optimal_move_count() else {
                return Ok(());
            };
            for (_, next) in rules::successors(&state) {
                if let Some(moves) = solver.solve(&next).optimal_move_count() {
                    prop_assert!(moves + 1 >= optimal);
                }
            }
        }
    }
}
