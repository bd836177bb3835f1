//! Parallel branch-and-bound search for a slide sequence to a gem
//!
//! Each round expands every branch of the frontier across the eight
//! directions, ordered by angular closeness to the target, on the rayon pool.
//! The first branch whose slide crosses the target wins and cancels the
//! others through a shared token.
//!
//! Branches track their own visited resting positions, so the frontier can
//! grow faster than the grid. When it outgrows `max_branches` the search
//! restarts in compact mode, where a resting position belongs to the first
//! branch that reaches it and the frontier is capped at `max_branches`.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::algorithm::bitset::PositionSet;
use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::slide::slide;
use crate::io::configuration::{HINT_MAX_BRANCHES, HINT_MAX_RETRIES};
use crate::spatial::{Direction, Grid, Position};

/// Limits of the hint search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintSearch {
    /// Frontier size that triggers a restart
    pub max_branches: usize,
    /// Restarts allowed before reporting that no hint is available
    pub max_retries: usize,
}

impl Default for HintSearch {
    fn default() -> Self {
        Self {
            max_branches: HINT_MAX_BRANCHES,
            max_retries: HINT_MAX_RETRIES,
        }
    }
}

/// Live-game context a hint is computed against
#[derive(Debug, Clone, Copy)]
pub struct HintRequest<'a> {
    /// Current cells
    pub grid: &'a Grid,
    /// Current ball position
    pub ball: Position,
    /// Gem the sequence must cross on its final slide
    pub target: Position,
    /// Trap region of the level
    pub stuck_area: &'a BTreeSet<Position>,
    /// Whether landings inside the trap region are allowed
    pub can_enter_stuck_area: bool,
}

#[derive(Debug, Clone)]
struct Branch {
    position: Position,
    visited: Vec<Position>,
    directions: Vec<Direction>,
}

enum Expansion {
    Found(Vec<Direction>),
    Children(Vec<Branch>),
    Cancelled,
}

enum Attempt {
    Found(Vec<Direction>),
    Exhausted,
    Overflow,
}

impl HintSearch {
    /// Create a search with explicit limits
    pub const fn new(max_branches: usize, max_retries: usize) -> Self {
        Self {
            max_branches,
            max_retries,
        }
    }

    /// Find a slide sequence whose last slide crosses `request.target`
    ///
    /// Returns `None` when the ball already sits on the target, when no
    /// sequence exists under the pruning rules, or when every attempt
    /// outgrew the branch limit.
    pub fn find_hint(&self, request: &HintRequest<'_>) -> Option<Vec<Direction>> {
        if request.ball == request.target {
            return None;
        }

        for attempt in 0..=self.max_retries {
            let compact = attempt > 0;
            match self.run_attempt(request, compact) {
                Attempt::Found(directions) => {
                    log::debug!(
                        "Hint toward {} found with {} slides (attempt {attempt})",
                        request.target,
                        directions.len()
                    );
                    return Some(directions);
                }
                Attempt::Exhausted => {
                    log::debug!("No slide sequence reaches {}", request.target);
                    return None;
                }
                Attempt::Overflow => {
                    log::debug!(
                        "Hint frontier exceeded {} branches, restarting (attempt {attempt})",
                        self.max_branches
                    );
                }
            }
        }

        None
    }

    fn run_attempt(&self, request: &HintRequest<'_>, compact: bool) -> Attempt {
        let token = CancellationToken::new();
        let mut claimed = PositionSet::for_grid(request.grid);
        claimed.insert(request.ball);

        let mut frontier = vec![Branch {
            position: request.ball,
            visited: vec![request.ball],
            directions: Vec::new(),
        }];

        while !frontier.is_empty() {
            let expansions: Vec<Expansion> = frontier
                .par_iter()
                .map(|branch| expand(branch, request, &token))
                .collect();

            let mut next = Vec::new();
            for expansion in expansions {
                match expansion {
                    Expansion::Found(directions) => return Attempt::Found(directions),
                    Expansion::Children(children) => next.extend(children),
                    Expansion::Cancelled => {}
                }
            }

            if compact {
                next.retain(|child| claimed.insert(child.position));
                next.truncate(self.max_branches);
            } else if next.len() > self.max_branches {
                return Attempt::Overflow;
            }

            frontier = next;
        }

        Attempt::Exhausted
    }
}

fn expand(branch: &Branch, request: &HintRequest<'_>, token: &CancellationToken) -> Expansion {
    let mut children = Vec::new();

    for direction in Direction::ordered_toward(branch.position, request.target) {
        if token.is_cancelled() {
            return Expansion::Cancelled;
        }

        let outcome = slide(request.grid, branch.position, direction, true);
        if !outcome.safe
            || outcome.is_noop(branch.position)
            || branch.visited.contains(&outcome.destination)
        {
            continue;
        }
        if !request.can_enter_stuck_area && request.stuck_area.contains(&outcome.destination) {
            continue;
        }

        let mut directions = branch.directions.clone();
        directions.push(direction);

        if outcome.trace.contains(&request.target) {
            token.cancel();
            return Expansion::Found(directions);
        }

        let mut visited = branch.visited.clone();
        visited.push(outcome.destination);
        children.push(Branch {
            position: outcome.destination,
            visited,
            directions,
        });
    }

    Expansion::Children(children)
}
