use log::{info, trace};

use crate::config::{MovePolicy, POINTS_PER_PELLET};
use crate::grid::{Cell, Grid, Layout, Position};
use crate::input::{Direction, GameInput};

/// Score and level counters for one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Progress {
    pub level: u32,
    pub score: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self { level: 1, score: 0 }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// No intent was pending.
    Idle,
    /// The destination was a wall or outside the grid.
    Blocked,
    Moved {
        ate_pellet: bool,
        level_completed: bool,
    },
}

/// Borrowed view of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub position: Position,
    pub progress: Progress,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    position: Position,
    progress: Progress,
    pending_direction: Direction,
    policy: MovePolicy,
    pub tick_count: u64,
}

impl GameState {
    /// Starts a session on `grid` with the player at `start`.
    ///
    /// # Panics
    ///
    /// Panics when `start` is outside the grid or on a wall.
    #[must_use]
    pub fn new(mut grid: Grid, start: Position, policy: MovePolicy) -> Self {
        assert!(
            grid.is_walkable(start),
            "player start {start:?} must be an in-bounds non-wall cell"
        );
        grid.set(start, Cell::Empty);

        Self {
            grid,
            position: start,
            progress: Progress::default(),
            pending_direction: Direction::Stopped,
            policy,
            tick_count: 0,
        }
    }

    #[must_use]
    pub fn from_layout(layout: Layout, policy: MovePolicy) -> Self {
        Self::new(layout.grid, layout.start, policy)
    }

    /// Records the latest movement intent, replacing any unconsumed one.
    pub fn set_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_count += 1;

        let direction = self.pending_direction;
        if !direction.is_moving() {
            return TickOutcome::Idle;
        }

        let candidate = self.position.offset(direction.delta());
        if !self.grid.is_walkable(candidate) {
            trace!("move {direction:?} from {:?} blocked", self.position);
            self.consume_intent();
            return TickOutcome::Blocked;
        }

        self.position = candidate;

        let ate_pellet = self.grid.cell(candidate) == Some(Cell::Pellet);
        if ate_pellet {
            self.grid.set(candidate, Cell::Empty);
            self.progress.score += POINTS_PER_PELLET;
        }

        let level_completed = ate_pellet && !self.grid.has_pellets();
        if level_completed {
            self.progress.level += 1;
            self.grid.regenerate_pellets(self.position);
            info!(
                "level {} cleared, score {}",
                self.progress.level - 1,
                self.progress.score
            );
        }

        self.consume_intent();

        TickOutcome::Moved {
            ate_pellet,
            level_completed,
        }
    }

    /// Applies one external input event.
    ///
    /// Under [`MovePolicy::PerKeyPress`] a direction input moves immediately.
    /// Runtime-level inputs (pause, help, quit) are ignored here.
    pub fn apply_input(&mut self, input: GameInput) -> Option<TickOutcome> {
        match input {
            GameInput::Direction(direction) => {
                self.set_direction(direction);
                if self.policy == MovePolicy::PerKeyPress {
                    return Some(self.tick());
                }
            }
            GameInput::Unmapped | GameInput::Pause | GameInput::Help | GameInput::Quit => {}
        }

        None
    }

    /// Returns the current frame data.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            position: self.position,
            progress: self.progress,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    #[must_use]
    pub fn policy(&self) -> MovePolicy {
        self.policy
    }

    #[must_use]
    pub fn pellets_remaining(&self) -> usize {
        self.grid.pellet_count()
    }

    fn consume_intent(&mut self) {
        if !self.policy.latches_direction() {
            self.pending_direction = Direction::Stopped;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::MovePolicy;
    use crate::grid::{Cell, Layout, Position};
    use crate::input::{Direction, GameInput};

    use super::{GameState, Progress, TickOutcome};

    fn state(layout: &str, policy: MovePolicy) -> GameState {
        GameState::from_layout(
            Layout::parse(layout).expect("test layout should parse"),
            policy,
        )
    }

    #[test]
    fn new_session_starts_at_level_one_with_zero_score() {
        let state = state("P..", MovePolicy::FixedInterval);

        assert_eq!(state.progress(), Progress { level: 1, score: 0 });
        assert_eq!(state.pending_direction(), Direction::Stopped);
        assert_eq!(state.pellets_remaining(), 2);
    }

    #[test]
    fn stopped_tick_changes_nothing() {
        let mut state = state("#P.#", MovePolicy::FixedInterval);
        let grid_before = state.grid().clone();

        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.position(), Position::new(1, 0));
        assert_eq!(state.grid(), &grid_before);
        assert_eq!(state.progress().score, 0);
    }

    #[test]
    fn wall_blocks_movement() {
        let mut state = state("#P.#", MovePolicy::FixedInterval);

        state.set_direction(Direction::Left);

        assert_eq!(state.tick(), TickOutcome::Blocked);
        assert_eq!(state.position(), Position::new(1, 0));
    }

    #[test]
    fn per_key_press_block_clears_intent() {
        let mut state = state("#P.", MovePolicy::PerKeyPress);

        state.set_direction(Direction::Left);

        assert_eq!(state.tick(), TickOutcome::Blocked);
        assert_eq!(state.pending_direction(), Direction::Stopped);
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.position(), Position::new(1, 0));
    }

    #[test]
    fn fixed_interval_block_keeps_intent_latched() {
        let mut state = state("#P.", MovePolicy::FixedInterval);

        state.set_direction(Direction::Left);

        assert_eq!(state.tick(), TickOutcome::Blocked);
        assert_eq!(state.pending_direction(), Direction::Left);
        assert_eq!(state.tick(), TickOutcome::Blocked);
        assert_eq!(state.position(), Position::new(1, 0));
    }

    #[test]
    fn grid_edge_blocks_movement() {
        let mut state = state("P.", MovePolicy::FixedInterval);

        state.set_direction(Direction::Up);

        assert_eq!(state.tick(), TickOutcome::Blocked);
        assert_eq!(state.position(), Position::new(0, 0));
    }

    #[test]
    fn eating_pellet_scores_and_empties_cell() {
        let mut state = state("P..", MovePolicy::FixedInterval);

        state.set_direction(Direction::Right);
        let outcome = state.tick();

        assert_eq!(
            outcome,
            TickOutcome::Moved {
                ate_pellet: true,
                level_completed: false,
            }
        );
        assert_eq!(state.progress().score, 1);
        assert_eq!(state.grid().cell(Position::new(1, 0)), Some(Cell::Empty));
    }

    #[test]
    fn walking_over_empty_cell_does_not_score() {
        let mut state = state("P_.", MovePolicy::FixedInterval);

        state.set_direction(Direction::Right);

        assert_eq!(
            state.tick(),
            TickOutcome::Moved {
                ate_pellet: false,
                level_completed: false,
            }
        );
        assert_eq!(state.progress().score, 0);
    }

    #[test]
    fn fixed_interval_latches_direction() {
        let mut state = state("P...", MovePolicy::FixedInterval);

        state.set_direction(Direction::Right);
        state.tick();
        state.tick();

        assert_eq!(state.position(), Position::new(2, 0));
        assert_eq!(state.pending_direction(), Direction::Right);
    }

    #[test]
    fn per_key_press_consumes_intent() {
        let mut state = state("P...", MovePolicy::PerKeyPress);

        let outcome = state.apply_input(GameInput::Direction(Direction::Right));

        assert!(matches!(outcome, Some(TickOutcome::Moved { .. })));
        assert_eq!(state.pending_direction(), Direction::Stopped);
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.position(), Position::new(1, 0));
    }

    #[test]
    fn fixed_interval_input_waits_for_tick() {
        let mut state = state("P...", MovePolicy::FixedInterval);

        assert_eq!(
            state.apply_input(GameInput::Direction(Direction::Right)),
            None
        );
        assert_eq!(state.position(), Position::new(0, 0));
    }

    #[test]
    fn unmapped_input_is_ignored_by_default() {
        let mut state = state("P...", MovePolicy::FixedInterval);

        state.set_direction(Direction::Right);
        state.apply_input(GameInput::Unmapped);

        assert_eq!(state.pending_direction(), Direction::Right);
    }

    #[test]
    fn stop_input_halts_a_latched_player() {
        let mut state = state("P...", MovePolicy::FixedInterval);

        state.set_direction(Direction::Right);
        state.tick();
        state.apply_input(GameInput::Direction(Direction::Stopped));

        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.position(), Position::new(1, 0));
    }

    #[test]
    fn clearing_last_pellet_advances_level_and_regenerates() {
        let mut state = state("#P_.#", MovePolicy::FixedInterval);

        state.set_direction(Direction::Right);
        state.tick();
        let outcome = state.tick();

        assert_eq!(
            outcome,
            TickOutcome::Moved {
                ate_pellet: true,
                level_completed: true,
            }
        );
        assert_eq!(state.progress(), Progress { level: 2, score: 1 });
        assert_eq!(state.grid().cell(Position::new(1, 0)), Some(Cell::Pellet));
        assert_eq!(state.grid().cell(Position::new(2, 0)), Some(Cell::Pellet));
        assert_eq!(state.grid().cell(Position::new(3, 0)), Some(Cell::Empty));
        assert_eq!(state.grid().cell(Position::new(0, 0)), Some(Cell::Wall));
    }

    #[test]
    #[should_panic(expected = "must be an in-bounds non-wall cell")]
    fn starting_on_a_wall_panics() {
        let layout = Layout::parse("#P.").expect("test layout should parse");
        let _ = GameState::new(layout.grid, Position::new(0, 0), MovePolicy::FixedInterval);
    }
}
