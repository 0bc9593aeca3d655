//! This module exposes the backtracking search as an externally driven
//! sequence of discrete grid mutations, so that a presentation layer can
//! render intermediate states and pause, resume, or cancel the search.
//!
//! The [StepController] runs the *identical* search as the
//! [BacktrackingSolver](crate::solver::BacktrackingSolver): empty cells are
//! visited in column-major order and candidates are tried ascending, so the
//! sequence of placements and undos, and thus the found solution, is exactly
//! the same. The only difference is that the search is driven as an explicit
//! state machine by repeated [StepController::step] calls from the caller's
//! loop instead of by recursion, which keeps pause and cancellation
//! cooperative and the memory profile at one frame per placed cell.
//!
//! Every call to `step` performs at most one grid mutation (one placement or
//! one undo) and then returns, which makes each call a suspension point:
//! pause and cancel signals are honored between steps, never in the middle
//! of a mutation. The caller owns the pacing; a visualization delay is
//! simply a sleep between `step` calls.
//!
//! ```
//! use sudoku_engine::Grid;
//! use sudoku_engine::stepper::{StepController, StepState};
//!
//! let grid = Grid::new();
//! let mut controller = StepController::new(&grid);
//! controller.start().unwrap();
//!
//! while controller.state() == StepState::Running {
//!     controller.step();
//! }
//!
//! assert!(controller.solution().is_some());
//! ```

use crate::{Grid, Position};
use crate::error::{SudokuError, SudokuResult};

use log::{debug, trace};

/// The lifecycle states of a [StepController].
///
/// Transitions: [StepController::start] moves `Idle` to `Running`;
/// [StepController::pause] and [StepController::resume] toggle between
/// `Running` and `Paused`; finding a solution or exhausting the search moves
/// to `Completed`; cancellation moves to `Aborted` at the next step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepState {

    /// The controller has been created but the search has not been started.
    Idle,

    /// The search is in progress and the next [StepController::step] call
    /// will advance it.
    Running,

    /// The search is suspended; `step` calls perform no mutation until
    /// [StepController::resume] is called.
    Paused,

    /// The search has terminated on its own, either by finding a solution
    /// (in which case [StepController::solution] returns it) or by
    /// exhausting all assignments.
    Completed,

    /// The search was cancelled from the outside before terminating.
    Aborted
}

/// The observable outcome of one [StepController::step] call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepEvent {

    /// A candidate digit was placed into the cell at the given address.
    Placed {
        /// The row of the mutated cell.
        row: usize,
        /// The column of the mutated cell.
        col: usize,
        /// The digit that was placed.
        digit: u8
    },

    /// The placement in the cell at the given address was undone; the cell
    /// is empty again.
    Undone {
        /// The row of the mutated cell.
        row: usize,
        /// The column of the mutated cell.
        col: usize
    },

    /// No empty cell remains; the working grid is a solution and the
    /// controller has moved to [StepState::Completed].
    Solved,

    /// All assignments were exhausted without finding a solution; the
    /// controller has moved to [StepState::Completed] and the working grid
    /// has been restored to its starting state.
    Exhausted,

    /// The search was cancelled; the controller has moved to
    /// [StepState::Aborted].
    Aborted,

    /// Nothing happened. This is returned while the controller is idle,
    /// paused, or already terminal.
    Waiting
}

/// The most recent probe of the search: the address being worked on and the
/// digit last tried there. Intended for rendering a cursor and trial digit
/// during visualization.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Probe {

    /// The row of the probed cell.
    pub row: usize,

    /// The column of the probed cell.
    pub col: usize,

    /// The digit most recently placed into the probed cell.
    pub digit: u8
}

/// One frame of the explicit search stack: the address of a visited empty
/// cell together with its candidate digits. Candidates are computed once
/// when the cell is first visited, exactly as the recursive solver does.
struct Frame {
    position: Position,
    candidates: Vec<u8>,
    next: usize
}

impl Frame {
    fn next_candidate(&mut self) -> Option<u8> {
        let candidate = self.candidates.get(self.next).copied();

        if candidate.is_some() {
            self.next += 1;
        }

        candidate
    }

    fn has_remaining(&self) -> bool {
        self.next < self.candidates.len()
    }
}

/// The phase of the search within [StepState::Running], deciding what the
/// next step does.
#[derive(Clone, Copy)]
enum Phase {

    /// Visit the next empty cell and place its first candidate.
    Advance,

    /// The top frame's placement was just undone; place its next candidate.
    Retry,

    /// Undo the placement of the top frame.
    Retreat
}

/// Runs the backtracking search over a private copy of a [Grid], one
/// observable mutation per [StepController::step] call. See the
/// [module documentation](crate::stepper) for the execution model.
pub struct StepController {
    grid: Grid,
    stack: Vec<Frame>,
    phase: Phase,
    state: StepState,
    cancel_requested: bool,
    probe: Option<Probe>,
    steps: usize,
    solved: bool
}

impl StepController {

    /// Creates a new controller in the [StepState::Idle] state, operating on
    /// a private copy of the given grid. The caller's grid is never mutated;
    /// retrieve the completed grid with [StepController::solution] after the
    /// search completes.
    pub fn new(grid: &Grid) -> StepController {
        StepController {
            grid: grid.clone(),
            stack: Vec::new(),
            phase: Phase::Advance,
            state: StepState::Idle,
            cancel_requested: false,
            probe: None,
            steps: 0,
            solved: false
        }
    }

    /// Starts the search, moving the controller from [StepState::Idle] to
    /// [StepState::Running]. No grid mutation happens until the first
    /// [StepController::step] call.
    ///
    /// # Errors
    ///
    /// [SudokuError::InvalidState] if the controller is not idle or if the
    /// conflict set of the grid is not empty (searching over an
    /// already-conflicting grid is rejected, exactly as in the blocking
    /// solver).
    pub fn start(&mut self) -> SudokuResult<()> {
        if self.state != StepState::Idle {
            return Err(SudokuError::InvalidState);
        }

        if !self.grid.conflicts().is_empty() {
            return Err(SudokuError::InvalidState);
        }

        debug!("stepped search started with {} clues",
            self.grid.count_clues());
        self.state = StepState::Running;
        Ok(())
    }

    /// Suspends the search. Subsequent [StepController::step] calls return
    /// [StepEvent::Waiting] without mutating the grid until
    /// [StepController::resume] is called. Has no effect unless the
    /// controller is running.
    pub fn pause(&mut self) {
        if self.state == StepState::Running {
            debug!("stepped search paused after {} steps", self.steps);
            self.state = StepState::Paused;
        }
    }

    /// Resumes a paused search. Has no effect unless the controller is
    /// paused.
    pub fn resume(&mut self) {
        if self.state == StepState::Paused {
            debug!("stepped search resumed");
            self.state = StepState::Running;
        }
    }

    /// Requests cancellation. The request takes effect at the next
    /// [StepController::step] call, never in the middle of a mutation; the
    /// controller then moves to [StepState::Aborted]. Cancelling an already
    /// terminal controller has no effect.
    pub fn cancel(&mut self) {
        self.cancel_requested = true;
    }

    /// Gets the current lifecycle state.
    pub fn state(&self) -> StepState {
        self.state
    }

    /// Gets the most recent probe, i.e. the address last worked on and the
    /// digit last tried there, or `None` if no digit has been placed yet.
    pub fn current_probe(&self) -> Option<Probe> {
        self.probe
    }

    /// Gets the number of mutating steps (placements and undos) performed so
    /// far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Gets a view of the working grid in its current intermediate state.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Gets the completed grid if the search has completed successfully, or
    /// `None` while it is still in progress, was aborted, or exhausted all
    /// assignments.
    pub fn solution(&self) -> Option<&Grid> {
        if self.solved {
            Some(&self.grid)
        }
        else {
            None
        }
    }

    /// Advances the search by at most one grid mutation and reports what
    /// happened. Cancellation and pause are checked first: a cancelled
    /// controller moves to [StepState::Aborted] and a paused (or idle, or
    /// terminal) controller performs no mutation.
    pub fn step(&mut self) -> StepEvent {
        match self.state {
            StepState::Idle | StepState::Completed | StepState::Aborted =>
                return StepEvent::Waiting,
            StepState::Running | StepState::Paused => { }
        }

        if self.cancel_requested {
            debug!("stepped search aborted after {} steps", self.steps);
            self.state = StepState::Aborted;
            return StepEvent::Aborted;
        }

        if self.state == StepState::Paused {
            return StepEvent::Waiting;
        }

        self.steps += 1;
        let event = match self.phase {
            Phase::Advance => self.advance(),
            Phase::Retry => self.retry(),
            Phase::Retreat => self.retreat()
        };
        trace!("step {}: {:?}", self.steps, event);

        match event {
            StepEvent::Solved => {
                debug!("stepped search found a solution in {} steps",
                    self.steps);
                self.solved = true;
                self.state = StepState::Completed;
            },
            StepEvent::Exhausted => {
                debug!("stepped search exhausted all assignments in {} steps",
                    self.steps);
                self.state = StepState::Completed;
            },
            _ => { }
        }

        event
    }

    fn place(&mut self, position: Position, digit: u8) -> StepEvent {
        let (row, col) = position;
        self.grid.write_digit(row, col, digit);
        self.probe = Some(Probe {
            row,
            col,
            digit
        });

        StepEvent::Placed {
            row,
            col,
            digit
        }
    }

    fn advance(&mut self) -> StepEvent {
        let position = match self.grid.next_empty() {
            None => return StepEvent::Solved,
            Some(position) => position
        };
        let mut frame = Frame {
            position,
            candidates: self.grid.candidate_digits(position.0, position.1),
            next: 0
        };

        match frame.next_candidate() {
            Some(digit) => {
                self.stack.push(frame);
                self.place(position, digit)
            },
            // A cell without candidates fails without any mutation of its
            // own, so the step's single mutation is the undo of the most
            // recent placement.
            None => self.retreat()
        }
    }

    fn retry(&mut self) -> StepEvent {
        match self.stack.last_mut() {
            None => StepEvent::Exhausted,
            Some(frame) => {
                let position = frame.position;

                match frame.next_candidate() {
                    Some(digit) => {
                        self.phase = Phase::Advance;
                        self.place(position, digit)
                    },
                    None => self.retreat()
                }
            }
        }
    }

    fn retreat(&mut self) -> StepEvent {
        match self.stack.last() {
            None => StepEvent::Exhausted,
            Some(frame) => {
                let (row, col) = frame.position;
                self.grid.write_digit(row, col, 0);

                if frame.has_remaining() {
                    self.phase = Phase::Retry;
                }
                else {
                    self.stack.pop();
                    self.phase = Phase::Retreat;
                }

                StepEvent::Undone {
                    row,
                    col
                }
            }
        }
    }
}
