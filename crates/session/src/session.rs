use crate::selection::{Selection, SelectionError};
use glam::IVec2;
use tilecraft_common::{BlockId, CellCoord, WorldConfig};
use tilecraft_input::{Action, EventSource, classify};
use tilecraft_kernel::{GridError, PlacementRejection, PlayerState, WorldGrid, validate_placement};

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Why an action was refused. Refusals never change session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Placement(#[from] PlacementRejection),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// What applying one action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Stopped,
    Selected(BlockId),
    Moved { from: IVec2, to: IVec2 },
    Placed {
        cell: CellCoord,
        block: BlockId,
        previous: BlockId,
    },
    Rejected(Rejection),
}

/// Errors from constructing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("grid is {actual}x{actual}, configuration expects {expected}x{expected}")]
    GridSizeMismatch { expected: u32, actual: u32 },
}

/// One run of the game: grid + player + selection.
///
/// The session is the only owner of this state. Renderers read it through the
/// accessors; only `apply` (and `pump`, which calls it) mutates it.
#[derive(Debug, Clone)]
pub struct Session {
    config: WorldConfig,
    grid: WorldGrid,
    player: PlayerState,
    selection: Selection,
    state: LoopState,
}

impl Session {
    /// A session over an empty grid.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            grid: WorldGrid::new(config.grid_size()),
            player: PlayerState::spawn(&config),
            selection: Selection::default(),
            state: LoopState::Running,
            config,
        }
    }

    /// A session over a previously loaded grid.
    pub fn with_grid(config: WorldConfig, grid: WorldGrid) -> Result<Self, SessionError> {
        if grid.size() != config.grid_size() {
            return Err(SessionError::GridSizeMismatch {
                expected: config.grid_size(),
                actual: grid.size(),
            });
        }
        Ok(Self {
            grid,
            ..Self::new(config)
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The block that the next placement will write.
    pub fn selection(&self) -> BlockId {
        self.selection.block()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// End the session and hand back the grid for saving.
    pub fn into_grid(self) -> WorldGrid {
        self.grid
    }

    /// Apply a single action.
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        let outcome = match action {
            Action::Quit => {
                self.state = LoopState::Stopped;
                ActionOutcome::Stopped
            }
            Action::SelectBlock(block) => match self.selection.set(block) {
                Ok(()) => ActionOutcome::Selected(block),
                Err(e) => ActionOutcome::Rejected(e.into()),
            },
            Action::Move(direction) => {
                let from = self.player.position();
                self.player.step(direction);
                ActionOutcome::Moved {
                    from,
                    to: self.player.position(),
                }
            }
            Action::Place(pointer) => match self.place(pointer) {
                Ok(outcome) => outcome,
                Err(rejection) => ActionOutcome::Rejected(rejection),
            },
        };
        match &outcome {
            ActionOutcome::Rejected(reason) => {
                tracing::debug!(?action, "rejected: {reason}");
            }
            other => tracing::debug!(?action, outcome = ?other, "applied"),
        }
        outcome
    }

    /// Run one frame's worth of input: drain the source, classify each event
    /// and apply the resulting actions in arrival order.
    ///
    /// The whole batch is applied even if it contains a quit; the loop state
    /// is returned once the batch is done.
    pub fn pump(&mut self, source: &mut impl EventSource) -> LoopState {
        for event in source.poll() {
            if let Some(action) = classify(&event) {
                self.apply(action);
            }
        }
        self.state
    }

    fn place(&mut self, pointer: IVec2) -> Result<ActionOutcome, Rejection> {
        let cell = CellCoord::from_pixel(pointer, self.config.cell_size());
        validate_placement(
            self.player.cell(),
            cell,
            self.grid.size(),
            self.config.reach(),
        )?;
        let block = self.selection.block();
        let previous = self.grid.set(cell, block)?;
        Ok(ActionOutcome::Placed {
            cell,
            block,
            previous,
        })
    }
}
