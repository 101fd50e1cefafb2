// Draft engine: player pool, roster slots, turn order, auto picks, state machine.

pub mod auto_pick;
pub mod engine;
pub mod pick;
pub mod player;
pub mod roster;
pub mod state;
pub mod turn;

use thiserror::Error;

use state::DraftPhase;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// Malformed team count, seat, or roster template. Surfaced before any pick.
    #[error("invalid draft configuration for `{field}`: {message}")]
    InvalidConfig { field: String, message: String },

    /// No player in the pool carries the requested rank.
    #[error("no player with rank {rank}")]
    UnknownPlayer { rank: u32 },

    /// The requested player has already been drafted.
    #[error("player with rank {rank} has already been drafted")]
    AlreadyDrafted { rank: u32 },

    /// The requested player only fits positions the team has already filled.
    #[error("player with rank {rank} does not fit any open roster need")]
    PositionNotNeeded { rank: u32 },

    /// An auto pick found no eligible candidate.
    #[error("no eligible players left for pick {pick}")]
    PoolExhausted { pick: u32 },

    /// A mutation was attempted on a player whose state forbids it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The operation is not allowed in the engine's current phase.
    #[error("operation requires phase {expected:?}, draft is {actual:?}")]
    WrongPhase {
        expected: DraftPhase,
        actual: DraftPhase,
    },
}
