use thiserror::Error;

/// The other end of a channel or session was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the other side of the channel is gone")]
pub struct Disconnected;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("an iterative array needs at least one worker")]
    EmptyChain,

    #[error("cannot compute the factorial of a negative number")]
    Negative,

    #[error("{requested} is too big for this array, choose a number up to {depth}")]
    DepthExceeded { requested: u128, depth: usize },

    /// A previous call was abandoned before its reply arrived, so the chain is
    /// still busy with it.
    #[error("a previous computation was cancelled mid-call")]
    Poisoned,

    #[error("worker chain disconnected")]
    Disconnected(#[from] Disconnected),
}
