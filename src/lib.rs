//! Recursion without a call stack. An *iterative array*, in the sense of Hoare's
//! Communicating Sequential Processes, is a line of processes where every process
//! talks only to its two neighbours. Arranged that way, the processes can simulate
//! a recursive function: a request travels down the line, one process per level of
//! recursion, and the result travels back up, each process finishing its own
//! "stack frame" on the way.
//!
//! This crate computes factorials that way:
//!
//! - Every **slot** of the array is a pair of synchronous, unbuffered
//!   [rendezvous] channels, one carrying requests down and one carrying replies
//!   up. A send completes only once the other side has received the value.
//! - Every **worker** is a task wired to two slots: the one above it (where it
//!   receives requests and replies to them) and the one below it (where it
//!   delegates smaller requests).
//! - Slot 0 is the only slot visible from outside. [`ChannelArray::compute`]
//!   sends a request into it and waits for the reply.
//!
//! There are no locks, no atomics and no shared memory in the chain. Message
//! passing is the only synchronization.
//!
//! ```
//! use iterarray::ChannelArray;
//!
//! # #[cfg(feature = "runtime-tokio")]
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), iterarray::Error> {
//! let mut array = ChannelArray::<u64>::spawn(10).await?;
//!
//! assert_eq!(array.compute(5).await?, 120);
//! assert_eq!(array.compute(10).await?, 3_628_800);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "runtime-tokio"))]
//! # fn main() {}
//! ```
//!
//! # Depth
//!
//! The number of workers is fixed when the array is built. A request for `n!`
//! needs `n` workers, so [`compute`](ChannelArray::compute) rejects anything
//! larger than the depth before it reaches the chain. The chain itself never
//! checks: a request that runs past the last worker would park forever.
//!
//! ```
//! use iterarray::{ChannelArray, Error};
//!
//! # #[cfg(feature = "runtime-tokio")]
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Error> {
//! let mut array = ChannelArray::<i64>::spawn(4).await?;
//!
//! assert_eq!(
//!     array.compute(5).await,
//!     Err(Error::DepthExceeded { requested: 5, depth: 4 }),
//! );
//! assert_eq!(array.compute(-1).await, Err(Error::Negative));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "runtime-tokio"))]
//! # fn main() {}
//! ```
//!
//! # Sessions
//!
//! Workers report their lifecycle to the array over one-shot sessions from the
//! [exchange] module. A session handle can only be created together with its
//! dual, in two independent scopes. This moment of creation is called *forking*,
//! and [runtimes] provides forking on top of Tokio or any
//! [`Spawn`](futures::task::Spawn) executor.
//!
//! ```
//! use iterarray::exchange::{Recv, Send};
//!
//! # #[cfg(feature = "runtime-tokio")]
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use iterarray::runtimes::tokio::fork;
//!
//! let receiver: Recv<i64> = fork(|sender: Send<i64>| async move {
//!     sender.send1(7);
//! });
//! assert_eq!(receiver.recv1().await, Ok(7));
//! # }
//! # #[cfg(not(feature = "runtime-tokio"))]
//! # fn main() {}
//! ```
//!
//! # Overflow
//!
//! Products are computed with wrapping multiplication in the [`Payload`] type.
//! `20!` is the largest factorial an `i64` holds; `21!` wraps around silently.
//! Pick `u128` for headroom up to `34!`.

pub mod array;
pub mod error;
pub mod exchange;
pub mod payload;
pub mod rendezvous;
pub mod runtimes;
pub mod slot;
mod worker;

pub use array::{ChannelArray, Started, Stopped};
pub use error::{Disconnected, Error};
pub use payload::{Payload, Step};

pub trait Session: Send + 'static {
    type Dual: Session<Dual = Self>;

    #[must_use]
    fn fork_sync(f: impl FnOnce(Self::Dual)) -> Self;
}

pub type Dual<S> = <S as Session>::Dual;

impl Session for () {
    type Dual = ();
    fn fork_sync(f: impl FnOnce(Self::Dual)) -> Self {
        f(())
    }
}
