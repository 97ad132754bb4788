//! The iterative array itself: `depth` workers wired into a line by `depth + 1`
//! slots.
//!
//! ```text
//!  compute ──slot 0── worker 1 ──slot 1── worker 2 ── … ── worker N ──slot N── (tail)
//! ```
//!
//! Worker `i` owns the callee end of slot `i - 1` and the caller end of slot `i`.
//! Slot 0's caller end is kept by the [`ChannelArray`], and so is slot N's callee
//! end, which nobody ever answers on.
//!
//! A worker that receives `0` or `1` replies `1`. A worker that receives `n > 1`
//! calls the worker below with `n - 1` and replies with that result times `n`.
//! The downward relay visits workers `1, 2, …, n` and the upward relay visits
//! them in reverse, like pushing and popping a call stack.

use futures::future;

use crate::{
    exchange::Recv,
    runtimes::Fork,
    slot::{slot, Callee, Caller},
    worker::Worker,
    Dual, Error, Payload,
};

/// Sent by a worker right before it first waits for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Started {
    pub index: usize,
}

/// Sent by a worker once its upstream slot is disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopped {
    pub index: usize,
    /// Requests this worker has received.
    pub served: u64,
}

pub(crate) type Lifecycle = Recv<Started, Recv<Stopped>>;

pub struct ChannelArray<T> {
    entry: Caller<T>,
    tail: Callee<T>,
    depth: usize,
    stopped: Vec<Recv<Stopped>>,
    in_flight: bool,
}

impl<T: Payload> ChannelArray<T> {
    /// Builds an array of `depth` workers on the ambient Tokio runtime.
    #[cfg(feature = "runtime-tokio")]
    pub async fn spawn(depth: usize) -> Result<Self, Error> {
        Self::spawn_on(&crate::runtimes::tokio::Tokio, depth).await
    }

    /// Builds an array of `depth` workers on `runtime`.
    ///
    /// Resolves once every worker is waiting on its upstream slot.
    pub async fn spawn_on(runtime: &impl Fork, depth: usize) -> Result<Self, Error> {
        if depth == 0 {
            return Err(Error::EmptyChain);
        }

        let (entry, mut upstream) = slot();
        let mut lifecycles = Vec::with_capacity(depth);
        for index in 1..=depth {
            let (downstream, below) = slot();
            let worker = Worker {
                index,
                upstream,
                downstream,
            };
            let lifecycle: Lifecycle =
                runtime.fork(|report: Dual<Lifecycle>| worker.run(report));
            lifecycles.push(lifecycle);
            upstream = below;
        }

        let stopped = future::try_join_all(lifecycles.into_iter().map(Recv::recv))
            .await?
            .into_iter()
            .map(|(Started { index }, stopped)| {
                tracing::trace!(task = index, "worker listening");
                stopped
            })
            .collect();

        tracing::info!(depth, "iterative array ready");
        Ok(Self {
            entry,
            tail: upstream,
            depth,
            stopped,
            in_flight: false,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of workers spawned for this array.
    pub fn workers(&self) -> usize {
        self.stopped.len()
    }

    /// Computes `n!` by sending `n` into slot 0 and waiting for the reply.
    ///
    /// `n` must lie in `0..=depth`; anything else is rejected here and never
    /// reaches the chain. The product wraps around at the width of `T`.
    ///
    /// Dropping the returned future before it resolves leaves the chain busy
    /// with the abandoned call, and every later call fails with
    /// [`Error::Poisoned`].
    pub async fn compute(&mut self, n: T) -> Result<T, Error> {
        if self.in_flight {
            return Err(Error::Poisoned);
        }
        match n.magnitude() {
            None => return Err(Error::Negative),
            Some(requested) if requested > self.depth as u128 => {
                return Err(Error::DepthExceeded {
                    requested,
                    depth: self.depth,
                })
            }
            Some(_) => {}
        }

        self.in_flight = true;
        let reply = self.entry.call(n).await;
        self.in_flight = false;
        let product = reply?;

        tracing::debug!(%n, %product, "computed");
        Ok(product)
    }

    /// Disconnects slot 0 and waits for every worker to stop, in order.
    pub async fn shutdown(self) -> Result<Vec<Stopped>, Error> {
        let ChannelArray {
            entry,
            tail,
            stopped,
            ..
        } = self;
        drop(entry);
        drop(tail);

        let stopped = future::try_join_all(stopped.into_iter().map(Recv::recv1)).await?;
        tracing::info!(workers = stopped.len(), "iterative array shut down");
        Ok(stopped)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::Disconnected;

    #[test]
    fn broken_chain_keeps_reporting_disconnected() {
        let (entry, first) = slot::<u64>();
        let (_, tail) = slot();
        drop(first);
        let mut array = ChannelArray {
            entry,
            tail,
            depth: 3,
            stopped: Vec::new(),
            in_flight: false,
        };

        block_on(async {
            assert_eq!(array.compute(2).await, Err(Error::Disconnected(Disconnected)));
            assert_eq!(array.compute(3).await, Err(Error::Disconnected(Disconnected)));
        });
    }
}
