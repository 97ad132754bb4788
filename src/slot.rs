//! A slot joins two neighbours in the array. The upper neighbour holds the
//! [`Caller`] end and the lower one holds the [`Callee`] end.
//!
//! Requests only ever travel down and replies only ever travel up, each over
//! its own [rendezvous](crate::rendezvous) channel. Per call a slot carries
//! exactly one request followed by exactly one reply. On the callee side this
//! order is enforced by types: [`Callee::accept`] hands out a [`Pending`] call,
//! and only replying to it gives the [`Callee`] back.
//!
//! ```
//! use iterarray::slot::slot;
//!
//! # futures::executor::block_on(async {
//! let (mut caller, callee) = slot::<u32>();
//!
//! let serve = async {
//!     let (n, pending) = callee.accept().await?;
//!     pending.reply(n * 2).await
//! };
//! let (reply, callee) = futures::join!(caller.call(21), serve);
//!
//! assert_eq!(reply, Ok(42));
//! assert!(callee.is_ok());
//! # });
//! ```

use crate::{
    rendezvous::{self, Receiver, Sender},
    Disconnected,
};

pub struct Caller<T> {
    requests: Sender<T>,
    replies: Receiver<T>,
}

pub struct Callee<T> {
    requests: Receiver<T>,
    replies: Sender<T>,
}

/// A request that has been accepted but not yet answered.
#[must_use]
pub struct Pending<T> {
    callee: Callee<T>,
}

pub fn slot<T>() -> (Caller<T>, Callee<T>) {
    let (request_tx, request_rx) = rendezvous::channel();
    let (reply_tx, reply_rx) = rendezvous::channel();
    (
        Caller {
            requests: request_tx,
            replies: reply_rx,
        },
        Callee {
            requests: request_rx,
            replies: reply_tx,
        },
    )
}

impl<T> Caller<T> {
    /// Hands `request` to the callee and waits for its reply.
    pub async fn call(&mut self, request: T) -> Result<T, Disconnected> {
        self.requests.send(request).await?;
        self.replies.recv().await
    }
}

impl<T> Callee<T> {
    pub async fn accept(mut self) -> Result<(T, Pending<T>), Disconnected> {
        let request = self.requests.recv().await?;
        Ok((request, Pending { callee: self }))
    }
}

impl<T> Pending<T> {
    pub async fn reply(mut self, value: T) -> Result<Callee<T>, Disconnected> {
        self.callee.replies.send(value).await?;
        Ok(self.callee)
    }

    /// Drops the call without answering. The caller keeps waiting.
    pub fn withhold(self) -> Callee<T> {
        self.callee
    }
}
