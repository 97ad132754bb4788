//! One-shot sessions: exchange a single value between two counterparts, then
//! proceed according to a continuation session. The two sides, receiving and
//! sending, are [`Recv`] and [`Send`] respectively.
//!
//! A [`Recv<T, S>`] in one task cooperates with a [`Send<T, Dual<S>>`](super::Dual)
//! in another. After the `T` changes hands, both obtain handles for the
//! continuation.
//!
//! Workers use these to tell their array when they are listening and, later,
//! when they have stopped:
//!
//! ```
//! use iterarray::exchange::{Recv, Send};
//!
//! # #[cfg(feature = "runtime-tokio")]
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), iterarray::Disconnected> {
//! use iterarray::runtimes::tokio::fork;
//!
//! let lifecycle: Recv<&str, Recv<u64>> = fork(|report: Send<&str, Send<u64>>| async move {
//!     let report = report.send("listening");
//!     report.send1(3);
//! });
//! let (state, rest) = lifecycle.recv().await?;
//! assert_eq!(state, "listening");
//! assert_eq!(rest.recv1().await?, 3);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "runtime-tokio"))]
//! # fn main() {}
//! ```
//!
//! # Blocking and `.await`
//!
//! Sending never blocks. A value sent after the receiving side has been dropped
//! is discarded, along with the continuation. Receiving waits until the value
//! arrives, or fails with [`Disconnected`] once the sending side is gone.

use std::marker;

use futures::channel::oneshot;

use super::{Disconnected, Session};

#[must_use]
pub struct Recv<T, S: Session = ()> {
    rx: oneshot::Receiver<(T, S)>,
}

#[must_use]
pub struct Send<T, S: Session = ()> {
    tx: oneshot::Sender<(T, S::Dual)>,
}

impl<T, S: Session> Session for Recv<T, S>
where
    T: marker::Send + 'static,
{
    type Dual = Send<T, S::Dual>;

    fn fork_sync(f: impl FnOnce(Self::Dual)) -> Self {
        let (recv, send) = endpoints();
        f(send);
        recv
    }
}

impl<T, S: Session> Session for Send<T, S>
where
    T: marker::Send + 'static,
{
    type Dual = Recv<T, S::Dual>;

    fn fork_sync(f: impl FnOnce(Self::Dual)) -> Self {
        let (recv, send) = endpoints();
        f(recv);
        send
    }
}

fn endpoints<T, S: Session>() -> (Recv<T, S>, Send<T, S::Dual>)
where
    T: marker::Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    (Recv { rx }, Send { tx })
}

impl<T, S: Session> Recv<T, S>
where
    T: marker::Send + 'static,
{
    pub async fn recv(self) -> Result<(T, S), Disconnected> {
        self.rx.await.map_err(|oneshot::Canceled| Disconnected)
    }
}

impl<T> Recv<T, ()>
where
    T: marker::Send + 'static,
{
    pub async fn recv1(self) -> Result<T, Disconnected> {
        Ok(self.recv().await?.0)
    }
}

impl<T, S: Session> Send<T, S>
where
    T: marker::Send + 'static,
{
    #[must_use]
    pub fn send(self, value: T) -> S {
        S::fork_sync(|dual| {
            let _ = self.tx.send((value, dual));
        })
    }
}

impl<T> Send<T, ()>
where
    T: marker::Send + 'static,
{
    pub fn send1(self, value: T) {
        self.send(value)
    }
}
