//! Synchronous, unbuffered, point-to-point channels.
//!
//! A [`Sender::send`] resolves only after the matching [`Receiver::recv`] has
//! taken the value, so a sender never gets ahead of its receiver and at most one
//! value is ever in flight.
//!
//! Under the hood every value travels with a one-shot acknowledgement that the
//! receiver fires as soon as it takes the value.

use futures::{
    channel::{mpsc, oneshot},
    SinkExt, StreamExt,
};

use crate::Disconnected;

type Handoff<T> = (T, oneshot::Sender<()>);

pub struct Sender<T> {
    tx: mpsc::Sender<Handoff<T>>,
}

pub struct Receiver<T> {
    rx: mpsc::Receiver<Handoff<T>>,
}

pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = mpsc::channel(0);
    (Sender { tx }, Receiver { rx })
}

impl<T> Sender<T> {
    /// Waits until the receiver has taken `value`.
    pub async fn send(&mut self, value: T) -> Result<(), Disconnected> {
        let (ack, acked) = oneshot::channel();
        self.tx
            .send((value, ack))
            .await
            .map_err(|_| Disconnected)?;
        acked.await.map_err(|oneshot::Canceled| Disconnected)
    }
}

impl<T> Receiver<T> {
    /// Waits for the next value. Fails once the sender is dropped.
    pub async fn recv(&mut self) -> Result<T, Disconnected> {
        let (value, ack) = self.rx.next().await.ok_or(Disconnected)?;
        let _ = ack.send(());
        Ok(value)
    }
}
