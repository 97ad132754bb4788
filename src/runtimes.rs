//! Forking sessions onto an executor. [`Session::fork_sync`] runs its closure
//! in place; these helpers spawn the dual's future instead, so the two sides run
//! concurrently.

use std::marker;

use futures::Future;

use crate::Session;

/// An executor that sessions can be forked onto.
pub trait Fork {
    fn fork<S: Session, F>(&self, f: impl FnOnce(S::Dual) -> F) -> S
    where
        F: Future<Output = ()> + marker::Send + 'static;
}

#[cfg(feature = "runtime-tokio")]
pub mod tokio {
    use std::marker;

    use futures::Future;

    use super::Fork;
    use crate::Session;

    pub fn fork<S: Session, F>(f: impl FnOnce(S::Dual) -> F) -> S
    where
        F: Future<Output = ()> + marker::Send + 'static,
    {
        S::fork_sync(|session| drop(::tokio::spawn(f(session))))
    }

    /// Forks onto the ambient Tokio runtime.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Tokio;

    impl Fork for Tokio {
        fn fork<S: Session, F>(&self, f: impl FnOnce(S::Dual) -> F) -> S
        where
            F: Future<Output = ()> + marker::Send + 'static,
        {
            fork(f)
        }
    }
}

pub mod spawn {
    use std::marker;

    use futures::{task::SpawnExt, Future};

    use super::Fork;
    use crate::Session;

    /// Forks onto any [`futures::task::Spawn`] executor, such as a
    /// `futures::executor::ThreadPool`.
    #[derive(Debug, Clone)]
    pub struct Spawner<Sp>(pub Sp);

    impl<Sp: futures::task::Spawn> Fork for Spawner<Sp> {
        fn fork<S: Session, F>(&self, f: impl FnOnce(S::Dual) -> F) -> S
        where
            F: Future<Output = ()> + marker::Send + 'static,
        {
            S::fork_sync(|session| {
                if let Err(err) = self.0.spawn(f(session)) {
                    // the dual is dropped with the future, the other side sees Disconnected
                    tracing::error!(%err, "failed to spawn session");
                }
            })
        }
    }
}
