use crate::{
    array::{Lifecycle, Started, Stopped},
    slot::{Callee, Caller},
    Dual, Payload, Step,
};

/// Task `index` of the array: answers requests from slot `index - 1` and
/// delegates smaller ones to slot `index`.
pub(crate) struct Worker<T> {
    pub(crate) index: usize,
    pub(crate) upstream: Callee<T>,
    pub(crate) downstream: Caller<T>,
}

impl<T: Payload> Worker<T> {
    pub(crate) async fn run(self, report: Dual<Lifecycle>) {
        let Worker {
            index,
            mut upstream,
            mut downstream,
        } = self;

        let report = report.send(Started { index });
        let mut served = 0;

        loop {
            let Ok((n, pending)) = upstream.accept().await else {
                break;
            };
            tracing::debug!(task = index, %n, "request received");
            served += 1;

            let product = match n.step() {
                Step::Base => T::ONE,
                Step::Descend(m) => match downstream.call(m).await {
                    Ok(r) => r.product(n),
                    Err(_) => break,
                },
                Step::Undefined => {
                    tracing::warn!(task = index, %n, "no answer for a negative request");
                    upstream = pending.withhold();
                    continue;
                }
            };

            upstream = match pending.reply(product).await {
                Ok(callee) => callee,
                Err(_) => break,
            };
        }

        tracing::trace!(task = index, served, "worker stopped");
        report.send1(Stopped { index, served });
    }
}

#[cfg(test)]
mod tests {
    use futures::{
        executor::{LocalPool, LocalSpawner},
        poll,
    };

    use super::*;
    use crate::{runtimes::spawn::Spawner, runtimes::Fork, slot::slot};

    /// Wires `depth` workers the way `ChannelArray::spawn_on` does, returning
    /// slot 0's caller end and slot `depth`'s callee end.
    fn wire(
        runtime: &Spawner<LocalSpawner>,
        depth: usize,
    ) -> (Caller<i64>, Callee<i64>, Vec<Lifecycle>) {
        let (entry, mut upstream) = slot();
        let mut lifecycles = Vec::with_capacity(depth);
        for index in 1..=depth {
            let (downstream, below) = slot();
            let worker = Worker {
                index,
                upstream,
                downstream,
            };
            let lifecycle: Lifecycle = runtime.fork(|report: Dual<Lifecycle>| worker.run(report));
            lifecycles.push(lifecycle);
            upstream = below;
        }
        (entry, upstream, lifecycles)
    }

    fn served(pool: &mut LocalPool, lifecycles: Vec<Lifecycle>) -> Vec<u64> {
        pool.run_until(async {
            let mut served = Vec::new();
            for lifecycle in lifecycles {
                let (_, stopped) = lifecycle.recv().await.unwrap();
                served.push(stopped.recv1().await.unwrap().served);
            }
            served
        })
    }

    #[test]
    fn answers_in_range_requests() {
        let mut pool = LocalPool::new();
        let runtime = Spawner(pool.spawner());
        let (mut entry, tail, lifecycles) = wire(&runtime, 3);

        assert_eq!(pool.run_until(entry.call(3)), Ok(6));

        drop(entry);
        drop(tail);
        assert_eq!(served(&mut pool, lifecycles), [1, 1, 1]);
    }

    #[test]
    fn negative_request_gets_no_reply() {
        let mut pool = LocalPool::new();
        let runtime = Spawner(pool.spawner());
        let (mut entry, tail, lifecycles) = wire(&runtime, 3);

        let mut call = Box::pin(entry.call(-2));
        assert!(pool.run_until(async { poll!(&mut call) }).is_pending());
        pool.run_until_stalled();
        assert!(pool.run_until(async { poll!(&mut call) }).is_pending());
        pool.run_until_stalled();
        assert!(pool.run_until(async { poll!(&mut call) }).is_pending());

        // the worker went back to waiting, so dropping slot 0 stops the chain
        drop(call);
        drop(entry);
        assert_eq!(served(&mut pool, lifecycles), [1, 0, 0]);
        drop(tail);
    }

    #[test]
    fn request_beyond_depth_parks_at_the_tail() {
        let mut pool = LocalPool::new();
        let runtime = Spawner(pool.spawner());
        let (mut entry, tail, lifecycles) = wire(&runtime, 3);

        let mut call = Box::pin(entry.call(4));
        assert!(pool.run_until(async { poll!(&mut call) }).is_pending());
        pool.run_until_stalled();
        assert!(pool.run_until(async { poll!(&mut call) }).is_pending());
        pool.run_until_stalled();
        assert!(pool.run_until(async { poll!(&mut call) }).is_pending());

        // worker 3 is stuck handing 1 to the tail; releasing it unwinds the chain
        drop(call);
        drop(entry);
        drop(tail);
        assert_eq!(served(&mut pool, lifecycles), [1, 1, 1]);
    }
}
