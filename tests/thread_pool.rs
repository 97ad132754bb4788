use futures::executor::{block_on, ThreadPool};
use iterarray::{runtimes::spawn::Spawner, ChannelArray, Error};

#[test]
fn runs_on_a_futures_thread_pool() -> Result<(), Error> {
    let pool = ThreadPool::builder().pool_size(3).create().unwrap();
    let runtime = Spawner(pool);

    block_on(async {
        let mut array = ChannelArray::<i64>::spawn_on(&runtime, 12).await?;
        assert_eq!(array.workers(), 12);
        assert_eq!(array.compute(12).await?, 479_001_600);
        assert_eq!(array.compute(0).await?, 1);

        let stopped = array.shutdown().await?;
        assert!(stopped.iter().all(|s| s.served >= 1));
        Ok(())
    })
}
