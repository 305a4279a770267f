//! Integration tests for the Spindle task-execution runtime.

#[cfg(test)]
mod integration_tests {
    use spindle::{ExecutorService, ExecutorServiceExt};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Every submitted task runs exactly once, under either policy.
    fn exactly_once(pool: &dyn ExecutorService, tasks: usize) {
        let runs: Arc<Vec<AtomicUsize>> =
            Arc::new((0..tasks).map(|_| AtomicUsize::new(0)).collect());

        for i in 0..tasks {
            let runs = runs.clone();
            pool.submit(Box::new(move || {
                runs[i].fetch_add(1, Ordering::Relaxed);
            }));
        }
        pool.shutdown();

        for (i, count) in runs.iter().enumerate() {
            assert_eq!(count.load(Ordering::Relaxed), 1, "task {i} run count");
        }
    }

    #[test]
    fn work_stealing_runs_every_task_exactly_once() {
        let pool = spindle::work_stealing(4, 16).unwrap();
        exactly_once(&pool, 1000);
        assert_eq!(pool.metrics().executed, 1000);
    }

    #[test]
    fn work_balancing_runs_every_task_exactly_once() {
        let pool = spindle::work_balancing(4, 16, 4).unwrap();
        exactly_once(&pool, 1000);
        assert_eq!(pool.metrics().executed, 1000);
    }

    /// Capacity 4, balance threshold 10, 40 increment tasks distributed
    /// round-robin (10 per deque): the global counter lands on exactly 40.
    #[test]
    fn forty_increments_land_exactly() {
        let pool = spindle::work_balancing(4, 16, 10).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..40 {
            let counter = counter.clone();
            pool.submit_fn(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
        pool.shutdown();

        assert_eq!(counter.load(Ordering::Relaxed), 40);
    }

    /// Shutdown requested before any task has finished still returns only
    /// after every already-submitted task has run.
    #[test]
    fn early_shutdown_waits_for_the_drain() {
        let pool = spindle::work_stealing(2, 16).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..20 {
            let counter = counter.clone();
            pool.submit_fn(move || {
                std::thread::sleep(Duration::from_millis(2));
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
        pool.shutdown();

        assert_eq!(counter.load(Ordering::Relaxed), 20);
    }

    /// Task bodies never overlap: the pool-wide execution lock serializes
    /// them even though scheduling is concurrent.
    fn bodies_are_serialized(pool: &dyn ExecutorService) {
        let in_body = Arc::new(AtomicBool::new(false));
        let overlaps = Arc::new(AtomicUsize::new(0));

        for _ in 0..500 {
            let in_body = in_body.clone();
            let overlaps = overlaps.clone();
            pool.submit(Box::new(move || {
                if in_body.swap(true, Ordering::SeqCst) {
                    overlaps.fetch_add(1, Ordering::SeqCst);
                }
                std::hint::spin_loop();
                in_body.store(false, Ordering::SeqCst);
            }));
        }
        pool.shutdown();

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn work_stealing_serializes_task_bodies() {
        let pool = spindle::work_stealing(4, 16).unwrap();
        bodies_are_serialized(&pool);
    }

    #[test]
    fn work_balancing_serializes_task_bodies() {
        let pool = spindle::work_balancing(4, 16, 2).unwrap();
        bodies_are_serialized(&pool);
    }

    /// With a skewed load the stealing pool's peers pick up the slack.
    #[test]
    fn stealing_liveness_under_skew() {
        let pool = spindle::work_stealing(4, 16).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        // Slots 0 mod 4 land on worker 0; making them slow keeps deque 0
        // populated while the other workers idle and steal.
        for i in 0..200 {
            let counter = counter.clone();
            pool.submit_fn(move || {
                if i % 4 == 0 {
                    std::thread::sleep(Duration::from_millis(1));
                }
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
        pool.shutdown();

        assert_eq!(counter.load(Ordering::Relaxed), 200);
        assert!(pool.metrics().steals > 0, "expected at least one steal");
    }

    /// Under sustained load the balancing pool performs rebalancing passes.
    #[test]
    fn balancing_passes_occur_under_load() {
        let pool = spindle::work_balancing(4, 16, 2).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..2000 {
            let counter = counter.clone();
            pool.submit_fn(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
        pool.shutdown();

        assert_eq!(counter.load(Ordering::Relaxed), 2000);
        assert!(
            pool.metrics().balance_passes > 0,
            "expected at least one balancing pass"
        );
    }

    /// A panicking task is contained: the rest of the batch still runs and
    /// shutdown still terminates.
    #[test]
    fn panicking_task_does_not_wedge_shutdown() {
        let pool = spindle::work_stealing(2, 16).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        pool.submit_fn(|| panic!("bad task"));
        for _ in 0..50 {
            let counter = counter.clone();
            pool.submit_fn(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
        pool.shutdown();

        assert_eq!(counter.load(Ordering::Relaxed), 50);
        assert_eq!(pool.metrics().executed, 51);
    }

    /// Both policies are usable behind the trait object.
    #[test]
    fn policies_interchange_behind_the_contract() {
        let pools: Vec<Box<dyn ExecutorService>> = vec![
            Box::new(spindle::work_stealing(2, 16).unwrap()),
            Box::new(spindle::work_balancing(2, 16, 4).unwrap()),
        ];

        for pool in &pools {
            let counter = Arc::new(AtomicUsize::new(0));
            for _ in 0..100 {
                let counter = counter.clone();
                pool.submit(Box::new(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                }));
            }
            pool.shutdown();
            assert_eq!(counter.load(Ordering::Relaxed), 100);
        }
    }
}
