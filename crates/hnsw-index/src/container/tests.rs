//! Container tests: serialization under concurrency, reset, blocking use.

use std::sync::Arc;

use super::*;
use crate::error::HnswError;

fn container(dimension: usize, max_elements: usize) -> HnswContainer {
    HnswContainer::create(IndexConfig::new(dimension, max_elements)).expect("container creation")
}

fn point(i: i32) -> Vec<f32> {
    vec![i as f32, (i * i) as f32 * 0.01, 1.0]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_yield_exact_count() {
    let tasks = 64;
    let shared = Arc::new(container(3, 128));

    let handles: Vec<_> = (0..tasks)
        .map(|id| {
            let shared = Arc::clone(&shared);
            tokio::spawn(async move {
                shared
                    .perform(move |index| index.add_point(&point(id), id, Some(format!("task-{}", id))))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("task join").expect("add_point");
    }

    let (count, live) = shared
        .perform(|index| (index.element_count(), index.live_count()))
        .await;
    assert_eq!(count.unwrap(), tasks as usize);
    assert_eq!(live.unwrap(), tasks as usize);

    for id in 0..tasks {
        let (hits, meta) = shared
            .perform(move |index| {
                let hits = index.search_knn(&point(id), 1);
                (hits, index.get_metadata(id).map(str::to_owned))
            })
            .await;
        assert_eq!(hits.unwrap()[0].id, id);
        assert_eq!(meta, Some(format!("task-{}", id)));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_adds_admit_one() {
    let shared = Arc::new(container(3, 16));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = Arc::clone(&shared);
            tokio::spawn(async move {
                shared
                    .perform(|index| index.add_point(&point(1), 1, None))
                    .await
            })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        match handle.await.expect("task join") {
            Ok(()) => ok += 1,
            Err(e) => assert_eq!(e, HnswError::PointAlreadyExists { id: 1 }),
        }
    }
    assert_eq!(ok, 1);
}

#[tokio::test]
async fn test_reset_discards_points_and_metadata() {
    let shared = container(3, 10);
    shared
        .perform(|index| {
            index.add_point(&point(1), 1, Some("gone".into()))?;
            index.resize_index(20)?;
            index.set_metadata(2, "also gone");
            Ok::<_, HnswError>(())
        })
        .await
        .unwrap();

    let before = shared.perform(|index| index.element_count()).await.unwrap();
    println!("BEFORE: reset with {} points", before);
    shared.reset().await.unwrap();

    shared
        .perform(|index| {
            println!("AFTER: {} points", index.element_count().unwrap());
            assert!(index.is_initialized());
            assert_eq!(index.element_count().unwrap(), 0);
            assert!(index.metadata().is_empty());
            // Built from the configuration current at reset time.
            assert_eq!(index.dimension().unwrap(), 3);
            assert_eq!(index.max_elements().unwrap(), 20);
        })
        .await;
}

#[tokio::test]
async fn test_reset_restores_released_index() {
    let shared = container(2, 4);
    shared.perform(|index| index.release()).await;
    assert_eq!(
        shared.perform(|index| index.element_count()).await,
        Err(HnswError::NotInitialized)
    );

    shared.reset().await.unwrap();
    assert_eq!(shared.perform(|index| index.element_count()).await, Ok(0));
}

#[test]
fn test_blocking_use_from_threads() {
    let shared = container(3, 64);

    std::thread::scope(|scope| {
        for t in 0..4 {
            let shared = &shared;
            scope.spawn(move || {
                for i in 0..8 {
                    let id = t * 8 + i;
                    shared
                        .perform_blocking(|index| index.add_point(&point(id), id, None))
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(
        shared.perform_blocking(|index| index.element_count()),
        Ok(32)
    );

    shared.reset_blocking().unwrap();
    assert_eq!(shared.perform_blocking(|index| index.element_count()), Ok(0));
}

#[test]
fn test_new_and_into_inner() {
    let index = HnswIndex::new(2, 4).unwrap();
    let shared = HnswContainer::new(index);
    shared
        .perform_blocking(|index| index.add_point(&[1.0, 0.0], 3, None))
        .unwrap();

    let index = shared.into_inner();
    assert_eq!(index.element_count().unwrap(), 1);
}

#[test]
fn test_container_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HnswContainer>();
}
