//! Integration tests for slots and the serving source under concurrency

#[cfg(test)]
mod tests {
    use dine_resources::*;
    use dine_types::{ResourceId, SlotTopology};
    use futures::future::join_all;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn each_serving_is_delivered_exactly_once() {
        const SERVINGS: u64 = 500;
        const TAKERS: usize = 16;

        let (producer, source) = serving_source(8);
        let producing = tokio::spawn(producer.produce(SERVINGS));

        let counted = Arc::new(AtomicU64::new(0));
        let takers = (0..TAKERS).map(|_| {
            let source = source.clone();
            let counted = Arc::clone(&counted);
            tokio::spawn(async move {
                while source.take_one().await == TakeOutcome::Served {
                    counted.fetch_add(1, Ordering::Relaxed);
                }
            })
        });

        for result in join_all(takers).await {
            result.unwrap();
        }
        assert_eq!(producing.await.unwrap(), SERVINGS);
        assert_eq!(counted.load(Ordering::Relaxed), SERVINGS);
        assert_eq!(source.served(), SERVINGS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn contended_slot_never_duplicates_its_resource() {
        const ROUNDS: usize = 200;

        let slot = Arc::new(Slot::new(SlotTopology::for_slot(0, 2)));
        slot.place(Resource::new(ResourceId(0))).unwrap();

        let contenders = (0..2).map(|_| {
            let slot = Arc::clone(&slot);
            tokio::spawn(async move {
                let mut grabs = 0u64;
                for _ in 0..ROUNDS {
                    let mut resource = slot.take().await.unwrap();
                    resource.record_grab();
                    grabs += 1;
                    // Only the holder can put it back, and the slot is empty.
                    assert!(!slot.is_occupied());
                    slot.place(resource).unwrap();
                    tokio::task::yield_now().await;
                }
                grabs
            })
        });

        let total: u64 = join_all(contenders)
            .await
            .into_iter()
            .map(Result::unwrap)
            .sum();

        let resource = slot.try_take().unwrap().unwrap();
        assert_eq!(resource.grab_count(), total);
        assert!(slot.try_take().unwrap().is_none());
    }
}
