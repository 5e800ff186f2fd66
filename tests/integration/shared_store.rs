use dirtree::concurrency::SharedTreeStore;
use dirtree::{TreeEvent, TreeStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn observers_fire_once_per_committed_mutation_across_threads() {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let mut store = TreeStore::new();
    store.subscribe(Box::new(move |event: &TreeEvent| {
        if matches!(event, TreeEvent::Added { .. }) {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    }));
    let shared = SharedTreeStore::new(store);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    shared
                        .write(|s| s.add_root_node(&format!("{}-{}", worker, i)))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(count.load(Ordering::SeqCst), 40);
    assert_eq!(shared.read(|s| s.get_root_nodes().len()), 40);
}
