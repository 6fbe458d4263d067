use railtalk::{resolve, Resolution, VocabularyStore};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

mod common;
use common::{default_store, GARBAGE};

#[test]
fn test_asr_flood_fuzz() {
    let store = default_store();

    for text in GARBAGE {
        assert_eq!(resolve(&store, text), Resolution::unrecognized());
    }

    // High-frequency valid commands; the resolver holds no state between calls
    let commands = ["тише", "осадить три", "отмена", "протянуть 7"];

    let start = Instant::now();
    for i in 0..1000 {
        let _ = resolve(&store, commands[i % commands.len()]);
    }
    println!("Resolved 1000 transcripts in {:?}", start.elapsed());

    let res = resolve(&store, "осадить три");
    assert_eq!((res.label, res.attribute), (4, 3));
}

#[test]
fn test_concurrent_upsert_and_resolve() {
    let store = Arc::new(VocabularyStore::default());

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    store.upsert_atomic_command(&format!("команда {} {}", w, i), 100 + i);
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..50 {
                    // Existing entries stay resolvable while the table grows
                    let res = resolve(&store, "подтверждение");
                    assert_eq!(res.label, 2);
                    let res = resolve(&store, "осадить пять");
                    assert_eq!(res.attribute, 5);
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().expect("Worker thread panicked");
    }

    assert_eq!(store.atomic_commands().len(), 21 + 4 * 50);
    assert_eq!(resolve(&store, "команда 3 49").label, 149);
}
