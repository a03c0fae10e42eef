//! Concurrency Tests
//!
//! Read-modify-write cycles on the same collection must not lose updates
//! when issued from many threads at once.

use docstore::{Config, Database};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 25;

fn open_database() -> (TempDir, Arc<Database>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::open(&Config::with_data_dir(temp_dir.path())).expect("Failed to open");
    (temp_dir, Arc::new(db))
}

fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn test_concurrent_adds_are_not_lost() {
    let (_dir, db) = open_database();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let id = format!("{}-{}", t, i);
                    db.store()
                        .add_document("cars", &id, data(json!({"thread": t, "seq": i})))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let documents = db.store().get_collection("cars").unwrap();
    assert_eq!(documents.len(), THREADS * PER_THREAD);

    let ids: HashSet<&str> = documents.iter().map(|doc| doc.id()).collect();
    assert_eq!(ids.len(), THREADS * PER_THREAD);
}

#[test]
fn test_concurrent_updates_to_distinct_fields_are_merged() {
    let (_dir, db) = open_database();
    db.store().add_document("counters", "c", Map::new()).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                let field = format!("f{}", t);
                let mut update = Map::new();
                update.insert(field, json!(t));
                assert!(db
                    .store()
                    .update_document("counters", "c", update)
                    .unwrap()
                    .is_applied());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let doc = db.store().get_document("counters", "c").unwrap().unwrap();
    for t in 0..THREADS {
        assert_eq!(doc.get(&format!("f{}", t)), Some(&json!(t)));
    }
}

#[test]
fn test_collections_are_independent() {
    let (_dir, db) = open_database();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                let collection = format!("c{}", t);
                for i in 0..PER_THREAD {
                    db.store()
                        .add_document(&collection, &i.to_string(), Map::new())
                        .unwrap();
                }
                db.index()
                    .add_index(&collection, "n", "0", &json!(t))
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for t in 0..THREADS {
        let collection = format!("c{}", t);
        assert_eq!(db.store().get_collection(&collection).unwrap().len(), PER_THREAD);
        assert_eq!(
            db.index().query_index(&collection, "n", &json!(t)).unwrap(),
            Some("0".to_string())
        );
    }
}
