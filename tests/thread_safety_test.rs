//! Tests for sharing cleaners across threads running in opposite directions.

use cleaners::{
    as_array, as_date, as_json, as_object, direction, uncleaner, Cleaner, Data, Direction, Shape,
};
use std::sync::{Arc, Barrier};
use std::thread;

const RAW: &str = r#"{"lastLogin":"2020-02-20T00:00:00.000Z","history":["2019-01-01T00:00:00.000Z"]}"#;

fn as_file() -> impl Cleaner<Output = cleaners::Object> + Clone {
    as_json(as_object(
        Shape::new()
            .field("lastLogin", as_date())
            .field("history", as_array(as_date())),
    ))
}

#[test]
fn test_concurrent_cleaning() {
    let as_file = Arc::new(as_file());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let as_file = Arc::clone(&as_file);
            thread::spawn(move || {
                let clean = as_file.clean(&Data::from(RAW)).unwrap();
                assert!(clean["lastLogin"].as_date().is_some());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_opposite_directions_do_not_interfere() {
    let as_file = Arc::new(as_file());
    let was_file = Arc::new(uncleaner(Arc::clone(&as_file)));
    let clean = Data::Object(as_file.clean(&Data::from(RAW)).unwrap());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let as_file = Arc::clone(&as_file);
            let was_file = Arc::clone(&was_file);
            let clean = clean.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..100 {
                    if i % 2 == 0 {
                        let decoded = as_file.clean_to_data(&Data::from(RAW)).unwrap();
                        assert_eq!(decoded, clean);
                    } else {
                        let encoded = was_file.unclean(&clean).unwrap();
                        assert_eq!(encoded, Data::from(RAW));
                    }
                    assert_eq!(direction::current(), Direction::Clean);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shared_cleaner_erased() {
    let shared: Arc<dyn cleaners::DataCleaner> = Arc::new(as_file());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || shared.clean(&Data::from("[]")).unwrap_err().to_string())
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            "Expected an object, got array at JSON.parse()"
        );
    }
}
