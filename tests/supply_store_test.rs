//! Integration tests for SupplyRegistry

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use supplymatch::{Availability, GeoPoint, SupplyEntity, SupplyRegistry};

fn driver(id: &str, lat: f64, lon: f64) -> SupplyEntity {
    SupplyEntity::new(id, GeoPoint::from_degrees(lat, lon))
}

#[test]
fn test_upsert_and_get() {
    let registry = SupplyRegistry::new();
    assert!(registry.is_empty());

    assert!(registry.upsert(driver("d1", 51.5, -0.12)).is_none());
    let stored = registry.get("d1").unwrap();
    assert_eq!(stored.id, "d1");
    assert_eq!(stored.location.lat_degrees(), 51.5);
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("d1"));
}

#[test]
fn test_get_missing_returns_none() {
    let registry = SupplyRegistry::new();
    registry.upsert(driver("d1", 0.0, 0.0));
    assert!(registry.get("nobody").is_none());
    assert!(!registry.contains("nobody"));
}

#[test]
fn test_upsert_replaces_whole_entity() {
    let registry = SupplyRegistry::new();
    registry.upsert(SupplyEntity::with_availability(
        "d1",
        GeoPoint::from_degrees(1.0, 1.0),
        Availability {
            accepts_work: true,
            busy: true,
        },
    ));

    let previous = registry.upsert(driver("d1", 2.0, 2.0)).unwrap();
    assert_eq!(previous.location.lat_degrees(), 1.0);

    let current = registry.get("d1").unwrap();
    assert_eq!(current.location.lat_degrees(), 2.0);
    // Flags are not carried over from the previous value.
    assert_eq!(current.availability, None);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_repeated_upsert_keeps_single_copy() {
    let registry = SupplyRegistry::new();
    for _ in 0..5 {
        registry.upsert(driver("same", 10.0, 10.0));
    }
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.scan().count(), 1);
}

#[test]
fn test_scan_visits_every_entity_once() {
    let registry = SupplyRegistry::with_capacity(4);
    for i in 0..50 {
        registry.upsert(driver(&format!("d{}", i), i as f64 * 0.1, 0.0));
    }

    let mut ids: Vec<String> = registry.scan().map(|e| e.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
    assert_eq!(registry.snapshot().len(), 50);
}

#[test]
fn test_scan_is_restartable_by_rescanning() {
    let registry = SupplyRegistry::new();
    registry.upsert(driver("a", 0.0, 0.0));
    registry.upsert(driver("b", 0.0, 1.0));

    let mut first = registry.scan();
    assert!(first.next().is_some());
    assert!(first.next().is_some());
    assert!(first.next().is_none());
    drop(first);

    assert_eq!(registry.scan().count(), 2);
}

#[test]
fn test_upsert_completes_while_scan_is_paused() {
    let registry = Arc::new(SupplyRegistry::new());
    registry.upsert(driver("a", 0.0, 0.0));

    let mut scan = registry.scan();
    assert!(scan.next().is_some());

    let (done_tx, done_rx) = mpsc::channel();
    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            registry.upsert(driver("a", 1.0, 1.0));
            done_tx.send(()).unwrap();
        })
    };

    assert!(
        done_rx.recv_timeout(Duration::from_secs(5)).is_ok(),
        "writer blocked by an unfinished scan"
    );
    writer.join().unwrap();
    drop(scan);

    assert_eq!(registry.get("a").unwrap().location.lat_degrees(), 1.0);
}

#[test]
fn test_upsert_from_inside_scan_loop() {
    let registry = SupplyRegistry::with_capacity(4);
    for i in 0..20 {
        registry.upsert(driver(&format!("d{}", i), 0.0, 0.0));
    }

    for entity in registry.scan() {
        registry.upsert(driver(&entity.id, 5.0, 5.0));
    }

    assert!(registry.scan().all(|e| e.location.lat_degrees() == 5.0));
}

#[test]
fn test_concurrent_updates_never_tear_entities() {
    let registry = Arc::new(SupplyRegistry::new());
    for i in 0..32 {
        registry.upsert(driver(&format!("d{}", i), 0.0, 0.0));
    }

    thread::scope(|s| {
        for writer in 0..4 {
            let registry = Arc::clone(&registry);
            s.spawn(move || {
                for step in 0..2_000 {
                    // Latitude always equals longitude for every write.
                    let v = ((writer * 2_000 + step) % 80) as f64;
                    let id = format!("d{}", step % 32);
                    registry.upsert(driver(&id, v, v));
                }
            });
        }

        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            s.spawn(move || {
                for _ in 0..200 {
                    for entity in registry.scan() {
                        assert_eq!(
                            entity.location.lat_degrees(),
                            entity.location.lon_degrees(),
                            "torn entity {}",
                            entity.id
                        );
                    }
                }
            });
        }
    });

    assert_eq!(registry.len(), 32);
}
