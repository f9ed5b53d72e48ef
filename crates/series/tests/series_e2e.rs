//! End-to-end tests for the series crate
//!
//! Exercises complete window lifecycles using only this crate's API.

use std::time::Duration;

use series::{InMemorySeriesStore, Observation, SeriesStore, WindowConfig};

#[test]
fn e2e_first_contact_to_full_window() {
    let store = InMemorySeriesStore::new(WindowConfig::new(16));

    let snap = store.append(Observation::new("mem.free", 0, 4096.0)).unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap.mean, 4096.0);
    assert_eq!(snap.variance, 0.0);

    for i in 1..40 {
        store
            .append(Observation::new("mem.free", i, 4096.0 - i as f64))
            .unwrap();
    }

    let snap = store.snapshot("mem.free").unwrap();
    assert_eq!(snap.len(), 16);
    assert_eq!(snap.accepted, 40);
    assert_eq!(snap.first_timestamp, 24);
    assert_eq!(snap.last_timestamp, 39);
}

#[test]
fn e2e_seasonal_series_builds_baselines() {
    let config = WindowConfig::new(64).with_seasonal_period(6);
    let store = InMemorySeriesStore::new(config);
    let shape = [5.0, 8.0, 14.0, 14.0, 8.0, 5.0];

    let mut ts = 0;
    for _ in 0..3 {
        for &value in &shape {
            store.append(Observation::new("req.rate", ts, value)).unwrap();
            ts += 1;
        }
    }

    let ctx = store.snapshot("req.rate").unwrap().seasonal.unwrap();
    assert!(ctx.established);
    assert_eq!(ctx.period, 6);
    assert_eq!(ctx.phase, 5);
    assert!((ctx.baseline - 5.0).abs() < 1e-9);
}

#[test]
fn e2e_idle_windows_are_garbage_collected() {
    let store = InMemorySeriesStore::new(WindowConfig::new(8));
    for k in 0..5 {
        store
            .append(Observation::new(format!("gc.{k}"), 0, 1.0))
            .unwrap();
    }
    assert_eq!(store.series_count(), 5);

    // Nothing is older than an hour.
    assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
    // Everything is older than zero.
    assert_eq!(store.evict_idle(Duration::ZERO), 5);
    assert!(store.snapshot("gc.0").is_none());
}
