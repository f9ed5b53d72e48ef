//! Integration tests for the series window store

use series::{InMemorySeriesStore, Observation, SeriesError, SeriesStore, WindowConfig};

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| 50.0 + i as f64 * 0.5).collect()
}

fn direct_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn direct_variance(values: &[f64]) -> f64 {
    let mean = direct_mean(values);
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

#[test]
fn test_rolling_aggregates_track_retained_window() {
    let store = InMemorySeriesStore::new(WindowConfig::new(32));
    let data = ramp(100);

    let mut last = None;
    for (i, &value) in data.iter().enumerate() {
        last = Some(store.append(Observation::new("cpu.load", i as i64, value)).unwrap());
    }

    let snap = last.unwrap();
    let retained = &data[data.len() - 32..];
    assert_eq!(snap.values, retained.to_vec());
    assert!((snap.mean - direct_mean(retained)).abs() < 1e-9);
    assert!((snap.variance - direct_variance(retained)).abs() < 1e-9);
    assert_eq!(snap.accepted, 100);
}

#[test]
fn test_out_of_order_is_rejected_and_window_untouched() {
    let store = InMemorySeriesStore::new(WindowConfig::new(8));
    store.append(Observation::new("cpu.load", 100, 1.0)).unwrap();
    store.append(Observation::new("cpu.load", 200, 2.0)).unwrap();
    let before = store.snapshot("cpu.load").unwrap();

    let err = store
        .append(Observation::new("cpu.load", 150, 3.0))
        .unwrap_err();
    assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    assert_eq!(store.snapshot("cpu.load").unwrap(), before);
}

#[test]
fn test_fingerprint_advances_with_the_window() {
    let store = InMemorySeriesStore::new(WindowConfig::new(8));
    let a = store.append(Observation::new("cpu.load", 1, 1.0)).unwrap();
    let b = store.append(Observation::new("cpu.load", 2, 2.0)).unwrap();
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_eq!(b.fingerprint(), store.snapshot("cpu.load").unwrap().fingerprint());
}

#[test]
fn test_parallel_appends_across_keys() {
    use std::sync::Arc;

    let store = Arc::new(InMemorySeriesStore::new(WindowConfig::new(64)));
    let handles: Vec<_> = (0..8)
        .map(|k| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let key = format!("series.{k}");
                for i in 0..200 {
                    store
                        .append(Observation::new(&key, i, (k * 1000 + i) as f64))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.series_count(), 8);
    for k in 0..8 {
        let snap = store.snapshot(&format!("series.{k}")).unwrap();
        assert_eq!(snap.accepted, 200);
        assert_eq!(snap.len(), 64);
        let retained: Vec<f64> = (136..200).map(|i| (k * 1000 + i) as f64).collect();
        assert_eq!(snap.values, retained);
    }
}

#[test]
fn test_concurrent_appends_to_one_key_keep_aggregates_consistent() {
    use std::sync::Arc;

    let store = Arc::new(InMemorySeriesStore::new(WindowConfig::new(128)));
    // Same timestamp everywhere so threads cannot race into OutOfOrder.
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    store.append(Observation::new("shared", 0, 2.0)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snap = store.snapshot("shared").unwrap();
    assert_eq!(snap.accepted, 400);
    assert_eq!(snap.len(), 128);
    assert!((snap.mean - 2.0).abs() < 1e-9);
    assert!(snap.variance.abs() < 1e-9);
}
