use std::sync::Mutex;

use super::*;

#[derive(Default)]
struct Recorder {
    values: Mutex<Vec<u8>>,
}

impl ProgressSink for Recorder {
    fn report(&self, percent: u8) {
        self.values.lock().unwrap().push(percent);
    }
}

impl Recorder {
    fn values(&self) -> Vec<u8> {
        self.values.lock().unwrap().clone()
    }
}

#[test]
fn test_percent_of() {
    assert_eq!(percent_of(0, 4), 0);
    assert_eq!(percent_of(1, 3), 33);
    assert_eq!(percent_of(3, 3), 100);
    assert_eq!(percent_of(5, 3), 100);
    assert_eq!(percent_of(0, 0), 100);
}

#[test]
fn test_monotonic_drops_regressions_and_repeats() {
    let recorder = Recorder::default();
    let progress = MonotonicProgress::new(&recorder);
    for p in [0, 10, 10, 5, 50, 49, 100, 100] {
        progress.report(p);
    }
    assert_eq!(recorder.values(), vec![0, 10, 50, 100]);
    assert_eq!(progress.last_reported(), Some(100));
}

#[test]
fn test_overall_formula() {
    assert_eq!(WeightedProgress::overall(0, 4, 0.0), 0);
    assert_eq!(WeightedProgress::overall(0, 4, 50.0), 12);
    assert_eq!(WeightedProgress::overall(1, 4, 0.0), 25);
    assert_eq!(WeightedProgress::overall(2, 4, 100.0), 75);
    assert_eq!(WeightedProgress::overall(3, 4, 100.0), 100);
    assert_eq!(WeightedProgress::overall(0, 0, 0.0), 100);
}

#[test]
fn test_weighted_four_files_non_decreasing_and_ends_at_100() {
    let recorder = Recorder::default();
    let record_counts = [7usize, 120, 1, 333];
    let progress = WeightedProgress::new(&recorder, record_counts.len());

    for (completed, &count) in record_counts.iter().enumerate() {
        for done in 1..=count {
            let inner = done as f64 / count as f64 * 100.0;
            progress.report_inner(completed, inner);
        }
        progress.report_completed(completed + 1);
    }
    progress.finish();

    let values = recorder.values();
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
    assert_eq!(values.last(), Some(&100));
}

#[test]
fn test_closure_is_a_sink() {
    let seen = Mutex::new(Vec::new());
    let sink = |p: u8| seen.lock().unwrap().push(p);
    sink.report(42);
    assert_eq!(*seen.lock().unwrap(), vec![42]);
}
