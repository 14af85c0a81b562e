use std::sync::{Arc, Mutex};

use maintenance_import::ingestion::{
    process_file, CompositeObserver, ImportContext, ImportFile, ImportObserver, ImportOptions, ImportSeverity,
    ImportStats,
};
use maintenance_import::ImportError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<ImportStats>>,
    failures: Mutex<Vec<ImportSeverity>>,
    alerts: Mutex<Vec<ImportSeverity>>,
}

impl ImportObserver for RecordingObserver {
    fn on_success(&self, _ctx: &ImportContext, stats: ImportStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &ImportContext, severity: ImportSeverity, _error: &ImportError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &ImportContext, severity: ImportSeverity, _error: &ImportError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn opts(obs: Arc<RecordingObserver>, alert_at_or_above: ImportSeverity) -> ImportOptions {
    ImportOptions {
        observer: Some(obs),
        alert_at_or_above,
        ..Default::default()
    }
}

#[test]
fn observer_receives_stats_for_decoded_file() {
    let obs = Arc::new(RecordingObserver::default());
    let file = ImportFile::new("a.csv", None, "設備ID,設備名,費用\nP-1,ポンプ,abc\n,x,1\n".as_bytes().to_vec());
    let res = process_file(&file, &opts(obs.clone(), ImportSeverity::Critical));
    assert!(!res.success);

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes.len(), 1);
    assert_eq!(successes[0].rows, 2);
    assert_eq!(successes[0].errors, 1);
    assert_eq!(successes[0].warnings, 1);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn rejected_file_reports_failure_without_critical_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let file = ImportFile::new("a.docx", None, b"irrelevant".to_vec());
    let _ = process_file(&file, &opts(obs.clone(), ImportSeverity::Critical));

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![ImportSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn alert_fires_at_configured_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let file = ImportFile::new("a.csv", None, b"id,name\n".to_vec());
    let _ = process_file(&file, &opts(obs.clone(), ImportSeverity::Error));

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![ImportSeverity::Error]);
}

#[test]
fn composite_forwards_to_every_observer() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::default().with(first.clone()).with(second.clone());
    let options = ImportOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let file = ImportFile::new("a.csv", None, "設備ID,設備名\nP-1,ポンプ\n".as_bytes().to_vec());
    assert!(process_file(&file, &options).success);

    for obs in [&first, &second] {
        let successes = obs.successes.lock().unwrap().clone();
        assert_eq!(successes.len(), 1);
        assert!(successes[0].is_importable());
    }
}
