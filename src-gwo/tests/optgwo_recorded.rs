use gwo::{GWOConfigBuilder, OptimizationRecorder, grey_wolf_optimizer, run_recorded_grey_wolf};
use gwo_testfunctions::sphere;

#[test]
fn test_recorded_run_writes_trajectory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("traces");
    let bounds = vec![(-3.0, 3.0); 3];
    let config = GWOConfigBuilder::new().seed(21).build();

    let (report, csv_path) =
        run_recorded_grey_wolf("sphere", sphere, &bounds, 15, 30, config, out.to_str().unwrap()).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 2 + 3 + 2);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 30);

    // the last row is the reported optimum
    let values: Vec<f64> = rows.iter().map(|r| r[5].parse().unwrap()).collect();
    assert!((values[29] - report.fun).abs() < 1e-12);
    assert_eq!(&rows[0][6], "true");
    assert_eq!(&rows[0][0], "0");
    assert_eq!(&rows[29][0], "29");
}

#[test]
fn test_recorder_callback_through_config() {
    let recorder = OptimizationRecorder::new("sphere".to_string());
    let config = GWOConfigBuilder::new().seed(22).callback(recorder.create_callback()).build();
    let report = grey_wolf_optimizer(&sphere, &[(-1.0, 1.0); 2], 10, 12, config).unwrap();

    assert_eq!(recorder.num_iterations(), 12);
    let records = recorder.get_records();
    assert_eq!(records[11].best_result, report.fun);
    assert_eq!(records[11].x, report.x.to_vec());
    let (_, fun) = recorder.get_best_solution().unwrap();
    assert!(fun <= report.fun);
}
