mod common;

use common::{record, SAMPLE_LOG};
use matops_plot::{
    analyze_op, read_records, AnalyzeError, Field, GroupedSeries, MalformedPolicy, Mode, Record,
    RecordStore, ShapeClass,
};
use std::io::Cursor;

const FAIL: MalformedPolicy = MalformedPolicy::FailFast;

fn assert_three_modes(grouped: &GroupedSeries) {
    assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), Mode::ALL.to_vec());
}

#[test]
fn test_square_record() {
    let store = RecordStore::from(vec![record("add", "cpu", 64, 64, 0.01)]);
    let analysis = analyze_op(&store, "add", "addition", FAIL).expect("well-formed store");

    let cpu = analysis.square.series(Mode::Cpu);
    assert_eq!(cpu.points().collect::<Vec<_>>(), vec![(64, 0.01)]);
    assert_eq!(analysis.vector.point_count(), 0);
    assert_eq!(analysis.op, "add");
    assert_eq!(analysis.label, "addition");
}

#[test]
fn test_vector_record() {
    let store = RecordStore::from(vec![record("scale", "gpu", 1, 50, 0.002)]);
    let analysis = analyze_op(&store, "scale", "scaling", FAIL).expect("well-formed store");

    let gpu = analysis.vector.series(Mode::Gpu);
    assert_eq!(gpu.points().collect::<Vec<_>>(), vec![(50, 0.002)]);
    assert_eq!(analysis.square.point_count(), 0);
}

#[test]
fn test_other_op_excluded() {
    let store = RecordStore::from(vec![
        record("sub", "cpu", 64, 64, 0.01),
        record("sub", "cpu", 1, 64, 0.01),
    ]);
    let analysis = analyze_op(&store, "add", "addition", FAIL).expect("well-formed store");
    assert_eq!(analysis.square.point_count(), 0);
    assert_eq!(analysis.vector.point_count(), 0);
}

#[test]
fn test_one_by_one_is_square() {
    let store = RecordStore::from(vec![record("mult", "hybrid", 1, 1, 0.0001)]);
    let analysis = analyze_op(&store, "mult", "multiplication", FAIL).expect("well-formed store");

    assert_eq!(ShapeClass::of(&store[0]), Some(ShapeClass::Square));
    assert_eq!(analysis.square.series(Mode::Hybrid).len(), 1);
    assert_eq!(analysis.vector.point_count(), 0);
}

#[test]
fn test_neither_shape_excluded() {
    let store = RecordStore::from(vec![
        record("add", "cpu", 16, 32, 0.01),
        Record {
            rows: None,
            ..record("add", "cpu", 0, 8, 0.01)
        },
        Record {
            cols: None,
            ..record("add", "cpu", 1, 0, 0.01)
        },
    ]);
    let analysis = analyze_op(&store, "add", "addition", FAIL).expect("missing dims are excluded");
    assert_eq!(analysis.square.point_count(), 0);
    assert_eq!(analysis.vector.point_count(), 0);
    assert!(analysis.skipped.is_empty());
}

#[test]
fn test_all_modes_always_present() {
    let analysis =
        analyze_op(&RecordStore::new(), "relu", "ReLu", FAIL).expect("empty store is fine");
    assert_three_modes(&analysis.square);
    assert_three_modes(&analysis.vector);
    assert!(analysis.square.values().all(|s| s.is_empty()));

    let store = RecordStore::from(vec![record("relu", "gpu", 8, 8, 0.5)]);
    let analysis = analyze_op(&store, "relu", "ReLu", FAIL).expect("well-formed store");
    assert_three_modes(&analysis.square);
    assert_three_modes(&analysis.vector);
    assert!(analysis.square.series(Mode::Cpu).is_empty());
    assert!(analysis.square.series(Mode::Hybrid).is_empty());
}

#[test]
fn test_points_keep_input_order_and_duplicates() {
    let store = RecordStore::from(vec![
        record("add", "cpu", 128, 128, 0.4),
        record("add", "cpu", 64, 64, 0.1),
        record("add", "cpu", 128, 128, 0.5),
    ]);
    let analysis = analyze_op(&store, "add", "addition", FAIL).expect("well-formed store");
    let cpu = analysis.square.series(Mode::Cpu);
    assert_eq!(cpu.sizes, vec![128, 64, 128]);
    assert_eq!(cpu.times, vec![0.4, 0.1, 0.5]);
}

#[test]
fn test_sample_log() {
    let store = read_records(Cursor::new(SAMPLE_LOG)).expect("sample log parses");

    let add = analyze_op(&store, "add", "addition", FAIL).expect("sample log is well-formed");
    assert_eq!(add.square.series(Mode::Cpu).sizes, vec![64, 128]);
    assert_eq!(add.square.series(Mode::Gpu).sizes, vec![64]);
    assert_eq!(add.square.series(Mode::Hybrid).sizes, vec![64]);
    assert_eq!(add.vector.series(Mode::Cpu).points().collect::<Vec<_>>(), vec![(50, 0.0005)]);

    let scale = analyze_op(&store, "scale", "scaling", FAIL).expect("sample log is well-formed");
    assert_eq!(scale.vector.point_count(), 1);
    assert_eq!(scale.square.point_count(), 0);
}

#[test]
fn test_idempotent() {
    let store = read_records(Cursor::new(SAMPLE_LOG)).expect("sample log parses");
    for (op, label) in matops_plot::OPERATIONS {
        let first = analyze_op(&store, op, label, FAIL).expect("sample log is well-formed");
        let second = analyze_op(&store, op, label, FAIL).expect("sample log is well-formed");
        assert_eq!(first, second);
    }
}

#[test]
fn test_empty_records_ignored() {
    let store = RecordStore::from(vec![Record::default(), record("add", "gpu", 2, 2, 1.0)]);
    let analysis =
        analyze_op(&store, "add", "addition", FAIL).expect("empty records are not errors");
    assert_eq!(analysis.square.point_count(), 1);
}

#[test]
fn test_missing_op_fails_fast() {
    let store = RecordStore::from(vec![
        record("add", "gpu", 2, 2, 1.0),
        Record {
            op: None,
            ..record("", "gpu", 2, 2, 1.0)
        },
    ]);
    let err = analyze_op(&store, "add", "addition", FAIL).expect_err("record without op");
    assert_eq!(
        err,
        AnalyzeError::MissingField {
            record_no: 2,
            field: Field::Op
        }
    );
}

#[test]
fn test_missing_mode_and_time_fail_fast() {
    let store = RecordStore::from(vec![Record {
        mode: None,
        ..record("add", "", 4, 4, 1.0)
    }]);
    let err = analyze_op(&store, "add", "addition", FAIL).expect_err("record without mode");
    assert!(matches!(err, AnalyzeError::MissingField { field: Field::Mode, .. }));

    let store = RecordStore::from(vec![Record {
        time: None,
        ..record("add", "cpu", 1, 4, 1.0)
    }]);
    let err = analyze_op(&store, "add", "addition", FAIL).expect_err("record without time");
    assert!(matches!(err, AnalyzeError::MissingField { field: Field::Time, .. }));

    // Mode is only required for records of the analyzed op.
    let store = RecordStore::from(vec![Record {
        mode: None,
        ..record("sub", "", 4, 4, 1.0)
    }]);
    analyze_op(&store, "add", "addition", FAIL).expect("other op's mode is never looked up");
}

#[test]
fn test_unknown_mode_fails_fast() {
    let store = RecordStore::from(vec![record("add", "tpu", 4, 4, 1.0)]);
    let err = analyze_op(&store, "add", "addition", FAIL).expect_err("unknown mode");
    assert_eq!(
        err,
        AnalyzeError::UnknownMode {
            record_no: 1,
            mode: "tpu".to_owned()
        }
    );
}

#[test]
fn test_skip_and_warn() {
    let store = RecordStore::from(vec![
        record("add", "tpu", 4, 4, 1.0),
        Record {
            op: None,
            ..record("", "cpu", 4, 4, 1.0)
        },
        Record {
            time: None,
            ..record("add", "cpu", 4, 4, 1.0)
        },
        record("add", "cpu", 8, 8, 2.0),
    ]);
    let analysis = analyze_op(&store, "add", "addition", MalformedPolicy::SkipAndWarn)
        .expect("malformed records are skipped");
    assert_eq!(analysis.skipped.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(
        analysis.square.series(Mode::Cpu).points().collect::<Vec<_>>(),
        vec![(8, 2.0)]
    );
}
