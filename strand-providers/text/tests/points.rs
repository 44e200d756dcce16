//! Integration tests covering line-oriented point ingestion.
use std::io::{BufReader, Cursor};

use rstest::rstest;
use strand_core::{Point, PointStore, StrandBuilder};
use strand_providers_text::{
    TextPointSource, TextPointSourceError, TextPointSourceErrorCode, parse_record,
};

const REFERENCE: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

#[rstest]
#[case("1,2,3", Point::new(1, 2, 3))]
#[case("1 2 3", Point::new(1, 2, 3))]
#[case("  1,\t2 ,3  ", Point::new(1, 2, 3))]
#[case("0,0,4294967295", Point::new(0, 0, u32::MAX))]
fn parse_record_accepts_mixed_separators(#[case] record: &str, #[case] expected: Point) {
    let point = parse_record(1, record).expect("record must parse");
    assert_eq!(point, Some(expected));
}

#[rstest]
#[case("", None)]
#[case("   \t", None)]
fn parse_record_skips_blank_lines(#[case] record: &str, #[case] expected: Option<Point>) {
    assert_eq!(
        parse_record(1, record).expect("blank lines are valid"),
        expected
    );
}

#[rstest]
#[case("1,2", 2)]
#[case("1,2,3,4", 4)]
#[case("1 2, 3 4", 4)]
fn parse_record_rejects_wrong_token_count(#[case] record: &str, #[case] expected: usize) {
    let err = parse_record(7, record).expect_err("record must be rejected");
    assert!(matches!(
        err,
        TextPointSourceError::MalformedRecord { line: 7, found } if found == expected
    ));
}

#[rstest]
#[case("1,,2,3", 2)]
#[case("1,2,3,", 4)]
#[case(",1,2,3", 1)]
#[case(",,", 1)]
#[case("1, ,3", 2)]
fn parse_record_rejects_empty_fields(#[case] record: &str, #[case] expected: usize) {
    let err = parse_record(5, record).expect_err("record must be rejected");
    assert!(matches!(
        err,
        TextPointSourceError::EmptyField { line: 5, field } if field == expected
    ));
    assert_eq!(
        err.to_string(),
        format!("line 5: field {expected} is empty")
    );
}

#[rstest]
#[case("1,-2,3", "-2")]
#[case("1,2,x", "x")]
#[case("1.5,2,3", "1.5")]
#[case("4294967296,0,0", "4294967296")]
fn parse_record_rejects_invalid_coordinates(#[case] record: &str, #[case] token: &str) {
    let err = parse_record(3, record).expect_err("record must be rejected");
    assert!(matches!(
        err,
        TextPointSourceError::InvalidCoordinate { line: 3, token: ref found } if found == token
    ));
    assert!(err.to_string().starts_with("line 3:"));
}

#[rstest]
fn reader_preserves_record_order_and_skips_blanks() {
    let source = TextPointSource::try_from_reader(
        "demo",
        BufReader::new(Cursor::new("\n1,0,0\n\n2,0,0\n3,0,0\n")),
    )
    .expect("source must parse");
    assert_eq!(source.name(), "demo");
    let xs: Vec<u32> = source.store().iter().map(Point::x).collect();
    assert_eq!(xs, vec![1, 2, 3]);
}

#[rstest]
fn reader_reports_physical_line_numbers() {
    let err = TextPointSource::try_from_str("demo", "1,2,3\n\n4,5\n")
        .expect_err("line 3 is short");
    assert!(matches!(
        err,
        TextPointSourceError::MalformedRecord { line: 3, found: 2 }
    ));
}

#[rstest]
fn reader_rejects_invalid_utf8() {
    let err = TextPointSource::try_from_reader("bytes", Cursor::new(vec![0xff, b',', b'1']))
        .expect_err("input must be UTF-8");
    assert!(matches!(err, TextPointSourceError::Io(_)));
}

#[rstest]
#[case("1,2\n", TextPointSourceErrorCode::MalformedRecord)]
#[case("1,,2\n", TextPointSourceErrorCode::EmptyField)]
#[case("1,2,z\n", TextPointSourceErrorCode::InvalidCoordinate)]
fn parse_failures_carry_stable_codes(
    #[case] text: &str,
    #[case] expected: TextPointSourceErrorCode,
) {
    let err = TextPointSource::try_from_str("codes", text).expect_err("input must be rejected");
    assert_eq!(err.code(), expected);
}

#[test]
fn error_codes_render_their_stable_names() {
    let rendered = [
        TextPointSourceErrorCode::MalformedRecord,
        TextPointSourceErrorCode::EmptyField,
        TextPointSourceErrorCode::InvalidCoordinate,
        TextPointSourceErrorCode::Io,
    ]
    .map(|code| code.to_string());
    assert_eq!(
        rendered,
        [
            "TEXT_SOURCE_MALFORMED_RECORD",
            "TEXT_SOURCE_EMPTY_FIELD",
            "TEXT_SOURCE_INVALID_COORDINATE",
            "TEXT_SOURCE_IO",
        ]
    );
}

#[rstest]
fn read_failures_report_the_io_code() {
    let err = TextPointSource::try_from_reader("bytes", Cursor::new(vec![0xfe, 0xff]))
        .expect_err("input must be UTF-8");
    assert_eq!(err.code(), TextPointSourceErrorCode::Io);
}

#[rstest]
fn empty_input_yields_empty_store() {
    let source = TextPointSource::try_from_str("empty", "").expect("empty input is valid");
    assert!(source.is_empty());
    assert_eq!(source.len(), 0);
}

#[test]
fn reference_layout_answers_both_queries() -> anyhow::Result<()> {
    let store: PointStore = TextPointSource::try_from_str("reference", REFERENCE)?.into();
    assert_eq!(store.len(), 20);

    let strand = StrandBuilder::new().with_connections(10).build()?;
    assert_eq!(strand.cluster(&store)?.product(), 40);
    assert_eq!(strand.span(&store)?.x_product(), Some(25_272));
    Ok(())
}
