use chrono::NaiveDate;
use opsledger::core::{AppError, Cursor};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_encode_format() {
    let cursor = Cursor::new(date(2024, 3, 1), 42);
    assert_eq!(cursor.encode(), "2024-03-01|42");
    assert_eq!(cursor.to_string(), "2024-03-01|42");
}

#[test]
fn test_decode_token() {
    let cursor = Cursor::decode("2024-03-01|42").unwrap();
    assert_eq!(cursor, Cursor::new(date(2024, 3, 1), 42));

    let parsed: Cursor = "2023-12-31|0".parse().unwrap();
    assert_eq!(parsed, Cursor::new(date(2023, 12, 31), 0));
}

#[test]
fn test_from_parts_trims_whitespace() {
    let cursor = Cursor::from_parts(" 2024-02-29 ", " 7 ").unwrap();
    assert_eq!(cursor, Cursor::new(date(2024, 2, 29), 7));
}

#[test]
fn test_malformed_tokens_are_invalid_cursor() {
    for token in [
        "",
        "2024-03-01",
        "2024-03-01|",
        "|42",
        "2024-13-01|42",
        "2023-02-29|1",
        "01/03/2024|42",
        "2024-03-01|abc",
        "2024-03-01|-5",
        "2024-03-01|4|2",
    ] {
        match Cursor::decode(token) {
            Err(AppError::InvalidCursor(_)) => {}
            other => panic!("expected InvalidCursor for {:?}, got {:?}", token, other),
        }
    }
}

#[test]
fn test_cursor_order_follows_date_then_id() {
    let earlier = Cursor::new(date(2024, 3, 1), 99);
    let later_same_day = Cursor::new(date(2024, 3, 2), 1);
    let later_id = Cursor::new(date(2024, 3, 2), 2);

    assert!(earlier < later_same_day);
    assert!(later_same_day < later_id);
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(days in 0i64..20_000, id in 0i64..i64::MAX) {
        let start = date(1990, 1, 1);
        let cursor = Cursor::new(start + chrono::Duration::days(days), id);
        prop_assert_eq!(Cursor::decode(&cursor.encode()).unwrap(), cursor);
    }
}
