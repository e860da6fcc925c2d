// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{HoursInput, parse_hours, round2, truncate2};

#[test]
fn test_truncate2_drops_third_decimal() {
    assert_eq!(truncate2(12.399), 12.39);
}

#[test]
fn test_truncate2_keeps_whole_numbers() {
    assert_eq!(truncate2(12.0), 12.0);
    assert_eq!(truncate2(0.0), 0.0);
}

#[test]
fn test_truncate2_never_rounds_up() {
    assert_eq!(truncate2(7.999), 7.99);
    assert_eq!(truncate2(0.005), 0.0);
}

#[test]
fn test_truncate2_keeps_two_place_values_stable() {
    assert_eq!(truncate2(0.29), 0.29);
    assert_eq!(truncate2(15.5), 15.5);
    assert_eq!(truncate2(truncate2(4.57)), 4.57);
}

#[test]
fn test_round2_rounds_half_up() {
    assert_eq!(round2(35.499_999), 35.5);
    assert_eq!(round2(10.0 + 20.0), 30.0);
}

#[test]
fn test_parse_hours_accepts_and_truncates() {
    assert_eq!(parse_hours("15.5", 10.0), HoursInput::Accepted(15.5));
    assert_eq!(parse_hours(" 12.399 ", 0.0), HoursInput::Accepted(12.39));
    assert_eq!(parse_hours("0", 5.0), HoursInput::Accepted(0.0));
    assert_eq!(parse_hours("999", 5.0), HoursInput::Accepted(999.0));
}

#[test]
fn test_parse_hours_rejects_out_of_range() {
    assert_eq!(
        parse_hours("-1", 8.0),
        HoursInput::OutOfRange { previous: 8.0 }
    );
    assert_eq!(
        parse_hours("1000", 8.0),
        HoursInput::OutOfRange { previous: 8.0 }
    );
}

#[test]
fn test_parse_hours_reverts_unparseable_input() {
    assert_eq!(parse_hours("", 3.0), HoursInput::Unparseable { previous: 3.0 });
    assert_eq!(
        parse_hours("abc", 3.0),
        HoursInput::Unparseable { previous: 3.0 }
    );
    assert_eq!(
        parse_hours("NaN", 3.0),
        HoursInput::Unparseable { previous: 3.0 }
    );
    assert_eq!(
        parse_hours("inf", 3.0),
        HoursInput::Unparseable { previous: 3.0 }
    );
}
