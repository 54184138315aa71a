// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::format_age;

#[yare::parameterized(
    zero             = { 0,         "0s" },
    seconds          = { 45,        "45s" },
    one_minute       = { 60,        "1m" },
    minutes          = { 300,       "5m" },
    hour_drops_mins  = { 4620,      "1h" },
    almost_a_day     = { 86399,     "23h" },
    three_days       = { 259200,    "3d" },
    almost_a_week    = { 604_799,   "6d" },
    two_weeks        = { 1_209_600, "2w" },
)]
fn age(secs: u64, expected: &str) {
    assert_eq!(format_age(secs), expected);
}
