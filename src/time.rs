//! GHRSST timestamp parsing.

use crate::error::{GhrsstError, Result};
use chrono::NaiveDateTime;

/// Format of the `start_time` and `stop_time` global attributes.
pub const GHRSST_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Parse a `YYYYMMDDTHHMMSSZ` attribute value.
pub fn parse_ghrsst_time(attribute: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, GHRSST_TIME_FORMAT).map_err(|source| {
        GhrsstError::MalformedTime {
            attribute: attribute.to_string(),
            value: value.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_compact_utc_timestamp() {
        let t = parse_ghrsst_time("start_time", "20200101T000000Z").unwrap();
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(t, expected);

        let t = parse_ghrsst_time("stop_time", "20190611T235959Z").unwrap();
        assert_eq!(t.to_string(), "2019-06-11 23:59:59");
    }

    #[test]
    fn rejects_other_layouts() {
        for bad in ["2020-01-01T00:00:00Z", "20200101T000000", "20201301T000000Z", ""] {
            let err = parse_ghrsst_time("start_time", bad).unwrap_err();
            match err {
                GhrsstError::MalformedTime { attribute, value, .. } => {
                    assert_eq!(attribute, "start_time");
                    assert_eq!(value, bad);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
