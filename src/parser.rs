//! Record parser for comma-separated trip logs.
//!
//! Only two columns carry meaning: the pickup zone (index 1) and the pickup
//! datetime (index 3). Everything else on the line is ignored.

use csv::ByteRecord;
use serde::Serialize;
use thiserror::Error;

/// Prefix that marks the first line of a file as a column header.
pub const HEADER_PREFIX: &str = "TripID";

/// Minimum number of fields a data line must carry.
pub const MIN_FIELDS: usize = 6;

const ZONE_FIELD: usize = 1;
const DATETIME_FIELD: usize = 3;

/// A trip that passed validation, borrowing its zone from the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRecord<'a> {
    pub zone: &'a str,
    pub hour: u8,
}

/// Why a line was left out of the tallies.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    #[error("fewer than 6 fields")]
    TooFewFields,
    #[error("zone field is empty")]
    EmptyZone,
    #[error("zone field is not valid UTF-8")]
    InvalidZone,
    #[error("datetime field is empty")]
    EmptyDatetime,
    #[error("datetime has no space between date and time")]
    MissingTime,
    #[error("time part is shorter than two characters")]
    TruncatedTime,
    #[error("hour is not two ASCII digits")]
    NonDigitHour,
    #[error("hour is outside 0-23")]
    HourOutOfRange,
    #[error("line could not be read")]
    Unreadable,
}

/// Returns `true` if `line` (or its first field) is a column header rather than data.
pub fn is_header(line: impl AsRef<[u8]>) -> bool {
    line.as_ref().starts_with(HEADER_PREFIX.as_bytes())
}

/// Parses one raw line of text.
///
/// The line is split on every `,`; empty fields are kept, so `a,,b` has three
/// fields. No quoting rules apply.
pub fn parse_line(line: &str) -> Result<TripRecord<'_>, SkipReason> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields);
    }
    extract(
        fields[ZONE_FIELD].as_bytes(),
        fields[DATETIME_FIELD].as_bytes(),
    )
}

/// Parses a record already split by the CSV reader.
pub fn parse_record(record: &ByteRecord) -> Result<TripRecord<'_>, SkipReason> {
    if record.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields);
    }
    match (record.get(ZONE_FIELD), record.get(DATETIME_FIELD)) {
        (Some(zone), Some(datetime)) => extract(zone, datetime),
        _ => Err(SkipReason::TooFewFields),
    }
}

fn extract<'a>(zone: &'a [u8], datetime: &[u8]) -> Result<TripRecord<'a>, SkipReason> {
    if zone.is_empty() {
        return Err(SkipReason::EmptyZone);
    }
    if datetime.is_empty() {
        return Err(SkipReason::EmptyDatetime);
    }
    let hour = parse_hour(datetime)?;
    let zone = std::str::from_utf8(zone).map_err(|_| SkipReason::InvalidZone)?;
    Ok(TripRecord { zone, hour })
}

/// Reads the hour from the two characters right after the first space.
fn parse_hour(datetime: &[u8]) -> Result<u8, SkipReason> {
    let space = datetime
        .iter()
        .position(|&b| b == b' ')
        .ok_or(SkipReason::MissingTime)?;

    let (d0, d1) = match &datetime[space + 1..] {
        [d0, d1, ..] => (*d0, *d1),
        _ => return Err(SkipReason::TruncatedTime),
    };
    if !d0.is_ascii_digit() || !d1.is_ascii_digit() {
        return Err(SkipReason::NonDigitHour);
    }

    let hour = (d0 - b'0') * 10 + (d1 - b'0');
    if hour > 23 {
        return Err(SkipReason::HourOutOfRange);
    }
    Ok(hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let record = parse_line("1,ZoneA,x,2024-01-01 08:15:00,y,z").unwrap();
        assert_eq!(record.zone, "ZoneA");
        assert_eq!(record.hour, 8);
    }

    #[test]
    fn test_hour_boundaries() {
        assert_eq!(parse_line("1,Z,x,2024-01-01 00:00:00,y,z").unwrap().hour, 0);
        assert_eq!(parse_line("1,Z,x,2024-01-01 23:59:59,y,z").unwrap().hour, 23);
        assert_eq!(
            parse_line("1,Z,x,2024-01-01 24:00:00,y,z"),
            Err(SkipReason::HourOutOfRange)
        );
        assert_eq!(
            parse_line("1,Z,x,2024-01-01 25:00:00,y,z"),
            Err(SkipReason::HourOutOfRange)
        );
    }

    #[test]
    fn test_zone_is_kept_verbatim() {
        let record = parse_line("1, Zone a ,x,2024-01-01 10:00:00,y,z").unwrap();
        assert_eq!(record.zone, " Zone a ");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = parse_line("1,Zone,x,2024-01-01 07:00:00,y,z,extra,more").unwrap();
        assert_eq!(record.hour, 7);
    }

    #[test]
    fn test_trailing_empty_field_counts() {
        let record = parse_line("1,Zone,x,2024-01-01 07:00:00,y,").unwrap();
        assert_eq!(record.zone, "Zone");
    }

    #[test]
    fn test_rejections() {
        let cases = [
            ("1,ZoneA,x,2024-01-01 08:15:00", SkipReason::TooFewFields),
            ("", SkipReason::TooFewFields),
            ("1,,x,2024-01-01 08:15:00,y,z", SkipReason::EmptyZone),
            ("1,ZoneA,x,,y,z", SkipReason::EmptyDatetime),
            ("1,ZoneA,x,2024-01-01T08:15:00,y,z", SkipReason::MissingTime),
            ("1,ZoneA,x,2024-01-01 8,y,z", SkipReason::TruncatedTime),
            ("1,ZoneA,x,2024-01-01 ,y,z", SkipReason::TruncatedTime),
            ("1,ZoneA,x,2024-01-01 8:15:00,y,z", SkipReason::NonDigitHour),
            ("1,ZoneA,x,2024-01-01 ab:15:00,y,z", SkipReason::NonDigitHour),
            ("1,ZoneA,x,2024-01-01 25:00:00,y,z", SkipReason::HourOutOfRange),
        ];
        for (line, reason) in cases {
            assert_eq!(parse_line(line), Err(reason), "line: {line:?}");
        }
    }

    #[test]
    fn test_only_first_space_matters() {
        let record = parse_line("1,Z,x,2024-01-01 09 17:00:00,y,z").unwrap();
        assert_eq!(record.hour, 9);

        assert_eq!(
            parse_line("1,Z,x,2024-01-01  09:00:00,y,z"),
            Err(SkipReason::NonDigitHour)
        );
    }

    #[test]
    fn test_parse_record_matches_parse_line() {
        let lines = [
            "1,ZoneA,x,2024-01-01 08:15:00,y,z",
            "1,,x,2024-01-01 08:15:00,y,z",
            "1,ZoneA,x,2024-01-01 99:15:00,y,z",
            "1,ZoneA,x,2024",
        ];
        for line in lines {
            let record = ByteRecord::from(line.split(',').collect::<Vec<_>>());
            assert_eq!(parse_record(&record), parse_line(line), "line: {line:?}");
        }
    }

    #[test]
    fn test_invalid_utf8_zone_is_rejected() {
        let record = ByteRecord::from(vec![
            &b"1"[..],
            &[0xff, 0xfe][..],
            &b"x"[..],
            &b"2024-01-01 08:00:00"[..],
            &b"y"[..],
            &b"z"[..],
        ]);
        assert_eq!(parse_record(&record), Err(SkipReason::InvalidZone));
    }

    #[test]
    fn test_is_header() {
        assert!(is_header("TripID,Zone,X,Datetime,Y,Z"));
        assert!(is_header("TripIDs"));
        assert!(!is_header("tripid,Zone,X,Datetime,Y,Z"));
        assert!(!is_header("1,TripID,x,2024-01-01 08:00:00,y,z"));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::TooFewFields.to_string(), "fewer than 6 fields");
        assert_eq!(SkipReason::HourOutOfRange.to_string(), "hour is outside 0-23");
    }
}
