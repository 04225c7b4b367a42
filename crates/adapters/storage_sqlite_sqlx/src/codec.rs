//! Text encodings for identifiers and times.
//!
//! Every time is stored as fixed-width text so that comparing two encoded
//! values as strings gives the same answer as comparing the times.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use clinic_domain::time::{LocalDateTime, Timestamp};

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";
const DATE_FORMAT: &str = "%Y-%m-%d";

fn decode_error(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

pub(crate) fn encode_local(value: LocalDateTime) -> String {
    value.format(LOCAL_FORMAT).to_string()
}

pub(crate) fn decode_local(value: &str) -> Result<LocalDateTime, sqlx::Error> {
    LocalDateTime::parse_from_str(value, LOCAL_FORMAT).map_err(decode_error)
}

pub(crate) fn encode_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(decode_error)
}

pub(crate) fn encode_date(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub(crate) fn decode_date(value: &str) -> Result<NaiveDate, sqlx::Error> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(decode_error)
}

/// Parse identifiers and enum names stored as text.
pub(crate) fn decode_text<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value).map_err(decode_error)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn should_keep_local_encoding_fixed_width() {
        let whole = NaiveDate::from_ymd_opt(2025, 9, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let encoded = encode_local(whole);
        assert_eq!(encoded, "2025-09-10T10:00:00.000000000");
        assert_eq!(decode_local(&encoded).unwrap(), whole);

        let end = clinic_domain::time::end_of_day(NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
        assert_eq!(encode_local(end).len(), encoded.len());
        assert!(encoded < encode_local(end));
    }

    #[test]
    fn should_keep_timestamp_encoding_fixed_width() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let encoded = encode_timestamp(ts);
        assert_eq!(encoded, "2025-01-02T03:04:05.000000000Z");
        assert_eq!(decode_timestamp(&encoded).unwrap(), ts);
    }

    #[test]
    fn should_round_trip_dates() {
        let date = NaiveDate::from_ymd_opt(1982, 9, 25).unwrap();
        assert_eq!(decode_date(&encode_date(date)).unwrap(), date);
    }

    #[test]
    fn should_decode_seeded_speciality_ids() {
        use clinic_domain::id::SpecialityId;

        let cardiology: SpecialityId = decode_text("00000000-0000-0000-0000-000000000001").unwrap();
        assert_eq!(cardiology, SpecialityId::from_u128(1));
        let oncology = SpecialityId::from_u128(8);
        assert_eq!(decode_text::<SpecialityId>(&oncology.to_string()).unwrap(), oncology);
    }

    #[test]
    fn should_report_decode_error_for_garbage() {
        assert!(matches!(decode_local("yesterday"), Err(sqlx::Error::Decode(_))));
        assert!(matches!(
            decode_text::<clinic_domain::id::DoctorId>("nope"),
            Err(sqlx::Error::Decode(_))
        ));
    }
}
