//! JSON encoding of the record collection held in a slot.

use crate::VisitRecord;

/// Serialise `records` as a JSON array.
///
/// # Errors
/// Propagates [`serde_json::Error`]; plain records always encode.
pub fn encode_records(records: &[VisitRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Parse a slot payload. Blank text decodes as an empty collection.
///
/// # Errors
/// Returns [`serde_json::Error`] when the payload is not an array of
/// records.
///
/// # Examples
/// ```
/// use routehair_core::decode_records;
///
/// assert!(decode_records("")?.is_empty());
/// assert!(decode_records("{\"not\": \"a list\"}").is_err());
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn decode_records(payload: &str) -> Result<Vec<VisitRecord>, serde_json::Error> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};
    use rstest::rstest;

    #[rstest]
    fn sub_second_timestamps_survive_a_round_trip() {
        let recorded_at = DateTime::parse_from_rfc3339("2025-10-24T10:30:00.123456789Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        let date = NaiveDate::from_ymd_opt(2025, 10, 24).expect("valid date");
        let records = vec![
            VisitRecord::new("v1", "salon-1", date, true, recorded_at).with_memo("met owner"),
            VisitRecord::new("v2", "salon-2", date, false, recorded_at),
        ];

        let payload = encode_records(&records).expect("encode");
        assert!(payload.contains("2025-10-24T10:30:00.123456789Z"));
        assert_eq!(decode_records(&payload).expect("decode"), records);
    }

    #[rstest]
    #[case("   ")]
    #[case("[]")]
    fn blank_or_empty_payloads_decode_empty(#[case] payload: &str) {
        assert!(decode_records(payload).expect("decode").is_empty());
    }

    #[rstest]
    #[case("not json")]
    #[case("[{\"id\": 1}]")]
    #[case("[{\"id\":\"v1\",\"location_id\":\"s\",\"date\":\"24/10/2025\",\"completed\":true,\"recorded_at\":\"2025-10-24T10:30:00Z\"}]")]
    fn malformed_payloads_are_rejected(#[case] payload: &str) {
        assert!(decode_records(payload).is_err());
    }
}
