use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`, always with three fractional digits.
pub fn to_iso_millis(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso_millis(ts))
}

pub mod option {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_some(&super::to_iso_millis(ts)),
            None => serializer.serialize_none(),
        }
    }
}
