use serde::{Deserialize, Deserializer};
use serde_with::DeserializeAs;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Deserialize an [`OffsetDateTime`] from a unix timestamp in seconds, as
/// found in the `mtime` and `ctime` fields of the legacy API.
pub(crate) struct UnixSeconds;

impl<'de> DeserializeAs<'de, OffsetDateTime> for UnixSeconds {
    fn deserialize_as<D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = i64::deserialize(deserializer)?;
        OffsetDateTime::from_unix_timestamp(secs).map_err(serde::de::Error::custom)
    }
}

/// An RFC 3339 timestamp that may be missing or empty. Share links without
/// an expiry have `"expire_date": ""` instead of `null`.
pub(crate) struct OptRfc3339;

impl<'de> DeserializeAs<'de, Option<OffsetDateTime>> for OptRfc3339 {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty());

        match s {
            Some(s) => OffsetDateTime::parse(&s, &Rfc3339)
                .map_err(serde::de::Error::custom)
                .map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;
    use serde_with::serde_as;
    use time::{macros::datetime, OffsetDateTime};

    use super::{OptRfc3339, UnixSeconds};

    #[test]
    fn unix_seconds() {
        #[serde_as]
        #[derive(Debug, Deserialize)]
        struct Row {
            #[serde_as(as = "UnixSeconds")]
            mtime: OffsetDateTime,
        }

        let row: Row = serde_json::from_value(json!({ "mtime": 1_398_148_877 })).unwrap();

        assert_eq!(row.mtime, datetime!(2014-04-22 06:41:17 +00:00:00));
    }

    #[test]
    fn opt_rfc3339() {
        #[serde_as]
        #[derive(Debug, Deserialize)]
        struct Row {
            #[serde(default)]
            #[serde_as(as = "OptRfc3339")]
            expire_date: Option<OffsetDateTime>,
        }

        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row.expire_date, None);

        let row: Row = serde_json::from_value(json!({ "expire_date": "" })).unwrap();
        assert_eq!(row.expire_date, None);

        let row: Row =
            serde_json::from_value(json!({ "expire_date": "2017-04-01T02:35:32+08:00" })).unwrap();
        assert_eq!(
            row.expire_date,
            Some(datetime!(2017-04-01 02:35:32 +08:00:00))
        );
    }
}
