use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Africa::Tunis;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
/// TunisTZDateTime stores the time as `DateTime<UTC>` for easier serialization
/// and deserialization
pub struct TunisTZDateTime(DateTime<Utc>);

impl TunisTZDateTime {
    pub fn now() -> Self {
        TunisTZDateTime(Utc::now())
    }

    pub fn to_date_time(&self) -> DateTime<Tz> {
        Tunis.from_utc_datetime(&self.0.naive_utc())
    }

    /// eg: "October 2026"
    pub fn month_label(&self) -> String {
        self.to_date_time().format("%B %Y").to_string()
    }
}

impl From<DateTime<Utc>> for TunisTZDateTime {
    fn from(data: DateTime<Utc>) -> TunisTZDateTime {
        TunisTZDateTime(data)
    }
}
