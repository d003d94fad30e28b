use regions::GovernorateName;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Number;
use std::collections::HashMap;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub place: String,
    /// Display string, never parsed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub governorate: GovernorateName,
    #[serde(deserialize_with = "whole_number")]
    pub score: u32,
    #[serde(deserialize_with = "whole_number")]
    pub events_count: u32,
    /// Kept in the order the server sent them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

impl ActivityRecord {
    /// What a governorate without fetched data is shown as.
    pub fn empty(governorate: GovernorateName) -> Self {
        Self {
            governorate,
            score: 0,
            events_count: 0,
            events: vec![],
        }
    }
}

/// Fetched records keyed by governorate name. Built once per fetch and
/// replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLookup(HashMap<GovernorateName, ActivityRecord>);

impl ActivityLookup {
    /// A later record for the same governorate overwrites an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = ActivityRecord>) -> Self {
        let mut lookup = HashMap::new();
        for record in records {
            if let Some(previous) = lookup.insert(record.governorate.clone(), record) {
                tracing::debug!(governorate = %previous.governorate, "duplicate activity record overwritten");
            }
        }
        Self(lookup)
    }

    pub fn get(&self, governorate: &str) -> Option<&ActivityRecord> {
        self.0.get(governorate)
    }

    pub fn records(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `8` as well as `8.0`. Negative and fractional values are rejected.
fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|value| value.fract() == 0.0 && *value >= 0.0)
                .map(|value| value as u64)
        })
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| {
            de::Error::custom(format!("expected a non-negative whole number, found {number}"))
        })
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|url| !url.trim().is_empty()))
}


#[cfg(test)]
mod tests {
    use super::fixtures::{event, record};
    use super::{ActivityLookup, ActivityRecord, Event};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_that_later_duplicates_overwrite_earlier_records() {
        let lookup = ActivityLookup::from_records(vec![
            record("Tunis", 2, vec![]),
            record("Sfax", 5, vec![]),
            record("Tunis", 9, vec![event(1, "Techno Night")]),
        ]);

        assert_eq!(lookup.len(), 2);
        let tunis = lookup.get("Tunis").unwrap();
        assert_eq!(tunis.score, 9);
        assert_eq!(tunis.events.len(), 1);
    }

    #[test]
    fn test_that_records_keep_server_event_order() {
        let value = json!({
            "governorate": "Sousse",
            "score": 4,
            "color": "#f97316",
            "events_count": 2,
            "events": [
                { "id": 7, "name": "Beach Party", "place": "Bora Bora", "date": "Sat", "price": "30 TND", "url": "https://e.tn/7", "city": "Sousse" },
                { "id": 3, "name": "Jazz Club", "place": "Le Pirate", "date": "Sun", "price": "Free", "url": null, "city": "Port El Kantaoui" }
            ]
        });

        let record: ActivityRecord = serde_json::from_value(value).unwrap();

        assert_eq!(record.events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![7, 3]);
        assert_eq!(record.events[1].url, None);
    }

    #[test]
    fn test_that_blank_urls_are_treated_as_missing() {
        let event: Event = serde_json::from_value(json!({
            "id": 1, "name": "Open Air", "place": "", "date": "", "price": "", "url": "  ", "city": "Nabeul"
        }))
        .unwrap();

        assert_eq!(event.url, None);
    }

    #[test]
    fn test_that_null_display_fields_become_empty() {
        let event: Event = serde_json::from_value(json!({
            "id": 2, "name": "Jazz Night", "place": null, "date": null, "price": null, "url": null, "city": null
        }))
        .unwrap();

        assert_eq!(event.place, "");
        assert_eq!(event.date, "");
        assert_eq!(event.price, "");
        assert_eq!(event.city, "");
        assert_eq!(event.url, None);
    }

    #[test]
    fn test_that_null_events_are_an_empty_list() {
        let record: ActivityRecord = serde_json::from_value(json!({
            "governorate": "Kef", "score": 0, "events_count": 0, "events": null
        }))
        .unwrap();

        assert!(record.events.is_empty());
    }

    #[rstest]
    #[case(json!(8), 8)]
    #[case(json!(8.0), 8)]
    #[case(json!(0.0), 0)]
    fn test_that_whole_number_scores_are_accepted(#[case] score: serde_json::Value, #[case] expected: u32) {
        let record: ActivityRecord = serde_json::from_value(json!({
            "governorate": "Tunis", "score": score, "events_count": 1.0, "events": []
        }))
        .unwrap();

        assert_eq!(record.score, expected);
        assert_eq!(record.events_count, 1);
    }

    #[rstest]
    #[case(json!(7.5))]
    #[case(json!(-2.0))]
    #[case(json!("8"))]
    #[case(json!(null))]
    fn test_that_other_scores_are_rejected(#[case] score: serde_json::Value) {
        let result = serde_json::from_value::<ActivityRecord>(json!({
            "governorate": "Tunis", "score": score, "events_count": 0, "events": []
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_that_negative_scores_are_rejected() {
        let result = serde_json::from_value::<ActivityRecord>(json!({
            "governorate": "Gafsa", "score": -1, "events_count": 0, "events": []
        }));

        assert!(result.is_err());
    }
}
