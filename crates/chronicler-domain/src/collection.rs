//! Topic-keyed collection of extracted records

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::record::TopicRecord;

/// Mapping from `topic_id` to its extracted [`TopicRecord`], built
/// incrementally as articles are processed.
///
/// Keys are unique. When two articles extract to the same `topic_id` the
/// collection keeps the last record (the earlier one is returned from
/// [`RecordCollection::insert`] so callers can log the displacement).
///
/// Serialization uses the persisted-output shape: a JSON object mapping each
/// `topic_id` to the remaining six record fields. Deserialization
/// reconstructs `topic_id` from the key, so a round trip through JSON is
/// field-for-field lossless with sequence order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCollection {
    records: BTreeMap<String, TopicRecord>,
}

impl RecordCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record keyed by its own `topic_id`.
    ///
    /// Returns the previously stored record for that topic, if any
    /// (keep-last policy).
    pub fn insert(&mut self, record: TopicRecord) -> Option<TopicRecord> {
        self.records.insert(record.topic_id.clone(), record)
    }

    /// Look up a record by topic id.
    pub fn get(&self, topic_id: &str) -> Option<&TopicRecord> {
        self.records.get(topic_id)
    }

    /// Whether a topic id is present.
    pub fn contains(&self, topic_id: &str) -> bool {
        self.records.contains_key(topic_id)
    }

    /// The currently known topic ids.
    pub fn topic_ids(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    /// Iterate over records.
    pub fn iter(&self) -> impl Iterator<Item = &TopicRecord> {
        self.records.values()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<TopicRecord> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = TopicRecord>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}

/// Persisted shape of one record: everything but the key.
#[derive(Serialize)]
struct PersistedFieldsRef<'a> {
    summary: &'a str,
    evolution_timeline: &'a str,
    key_innovations: &'a str,
    major_contributors: &'a str,
    main_techniques: &'a [String],
    applications: &'a [String],
}

#[derive(Deserialize)]
struct PersistedFields {
    summary: String,
    evolution_timeline: String,
    key_innovations: String,
    major_contributors: String,
    main_techniques: Vec<String>,
    applications: Vec<String>,
}

impl Serialize for RecordCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (topic_id, record) in &self.records {
            map.serialize_entry(
                topic_id,
                &PersistedFieldsRef {
                    summary: &record.summary,
                    evolution_timeline: &record.evolution_timeline,
                    key_innovations: &record.key_innovations,
                    major_contributors: &record.major_contributors,
                    main_techniques: &record.main_techniques,
                    applications: &record.applications,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, PersistedFields>::deserialize(deserializer)?;
        let records = raw
            .into_iter()
            .map(|(topic_id, fields)| {
                let record = TopicRecord {
                    topic_id: topic_id.clone(),
                    summary: fields.summary,
                    evolution_timeline: fields.evolution_timeline,
                    key_innovations: fields.key_innovations,
                    major_contributors: fields.major_contributors,
                    main_techniques: fields.main_techniques,
                    applications: fields.applications,
                };
                (topic_id, record)
            })
            .collect();
        Ok(Self { records })
    }
}
