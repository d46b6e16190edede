use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;

const SEED_PLACES: &str = include_str!("../places.toml");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read places file: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
    #[error("invalid places file format: {source}")]
    Decoding {
        #[from]
        source: toml::de::Error,
    },
    #[error("place {0} is listed more than once")]
    DuplicatePlace(String),
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct TemperatureRecord {
    pub place: String,
    pub current_temperature: i64,
    pub min_temperature: i64,
    pub max_temperature: i64,
    #[serde(default)]
    pub comments: String,
}

#[derive(Deserialize, Debug)]
struct PlacesFile {
    #[serde(default)]
    place: Vec<TemperatureRecord>,
}

/// Read-only mapping from place name to its temperature record.
///
/// Records are keyed by their own `place` field, so a record is always stored
/// under the name it reports.
#[derive(Debug, Default)]
pub struct TemperatureStore {
    records: HashMap<String, TemperatureRecord>,
}

pub type TemperatureStoreHandle = Arc<TemperatureStore>;

impl TemperatureStore {
    pub fn seeded() -> Result<TemperatureStore, StoreError> {
        Self::from_toml(SEED_PLACES)
    }

    pub fn from_toml(text: &str) -> Result<TemperatureStore, StoreError> {
        let places_file: PlacesFile = toml::from_str(text)?;
        Self::from_records(places_file.place)
    }

    pub fn from_records(
        records: impl IntoIterator<Item = TemperatureRecord>,
    ) -> Result<TemperatureStore, StoreError> {
        let mut store = TemperatureStore::default();
        for record in records {
            if store.records.contains_key(&record.place) {
                return Err(StoreError::DuplicatePlace(record.place));
            }
            store.records.insert(record.place.clone(), record);
        }
        Ok(store)
    }

    /// Exact, case-sensitive match on the place name.
    pub fn get(&self, place: &str) -> Option<&TemperatureRecord> {
        self.records.get(place)
    }

    pub fn places(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads the store from `path` if given, otherwise from the built-in places.
pub async fn load_temperature_store(
    path: Option<&Path>,
) -> Result<TemperatureStoreHandle, StoreError> {
    let store = match path {
        Some(path) => {
            log::info!("reading places from {}", path.display());
            let text = fs::read_to_string(path).await?;
            TemperatureStore::from_toml(&text)?
        }
        None => TemperatureStore::seeded()?,
    };
    log::info!("loaded temperatures for {} places", store.len());
    for place in store.places() {
        log::trace!("serving {}", place);
    }
    Ok(Arc::new(store))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    const SEED_NAMES: [&str; 8] = [
        "Melbourne",
        "Sydney",
        "Hobart",
        "Brisbane",
        "Perth",
        "Darwin",
        "Canberra",
        "పసలపూడి",
    ];

    #[test]
    fn seeded_store_contains_all_places() {
        let store = TemperatureStore::seeded().expect("built-in places should parse");
        assert_eq!(store.len(), SEED_NAMES.len());
        for name in SEED_NAMES {
            let record = store.get(name).expect("seeded place should be present");
            assert_eq!(record.place, name);
            assert_eq!(record.comments, "");
        }
    }

    #[test]
    fn seeded_records_are_not_range_checked() {
        let store = TemperatureStore::seeded().unwrap();
        let sydney = store.get("Sydney").unwrap();
        assert_eq!(
            *sydney,
            TemperatureRecord {
                place: "Sydney".to_string(),
                current_temperature: 30,
                min_temperature: 4,
                max_temperature: 25,
                comments: "".to_string(),
            }
        );
        assert_eq!(store.get("Canberra").unwrap().current_temperature, 40);
        assert_eq!(store.get("పసలపూడి").unwrap().current_temperature, 35);
    }

    #[test]
    fn lookup_is_exact_match() {
        let store = TemperatureStore::seeded().unwrap();
        assert!(store.get("Melbourne").is_some());
        assert!(store.get("melbourne").is_none());
        assert!(store.get("MELBOURNE").is_none());
        assert!(store.get(" Melbourne").is_none());
        assert!(store.get("Melbourne ").is_none());
        assert!(store.get("Atlantis").is_none());
        assert!(store.get("").is_none());
    }

    #[test]
    fn comments_default_to_empty() {
        let store = TemperatureStore::from_toml(
            r#"
            [[place]]
            place = "Oslo"
            current_temperature = -3
            min_temperature = -10
            max_temperature = 2
            "#,
        )
        .unwrap();
        assert_eq!(store.get("Oslo").unwrap().comments, "");
        assert_eq!(store.get("Oslo").unwrap().current_temperature, -3);
    }

    #[test]
    fn empty_file_gives_empty_store() {
        let store = TemperatureStore::from_toml("").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_place_is_rejected() {
        let record = TemperatureRecord {
            place: "Perth".to_string(),
            current_temperature: 0,
            min_temperature: 4,
            max_temperature: 25,
            comments: "".to_string(),
        };
        let result = TemperatureStore::from_records([record.clone(), record]);
        assert!(matches!(result, Err(StoreError::DuplicatePlace(place)) if place == "Perth"));
    }

    #[test]
    fn malformed_file_is_rejected() {
        let result = TemperatureStore::from_toml("[[place]]\nplace = 3\n");
        assert!(matches!(result, Err(StoreError::Decoding { .. })));
    }

    #[tokio::test]
    async fn missing_places_file_is_an_io_error() {
        let result = load_temperature_store(Some(Path::new("does/not/exist.toml"))).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn places_file_replaces_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[place]]
            place = "Oslo"
            current_temperature = -3
            min_temperature = -10
            max_temperature = 2
            comments = "windy"
            "#
        )
        .unwrap();

        let store = load_temperature_store(Some(file.path())).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Oslo").unwrap().comments, "windy");
        assert!(store.get("Melbourne").is_none());
    }

    #[tokio::test]
    async fn no_places_file_loads_seed() {
        let store = load_temperature_store(None).await.unwrap();
        assert_eq!(store.len(), 8);
    }
}
