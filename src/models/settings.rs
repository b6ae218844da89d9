use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Site settings: a free-form JSON object replaced key by key on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    #[must_use]
    pub const fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Shallow merge: top-level keys in `patch` replace stored keys wholesale.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            self.0.insert(key, value);
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = json!({
            "siteName": "CineReview Pro",
            "siteDescription": "Professional movie reviews and ratings",
            "contactEmail": "contact@cinereview.com",
            "socialMedia": {
                "twitter": "@cinereviewpro",
                "facebook": "cinereviewpro",
                "instagram": "cinereviewpro"
            }
        });

        match defaults {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }
}
