//! Test fixtures: an in-memory data source and a small sample data set.
//!
//! The sample documents mirror the 5etools `data/` layout closely enough to
//! exercise every storage shape (single files, merged files, per-source and
//! merged indexes).

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::infrastructure::ports::{DataSourceError, DataSourcePort};

// =============================================================================
// In-memory data source
// =============================================================================

/// Serves documents from a map, counting every fetch per path.
pub struct InMemoryDataSource {
    documents: HashMap<String, Value>,
    delay: Option<Duration>,
    fail_remaining: AtomicUsize,
    fetches: DashMap<String, usize>,
}

impl InMemoryDataSource {
    pub fn new(documents: HashMap<String, Value>) -> Self {
        Self {
            documents,
            delay: None,
            fail_remaining: AtomicUsize::new(0),
            fetches: DashMap::new(),
        }
    }

    /// Sleep before answering, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the next `count` fetches with an IO error.
    pub fn failing_first(self, count: usize) -> Self {
        self.fail_remaining.store(count, Ordering::SeqCst);
        self
    }

    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches.get(path).map(|count| *count).unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.iter().map(|entry| *entry.value()).sum()
    }
}

#[async_trait]
impl DataSourcePort for InMemoryDataSource {
    async fn fetch_document(&self, path: &str) -> Result<Value, DataSourceError> {
        *self.fetches.entry(path.to_string()).or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let should_fail = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(DataSourceError::Io {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
            });
        }

        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| DataSourceError::NotFound(path.to_string()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// =============================================================================
// Sample data
// =============================================================================

/// A small data set covering every storage shape.
pub fn sample_documents() -> HashMap<String, Value> {
    let mut docs = HashMap::new();

    docs.insert(
        "races.json".to_string(),
        json!({
            "race": [
                {"name": "Tiefling", "source": "PHB", "page": 42, "size": ["M"], "speed": 30,
                 "ability": [{"cha": 2, "int": 1}], "darkvision": 60,
                 "entries": ["To be greeted with stares and whispers..."]},
                {"name": "Dwarf", "source": "PHB", "page": 18, "size": ["M"], "speed": 25,
                 "ability": [{"con": 2}], "darkvision": 60}
            ]
        }),
    );

    docs.insert(
        "spells/index.json".to_string(),
        json!({"PHB": "spells-phb.json", "XGE": "spells-xge.json"}),
    );
    docs.insert(
        "spells/spells-phb.json".to_string(),
        json!({
            "spell": [
                {"name": "Fireball", "source": "PHB", "page": 241, "level": 3, "school": "V",
                 "time": [{"number": 1, "unit": "action"}],
                 "range": {"type": "point", "distance": {"type": "feet", "amount": 150}},
                 "components": {"v": true, "s": true, "m": "a tiny ball of bat guano and sulfur"},
                 "duration": [{"type": "instant"}],
                 "entries": ["A bright streak flashes from your pointing finger. See also {@spell fireball}."]},
                {"name": "Fire Bolt", "source": "PHB", "page": 242, "level": 0, "school": "V",
                 "entries": ["You hurl a mote of fire."]},
                {"name": "Tasha's Hideous Laughter", "source": "PHB", "page": 280, "level": 1, "school": "E",
                 "entries": ["A creature of your choice..."]},
                {"name": "Broken Spell", "source": "PHB", "level": "high"}
            ]
        }),
    );
    docs.insert(
        "spells/spells-xge.json".to_string(),
        json!({
            "spell": [
                {"name": "Toll the Dead", "source": "XGE", "page": 169, "level": 0, "school": "N"}
            ]
        }),
    );

    docs.insert(
        "items.json".to_string(),
        json!({
            "item": [
                {"name": "Bag of Holding", "source": "DMG", "page": 153, "rarity": "uncommon", "wondrous": true}
            ]
        }),
    );
    docs.insert(
        "items-base.json".to_string(),
        json!({
            "baseitem": [
                {"name": "Longsword", "source": "PHB", "page": 149, "type": "M", "rarity": "none",
                 "weight": 3, "value": 1500, "dmg1": "1d8", "dmg2": "1d10", "dmgType": "S",
                 "property": ["V"], "weapon": true, "weaponCategory": "martial"}
            ]
        }),
    );

    docs.insert(
        "class/index.json".to_string(),
        json!({"fighter": "class-fighter.json", "wizard": "class-wizard.json"}),
    );
    docs.insert(
        "class/class-fighter.json".to_string(),
        json!({
            "class": [
                {"name": "Fighter", "source": "PHB", "hd": {"number": 1, "faces": 10},
                 "proficiency": ["str", "con"], "subclassTitle": "Martial Archetype"}
            ],
            "classFeature": [
                {"name": "Action Surge", "source": "PHB", "className": "Fighter",
                 "classSource": "PHB", "level": 2, "entries": ["You can push yourself beyond your normal limits."]}
            ]
        }),
    );
    docs.insert(
        "class/class-wizard.json".to_string(),
        json!({
            "class": [
                {"name": "Wizard", "source": "PHB", "hd": {"number": 1, "faces": 6},
                 "proficiency": ["int", "wis"], "spellcastingAbility": "int"}
            ]
        }),
    );

    docs.insert(
        "feats.json".to_string(),
        json!({
            "feat": [
                {"name": "Alert", "source": "XPHB", "category": "O", "entries": ["Initiative proficiency."]},
                {"name": "Alert", "source": "PHB", "page": 165, "entries": ["Always on the lookout for danger."]}
            ]
        }),
    );

    docs.insert(
        "conditionsdiseases.json".to_string(),
        json!({
            "condition": [
                {"name": "Blinded", "source": "PHB", "page": 290,
                 "entries": [{"type": "list", "items": ["A blinded creature can't see."]}]}
            ],
            "disease": [
                {"name": "Cackle Fever", "source": "DMG", "page": 257}
            ]
        }),
    );

    docs.insert(
        "bestiary/index.json".to_string(),
        json!({"MM": "bestiary-mm.json"}),
    );
    docs.insert(
        "bestiary/bestiary-mm.json".to_string(),
        json!({
            "monster": [
                {"name": "Goblin", "source": "MM", "page": 166, "size": ["S"],
                 "type": {"type": "humanoid", "tags": ["goblinoid"]},
                 "ac": [{"ac": 15, "from": ["leather armor", "shield"]}],
                 "hp": {"average": 7, "formula": "2d6"}, "speed": {"walk": 30},
                 "str": 8, "dex": 14, "con": 10, "int": 10, "wis": 8, "cha": 8, "cr": "1/4"}
            ]
        }),
    );

    docs
}
