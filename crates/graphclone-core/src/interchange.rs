//! JSON interchange documents
//!
//! A document has two lists, `entities` and `links`. Decoding is tolerant:
//! missing or non-list fields count as empty, malformed items are skipped
//! with a warning, and links naming unknown entities are dropped.

use crate::entity::{Entity, EntityId};
use crate::error::Result;
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

/// Wire form of a whole graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub entities: Vec<EntityRecord>,

    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

/// Wire form of an entity
///
/// Decoding also reads the id from `id`, but only when `entity_id` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntityRecord")]
pub struct EntityRecord {
    pub entity_id: EntityId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct RawEntityRecord {
    #[serde(default)]
    entity_id: Option<EntityId>,

    #[serde(default)]
    id: Option<Value>,

    name: String,

    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<RawEntityRecord> for EntityRecord {
    type Error = String;

    fn try_from(raw: RawEntityRecord) -> std::result::Result<Self, Self::Error> {
        let entity_id = match (raw.entity_id, raw.id) {
            (Some(entity_id), _) => entity_id,
            (None, Some(id)) => {
                EntityId::deserialize(id).map_err(|e| format!("invalid `id`: {}", e))?
            }
            (None, None) => return Err("missing field `entity_id`".to_string()),
        };

        Ok(Self {
            entity_id,
            name: raw.name,
            description: raw.description,
        })
    }
}

/// Wire form of a directed link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub from: EntityId,
    pub to: EntityId,
}

impl From<&Entity> for EntityRecord {
    fn from(entity: &Entity) -> Self {
        Self {
            entity_id: entity.id,
            name: entity.name.clone(),
            description: entity.description.clone(),
        }
    }
}

impl From<EntityRecord> for Entity {
    fn from(record: EntityRecord) -> Self {
        let entity = Entity::new(record.entity_id, record.name);
        match record.description {
            Some(description) => entity.with_description(description),
            None => entity,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, record: EntityRecord) -> Self {
        self.entities.push(record);
        self
    }

    pub fn with_link(mut self, from: u64, to: u64) -> Self {
        self.links.push(LinkRecord {
            from: EntityId(from),
            to: EntityId(to),
        });
        self
    }
}

impl Graph {
    /// Build a graph from an already-typed document
    ///
    /// All entities are registered before any link is applied.
    pub fn from_document(document: &Document, sort_links: bool) -> Self {
        let mut graph = Self::with_sort_links(sort_links);
        for record in &document.entities {
            graph.register(record.clone().into());
        }
        for link in &document.links {
            if !graph.link(link.from, link.to) {
                tracing::debug!("Link {} -> {} not applied", link.from, link.to);
            }
        }
        graph
    }

    /// Build a graph from arbitrary JSON, tolerating malformed shapes
    pub fn from_value(value: &Value, sort_links: bool) -> Self {
        let mut document = Document::new();

        for item in list_field(value, "entities") {
            match EntityRecord::deserialize(item) {
                Ok(record) if record.entity_id.0 == 0 => {
                    tracing::warn!("Skipping entity with non-positive id: {}", item);
                }
                Ok(record) => document.entities.push(record),
                Err(e) => tracing::warn!("Skipping malformed entity {}: {}", item, e),
            }
        }

        for item in list_field(value, "links") {
            match LinkRecord::deserialize(item) {
                Ok(link) => document.links.push(link),
                Err(e) => tracing::warn!("Skipping malformed link {}: {}", item, e),
            }
        }

        tracing::debug!(
            "Decoded {} entities and {} links",
            document.entities.len(),
            document.links.len()
        );

        Self::from_document(&document, sort_links)
    }

    /// Parse JSON text into a graph
    pub fn from_json_str(text: &str, sort_links: bool) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value, sort_links))
    }

    /// Read JSON text from `reader` and parse it into a graph
    pub fn from_reader<R: Read>(mut reader: R, sort_links: bool) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_json_str(&text, sort_links)
    }

    /// Render the graph in enumeration order
    pub fn to_document(&self) -> Document {
        Document {
            entities: self.entities().into_iter().map(EntityRecord::from).collect(),
            links: self
                .links()
                .into_iter()
                .map(|(from, to)| LinkRecord { from, to })
                .collect(),
        }
    }
}

fn list_field<'a>(value: &'a Value, field: &str) -> &'a [Value] {
    match value.get(field) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!("Ignoring '{}': expected a list, found {}", field, other);
            &[]
        }
        None => &[],
    }
}
