//! graph records
//!
//! nodes and relationships decoded from result cells.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// a node and its properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// node properties
    pub properties: Map<String, Value>,
}

impl Node {
    /// property by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// a relationship, its type, and the nodes it connects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// relationship properties
    pub properties: Map<String, Value>,
    /// relationship type (e.g., "KNOWS")
    #[serde(rename = "type")]
    pub rel_type: String,
    /// url of the start node
    pub start: String,
    /// url of the end node
    pub end: String,
}

impl Relationship {
    /// property by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// numeric id at the end of the start node url
    pub fn start_id(&self) -> Option<u64> {
        trailing_id(&self.start)
    }

    /// numeric id at the end of the end node url
    pub fn end_id(&self) -> Option<u64> {
        trailing_id(&self.end)
    }
}

fn trailing_id(url: &str) -> Option<u64> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relationship_ids() {
        let rel = Relationship {
            start: "http://localhost:7474/db/data/node/12".to_string(),
            end: "http://localhost:7474/db/data/node/7/".to_string(),
            ..Relationship::default()
        };
        assert_eq!(rel.start_id(), Some(12));
        assert_eq!(rel.end_id(), Some(7));

        let rel = Relationship {
            start: "node-a".to_string(),
            ..Relationship::default()
        };
        assert_eq!(rel.start_id(), None);
        assert_eq!(rel.end_id(), None);
    }

    #[test]
    fn test_get() {
        let mut properties = Map::new();
        properties.insert("name".to_string(), json!("Mike"));
        let node = Node { properties };
        assert_eq!(node.get("name"), Some(&json!("Mike")));
        assert_eq!(node.get("age"), None);
    }
}
