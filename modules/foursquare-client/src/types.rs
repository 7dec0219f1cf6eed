use serde::{Deserialize, Serialize};

/// One venue as returned by `/places/search`. Immutable once deserialized;
/// downstream code only filters, reorders, or annotates with derived scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub fsq_id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub location: Option<Location>,
    /// Meters from the search coordinate. The provider omits it for some
    /// result kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
}

impl Place {
    /// First listed category, which Foursquare orders by relevance.
    pub fn primary_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    pub fn formatted_address(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|l| l.formatted_address.as_deref())
    }

    pub fn category_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.categories.iter().map(|c| c.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Place>,
}

/// One node of the `/places/categories` taxonomy tree. Children nest under
/// `categories`, recursively.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryNode {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<CategoryNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_deserializes_with_sparse_fields() {
        let json = r#"{"fsq_id": "abc123", "name": "Corner Cafe"}"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.name, "Corner Cafe");
        assert!(place.categories.is_empty());
        assert!(place.location.is_none());
        assert_eq!(place.distance, None);
        assert!(place.formatted_address().is_none());
    }

    #[test]
    fn place_deserializes_full_record() {
        let json = r#"{
            "fsq_id": "abc123",
            "name": "Corner Cafe",
            "categories": [
                {"id": 13035, "name": "Coffee Shop"},
                {"id": 13065, "name": "Restaurant"}
            ],
            "location": {"formatted_address": "1 Main St"},
            "distance": 240
        }"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.primary_category().unwrap().name, "Coffee Shop");
        assert_eq!(place.formatted_address(), Some("1 Main St"));
        assert_eq!(place.category_ids().collect::<Vec<_>>(), vec![13035, 13065]);
        assert_eq!(place.distance, Some(240));
    }

    #[test]
    fn category_tree_nests_recursively() {
        let json = r#"{
            "id": 13000,
            "name": "Dining and Drinking",
            "categories": [{"id": 13035, "name": "Coffee Shop"}]
        }"#;
        let node: CategoryNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.categories.len(), 1);
        assert_eq!(node.categories[0].id, 13035);
        assert!(node.categories[0].categories.is_empty());
    }
}
