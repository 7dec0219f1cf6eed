use std::collections::HashMap;

use foursquare_client::{CategoryNode, FoursquareClient};
use tracing::info;

use crate::error::PlacebotError;

/// Minimum normalized similarity for a query to claim a taxonomy key.
const SIMILARITY_CUTOFF: f64 = 0.5;

/// Flattened category name -> provider category ids.
///
/// Built once at startup and injected read-only; there is no refresh. When the
/// startup fetch fails the taxonomy stays empty and every resolution falls
/// back to free-text search.
#[derive(Debug, Default, Clone)]
pub struct CategoryTaxonomy {
    by_name: HashMap<String, Vec<u32>>,
}

impl CategoryTaxonomy {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch the provider taxonomy tree and flatten it. Callers treat failure
    /// as a warning and continue with `empty()`.
    pub async fn fetch(client: &FoursquareClient) -> Result<Self, PlacebotError> {
        let tree = client
            .fetch_categories()
            .await
            .map_err(|e| PlacebotError::TaxonomyFetchFailed(e.to_string()))?;
        let taxonomy = Self::from_tree(&tree);
        info!(categories = taxonomy.len(), "Loaded Foursquare category taxonomy");
        Ok(taxonomy)
    }

    /// Flatten a taxonomy tree so parent and child names resolve independently.
    pub fn from_tree(nodes: &[CategoryNode]) -> Self {
        let mut by_name = HashMap::new();
        for node in nodes {
            flatten(node, &mut by_name);
        }
        Self { by_name }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Best-matching category ids for a free-text query, or `None` when the
    /// taxonomy is empty or no key clears the similarity cutoff. At most one
    /// key's ids are returned.
    pub fn resolve(&self, query: &str) -> Option<&[u32]> {
        let query = query.to_lowercase();
        let (best_key, best_score) = self
            .by_name
            .keys()
            .map(|key| (key, strsim::normalized_levenshtein(&query, key)))
            .max_by(|a, b| a.1.total_cmp(&b.1))?;

        if best_score < SIMILARITY_CUTOFF {
            return None;
        }
        self.by_name.get(best_key).map(Vec::as_slice)
    }
}

fn flatten(node: &CategoryNode, out: &mut HashMap<String, Vec<u32>>) {
    out.insert(node.name.to_lowercase(), vec![node.id]);
    for child in &node.categories {
        flatten(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: u32, name: &str) -> CategoryNode {
        node(id, name, vec![])
    }

    fn node(id: u32, name: &str, categories: Vec<CategoryNode>) -> CategoryNode {
        CategoryNode {
            id,
            name: name.to_string(),
            categories,
        }
    }

    fn sample() -> CategoryTaxonomy {
        CategoryTaxonomy::from_tree(&[
            node(13000, "Dining and Drinking", vec![leaf(13035, "Coffee Shop")]),
            leaf(13002, "Bakery"),
            leaf(13036, "Tea Room"),
        ])
    }

    #[test]
    fn parent_and_child_resolve_independently() {
        let taxonomy = sample();
        assert_eq!(taxonomy.len(), 4);
        assert_eq!(taxonomy.resolve("coffee shop"), Some(&[13035][..]));
        assert_eq!(
            taxonomy.resolve("dining and drinking"),
            Some(&[13000][..])
        );
    }

    #[test]
    fn near_miss_clears_cutoff() {
        let taxonomy = sample();
        // One dropped letter still resolves.
        assert_eq!(taxonomy.resolve("coffe shop"), Some(&[13035][..]));
        assert_eq!(taxonomy.resolve("BAKERY"), Some(&[13002][..]));
    }

    #[test]
    fn unrelated_query_resolves_to_nothing() {
        let taxonomy = sample();
        assert_eq!(taxonomy.resolve("zzzzqqqxx"), None);
    }

    #[test]
    fn empty_taxonomy_never_resolves() {
        let taxonomy = CategoryTaxonomy::empty();
        assert!(taxonomy.is_empty());
        assert_eq!(taxonomy.resolve("coffee shop"), None);
    }
}
