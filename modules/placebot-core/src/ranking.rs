//! Deterministic local ranking used when the reasoning provider is
//! unavailable. Pure functions only.

use foursquare_client::Place;

/// Distance assumed when the provider omits one, in meters. Far enough that
/// the proximity term contributes nothing.
const DEFAULT_DISTANCE_M: i64 = 10_000;

/// The proximity reward saturates at this radius.
const PROXIMITY_SATURATION_M: i64 = 2_000;

/// Score one place against the query. Higher is better.
///
/// +10 when the primary category reads like a cafe, +5 for the cozy-cafe
/// pairing, plus a proximity term that decays by 1 point per 100m and clamps
/// at zero beyond the saturation radius.
pub fn score_place(query: &str, place: &Place) -> i64 {
    let mut score = 0;

    let name = place.name.to_lowercase();
    let category = place
        .primary_category()
        .map(|c| c.name.to_lowercase())
        .unwrap_or_default();
    let distance = place.distance.map(i64::from).unwrap_or(DEFAULT_DISTANCE_M);

    if category.contains("cafe") || category.contains("coffee") || category.contains("tea") {
        score += 10;
    }
    if query.to_lowercase().contains("cozy")
        && (name.contains("cafe") || category.contains("coffee"))
    {
        score += 5;
    }
    score += ((PROXIMITY_SATURATION_M - distance) / 100).max(0);

    score
}

/// Stable descending sort by score. Ties keep their input order, which carries
/// the provider's own distance ranking.
pub fn rank_places(query: &str, mut places: Vec<Place>) -> Vec<Place> {
    places.sort_by_key(|place| std::cmp::Reverse(score_place(query, place)));
    places
}

#[cfg(test)]
mod tests {
    use super::*;
    use foursquare_client::Category;

    fn place(name: &str, category: Option<&str>, distance: Option<u32>) -> Place {
        Place {
            fsq_id: name.to_string(),
            name: name.to_string(),
            categories: category
                .map(|c| {
                    vec![Category {
                        id: 13035,
                        name: c.to_string(),
                    }]
                })
                .unwrap_or_default(),
            location: None,
            distance,
        }
    }

    #[test]
    fn missing_distance_contributes_nothing() {
        let bakery = place("Rise", Some("Bakery"), None);
        assert_eq!(score_place("bread", &bakery), 0);
    }

    #[test]
    fn proximity_term_clamps_beyond_saturation() {
        let far = place("Far Cafe", Some("Coffee Shop"), Some(2500));
        let near = place("Near Cafe", Some("Coffee Shop"), Some(100));
        assert_eq!(score_place("coffee", &far), 10);
        assert_eq!(score_place("coffee", &near), 10 + 19);
    }

    #[test]
    fn cozy_bonus_needs_both_conditions() {
        let cafe = place("Warm Cafe", Some("Bakery"), None);
        // Query has "cozy", name has "cafe".
        assert_eq!(score_place("cozy spot", &cafe), 5);
        // Drop "cozy" from the query and the bonus disappears.
        assert_eq!(score_place("quiet spot", &cafe), 0);
        // Keep "cozy" but neither name nor category qualifies.
        let diner = place("Highway Diner", Some("Diner"), None);
        assert_eq!(score_place("cozy spot", &diner), 0);
    }

    #[test]
    fn cozy_bonus_applies_via_coffee_category() {
        let shop = place("Beanhouse", Some("Coffee Shop"), None);
        assert_eq!(score_place("cozy morning", &shop), 10 + 5);
    }

    #[test]
    fn only_primary_category_counts() {
        let mut p = place("Side Room", Some("Bookstore"), None);
        p.categories.push(Category {
            id: 13035,
            name: "Coffee Shop".to_string(),
        });
        assert_eq!(score_place("coffee", &p), 0);
    }

    #[test]
    fn rank_is_descending_and_stable() {
        let places = vec![
            place("A", Some("Bakery"), Some(9000)),
            place("B", Some("Coffee Shop"), Some(300)),
            place("C", Some("Bakery"), Some(9000)),
            place("D", Some("Tea Room"), Some(300)),
        ];
        let ranked = rank_places("afternoon", places);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        // B and D tie at 27; B keeps its earlier slot. A and C tie at 0.
        assert_eq!(names, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn cozy_coffee_scenario_orders_by_score() {
        let places = vec![
            place("First Roast", Some("Coffee Shop"), Some(100)),
            place("Crumb", Some("Bakery"), Some(2500)),
            place("Bean There", Some("Coffee Shop"), Some(50)),
        ];
        let ranked = rank_places("cozy coffee", places);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        // Scores: 34, 0, 34 — the two coffee shops tie and keep provider order.
        assert_eq!(names, vec!["First Roast", "Bean There", "Crumb"]);
    }
}
