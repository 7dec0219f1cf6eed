use foursquare_client::Place;

/// Foursquare category ids for cafes and restaurants.
pub const CAFE_CATEGORY_IDS: &[u32] = &[13032, 13034, 13035, 13036, 13065];

/// Keep only places whose category-id set intersects the allow-list.
/// Pure; preserves the input order of kept places.
pub fn filter_by_categories(places: Vec<Place>, allowed: &[u32]) -> Vec<Place> {
    places
        .into_iter()
        .filter(|place| place.category_ids().any(|id| allowed.contains(&id)))
        .collect()
}
