//! Place items shown to users.

use serde::{Deserialize, Serialize};

/// Geographic position of a place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Google Maps search link pointing at these coordinates.
    pub fn map_link(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.lat, self.lng
        )
    }
}

/// A hotel, restaurant or attraction as collected by the data pipeline.
///
/// Read-only to the conversation. Field names follow the collected JSON
/// documents (`user_ratings_total`, `phone_number`, `photos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, rename = "user_ratings_total", alias = "ratingCount")]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, rename = "photos", alias = "photoUrls")]
    pub photo_urls: Vec<String>,
}

impl Item {
    /// Creates an item with only a name, for fixtures and imports.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            phone_number: None,
            rating: None,
            rating_count: None,
            coordinates: None,
            photo_urls: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_link_embeds_coordinates() {
        let coords = Coordinates::new(-19.0078, -57.6547);
        assert_eq!(
            coords.map_link(),
            "https://www.google.com/maps/search/?api=1&query=-19.0078,-57.6547"
        );
    }

    #[test]
    fn deserializes_collected_document() {
        let json = r#"{
            "name": "Hotel Nacional",
            "address": "Rua America, 936",
            "phone_number": "(67) 3234-6000",
            "rating": 4.2,
            "user_ratings_total": 1520,
            "coordinates": {"lat": -19.0, "lng": -57.6},
            "photos": ["https://example.com/a.jpg"]
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "Hotel Nacional");
        assert_eq!(item.rating_count, Some(1520));
        assert_eq!(item.photo_urls.len(), 1);
    }

    #[test]
    fn missing_optional_fields_default() {
        let item: Item = serde_json::from_str(r#"{"name": "Forte Junqueira"}"#).unwrap();
        assert_eq!(item, Item::named("Forte Junqueira"));
    }
}
