//! Address search for the address-autocomplete field
//!
//! The geocoder is an external service. [`NominatimGeocoder`] talks to an
//! OpenStreetMap Nominatim instance; tests and the UI state machine use the
//! [`Geocoder`] trait so they can run against canned suggestions.

use async_trait::async_trait;
use reqwest::Url;
use sejour_model::AddressFields;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Maximum suggestions requested per search
pub const SUGGESTION_LIMIT: usize = 5;

/// One address suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct AddressSuggestion {
    /// Full label shown in the dropdown
    pub label: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AddressSuggestion {
    /// Fill every address field at once
    pub fn apply_to(&self, fields: &mut AddressFields) {
        fields.address = self.address.clone();
        fields.city = self.city.clone();
        fields.country = self.country.clone();
        fields.latitude = Some(self.latitude);
        fields.longitude = Some(self.longitude);
    }
}

/// Address search service
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Suggestions matching a free-text query
    async fn search(&self, query: &str) -> ClientResult<Vec<AddressSuggestion>>;
}

// ============================================================================
// Nominatim
// ============================================================================

/// Nominatim (OpenStreetMap) geocoder
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct Place {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    address: PlaceAddress,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceAddress {
    house_number: Option<String>,
    road: Option<String>,
    suburb: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

impl NominatimGeocoder {
    /// Create a geocoder for the configured service
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sejour/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.geocoder_url.clone(),
        })
    }

    fn to_suggestion(place: Place) -> Option<AddressSuggestion> {
        let latitude = place.lat.parse::<f64>().ok()?;
        let longitude = place.lon.parse::<f64>().ok()?;
        let a = place.address;

        let street = match (a.house_number, a.road) {
            (Some(number), Some(road)) => format!("{} {}", number, road),
            (None, Some(road)) => road,
            _ => a.suburb.clone().unwrap_or_else(|| {
                place
                    .display_name
                    .split(',')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            }),
        };

        Some(AddressSuggestion {
            label: place.display_name,
            address: street,
            city: a.city.or(a.town).or(a.village).or(a.suburb).unwrap_or_default(),
            country: a.country.unwrap_or_default(),
            latitude,
            longitude,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> ClientResult<Vec<AddressSuggestion>> {
        let url = self
            .base_url
            .join("search")
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let limit = SUGGESTION_LIMIT.to_string();
        let response = self
            .http
            .get(url)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        tracing::debug!(query, results = places.len(), "Geocoder search");

        Ok(places.into_iter().filter_map(Self::to_suggestion).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_place_to_suggestion() {
        let place: Place = serde_json::from_str(
            r#"{"display_name":"12, Rue Joss, Bonanjo, Douala, Cameroun","lat":"4.0435",
                "lon":"9.6866","address":{"house_number":"12","road":"Rue Joss",
                "city":"Douala","country":"Cameroun"}}"#,
        )
        .unwrap();
        let suggestion = NominatimGeocoder::to_suggestion(place).unwrap();
        assert_eq!(suggestion.address, "12 Rue Joss");
        assert_eq!(suggestion.city, "Douala");
        assert_eq!(suggestion.latitude, 4.0435);

        let mut fields = AddressFields::default();
        suggestion.apply_to(&mut fields);
        assert_eq!(fields.country, "Cameroun");
        assert_eq!(fields.longitude, Some(9.6866));
    }

    #[test]
    fn test_place_falls_back_to_town_and_label() {
        let place: Place = serde_json::from_str(
            r#"{"display_name":"Kribi Beach, Kribi, Cameroun","lat":"2.93","lon":"9.91",
                "address":{"town":"Kribi","country":"Cameroun"}}"#,
        )
        .unwrap();
        let suggestion = NominatimGeocoder::to_suggestion(place).unwrap();
        assert_eq!(suggestion.address, "Kribi Beach");
        assert_eq!(suggestion.city, "Kribi");
    }

    #[test]
    fn test_bad_coordinates_are_skipped() {
        let place: Place =
            serde_json::from_str(r#"{"display_name":"x","lat":"north","lon":"1"}"#).unwrap();
        assert!(NominatimGeocoder::to_suggestion(place).is_none());
    }
}
