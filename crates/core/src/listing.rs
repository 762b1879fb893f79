//! Marketplace listing records.
//!
//! A [`Listing`] is one row of the seller's inventory export. Only `uuid` and `listing_id` are
//! required; every other field may be missing or `null` in the export.

use chrono::{DateTime, Utc};
use freakinbeats_uuid::RecordUuid;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single record for sale.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Listing {
    /// Storefront identifier, used in `/detail/<uuid>` paths.
    #[schema(value_type = String, example = "550e8400-e29b-41d4-a716-446655440000")]
    pub uuid: RecordUuid,
    /// Marketplace listing id.
    pub listing_id: String,
    pub status: Option<String>,
    pub condition: Option<String>,
    pub sleeve_condition: Option<String>,
    #[schema(value_type = Option<String>)]
    pub posted: Option<DateTime<Utc>>,
    pub price_value: Option<f64>,
    pub price_currency: Option<String>,
    pub release_title: Option<String>,
    pub release_year: Option<i32>,
    pub artist_names: Option<String>,
    pub primary_artist: Option<String>,
    pub label_names: Option<String>,
    pub format_names: Option<String>,
    pub genres: Option<String>,
    pub styles: Option<String>,
    pub country: Option<String>,
    pub catalog_number: Option<String>,
    pub image_uri: Option<String>,
    #[schema(value_type = Option<String>)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Creates a listing with only the required fields set.
    pub fn new(uuid: RecordUuid, listing_id: impl Into<String>) -> Self {
        Self {
            uuid,
            listing_id: listing_id.into(),
            status: None,
            condition: None,
            sleeve_condition: None,
            posted: None,
            price_value: None,
            price_currency: None,
            release_title: None,
            release_year: None,
            artist_names: None,
            primary_artist: None,
            label_names: None,
            format_names: None,
            genres: None,
            styles: None,
            country: None,
            catalog_number: None,
            image_uri: None,
            updated_at: None,
        }
    }

    /// Short "Artist - Title" label used in logs and the CLI.
    pub fn display_name(&self) -> String {
        let artist = self
            .primary_artist
            .as_deref()
            .or(self.artist_names.as_deref())
            .unwrap_or("Unknown artist");
        let title = self.release_title.as_deref().unwrap_or("Untitled");
        format!("{} - {}", artist, title)
    }
}
