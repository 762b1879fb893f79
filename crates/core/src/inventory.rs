//! Read-only inventory of listings.
//!
//! The inventory is loaded once from the marketplace export at startup and never mutated
//! afterwards, so it can be shared between request handlers behind an `Arc` without locking.

use crate::listing::Listing;
use crate::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use freakinbeats_uuid::{RecordUuid, Uuid};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use utoipa::{IntoParams, ToSchema};

/// Optional filters for [`InventoryService::search`].
///
/// All provided filters must match. Blank values are ignored.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matches release title or artist names.
    pub q: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub format: Option<String>,
    /// Exact media condition, e.g. `Near Mint (NM or M-)`. Case is ignored.
    pub condition: Option<String>,
}

/// One distinct value of a listing field and how many listings carry it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Distinct values of the filterable fields, most common first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct InventoryFacets {
    pub artists: Vec<FacetCount>,
    pub labels: Vec<FacetCount>,
    pub years: Vec<FacetCount>,
    pub conditions: Vec<FacetCount>,
    pub sleeve_conditions: Vec<FacetCount>,
}

/// Summary figures for the whole inventory.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct InventoryStats {
    pub total_listings: usize,
    #[schema(value_type = Option<String>)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Listings held in memory, newest first.
#[derive(Clone, Debug, Default)]
pub struct InventoryService {
    listings: Vec<Listing>,
}

impl InventoryService {
    /// Loads the inventory from a JSON array of listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or contains the same
    /// listing UUID twice.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::InventoryRead {
            path: path.to_path_buf(),
            source,
        })?;
        let listings: Vec<Listing> =
            serde_json::from_str(&raw).map_err(|source| StoreError::InventoryParse {
                path: path.to_path_buf(),
                source,
            })?;

        let service = Self::from_listings(listings)?;
        tracing::info!(
            "loaded {} listings from {}",
            service.len(),
            path.display()
        );
        Ok(service)
    }

    /// Builds an inventory from listings already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateListing`] if two listings share a UUID.
    pub fn from_listings(mut listings: Vec<Listing>) -> StoreResult<Self> {
        let mut seen: HashSet<Uuid> = HashSet::with_capacity(listings.len());
        for listing in &listings {
            if !seen.insert(listing.uuid.uuid()) {
                return Err(StoreError::DuplicateListing(listing.uuid.to_string()));
            }
        }

        // `None` sorts first ascending, so listings without a posted date end up last.
        listings.sort_by(|a, b| b.posted.cmp(&a.posted));
        Ok(Self { listings })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// All listings, sorted by posted date (newest first).
    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    /// Looks a listing up by UUID, ignoring the case it was written in.
    pub fn get(&self, uuid: &RecordUuid) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.uuid == *uuid)
    }

    /// Looks a listing up by its marketplace listing id.
    pub fn get_by_listing_id(&self, listing_id: &str) -> Option<&Listing> {
        self.listings
            .iter()
            .find(|listing| listing.listing_id == listing_id)
    }

    /// Returns the listings matching every filter in `query`, newest first.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Listing> {
        let q = needle(query.q.as_deref());
        let artist = needle(query.artist.as_deref());
        let genre = needle(query.genre.as_deref());
        let format = needle(query.format.as_deref());
        let condition = needle(query.condition.as_deref());

        self.listings
            .iter()
            .filter(|listing| {
                q.as_deref().map_or(true, |n| {
                    contains(listing.release_title.as_deref(), n)
                        || contains(listing.artist_names.as_deref(), n)
                })
            })
            .filter(|listing| {
                artist
                    .as_deref()
                    .map_or(true, |n| contains(listing.artist_names.as_deref(), n))
            })
            .filter(|listing| {
                genre
                    .as_deref()
                    .map_or(true, |n| contains(listing.genres.as_deref(), n))
            })
            .filter(|listing| {
                format
                    .as_deref()
                    .map_or(true, |n| contains(listing.format_names.as_deref(), n))
            })
            .filter(|listing| {
                condition.as_deref().map_or(true, |n| {
                    needle(listing.condition.as_deref()).as_deref() == Some(n)
                })
            })
            .collect()
    }

    /// Counts the distinct artists, labels, years and conditions across the inventory.
    pub fn facets(&self) -> InventoryFacets {
        let listings = &self.listings;
        InventoryFacets {
            artists: tally(listings.iter().map(|l| {
                l.primary_artist
                    .as_deref()
                    .or(l.artist_names.as_deref())
                    .map(str::to_string)
            })),
            labels: tally(listings.iter().map(|l| l.label_names.clone())),
            years: tally(listings.iter().map(|l| l.release_year.map(|y| y.to_string()))),
            conditions: tally(listings.iter().map(|l| l.condition.clone())),
            sleeve_conditions: tally(listings.iter().map(|l| l.sleeve_condition.clone())),
        }
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats {
            total_listings: self.listings.len(),
            last_updated: self.listings.iter().filter_map(|l| l.updated_at).max(),
        }
    }
}

/// Lowercased filter value, or `None` when blank.
fn needle(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Counts non-blank values, sorted by count descending then value.
fn tally(values: impl Iterator<Item = Option<String>>) -> Vec<FacetCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values.flatten() {
        let value = value.trim();
        if !value.is_empty() {
            *counts.entry(value.to_string()).or_default() += 1;
        }
    }

    let mut facets: Vec<FacetCount> = counts
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect();
    facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn listing(uuid: &str, listing_id: &str, posted_day: Option<u32>) -> Listing {
        let mut listing = Listing::new(RecordUuid::parse(uuid).unwrap(), listing_id);
        listing.posted =
            posted_day.map(|day| Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap());
        listing
    }

    fn sample() -> InventoryService {
        let mut floyd = listing("550e8400-e29b-41d4-a716-446655440000", "1001", Some(1));
        floyd.release_title = Some("Animals".into());
        floyd.artist_names = Some("Pink Floyd".into());
        floyd.genres = Some("Rock".into());
        floyd.format_names = Some("Vinyl, LP, Album".into());
        floyd.condition = Some("Very Good Plus (VG+)".into());
        floyd.sleeve_condition = Some("Very Good (VG)".into());
        floyd.label_names = Some("Harvest".into());
        floyd.release_year = Some(1977);
        floyd.updated_at = Some(Utc.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap());

        let mut shadow = listing("123e4567-e89b-12d3-a456-426614174000", "1002", Some(5));
        shadow.release_title = Some("Endtroducing.....".into());
        shadow.artist_names = Some("DJ Shadow".into());
        shadow.genres = Some("Electronic, Hip Hop".into());
        shadow.format_names = Some("Vinyl, LP".into());
        shadow.condition = Some("Near Mint (NM or M-)".into());
        shadow.sleeve_condition = Some("Very Good (VG)".into());
        shadow.label_names = Some("Mo' Wax".into());
        shadow.primary_artist = Some("DJ Shadow".into());
        shadow.release_year = Some(1996);
        shadow.updated_at = Some(Utc.with_ymd_and_hms(2024, 4, 9, 8, 0, 0).unwrap());

        let mut krush = listing("a1b2c3d4-0000-4000-8000-00000000abcd", "1003", None);
        krush.release_title = Some("Strictly Turntablized".into());
        krush.artist_names = Some("DJ Krush".into());
        krush.genres = Some("Electronic".into());
        krush.format_names = Some("CD, Album".into());
        krush.condition = Some("Near Mint (NM or M-)".into());
        krush.label_names = Some("Mo' Wax".into());
        krush.release_year = Some(1994);

        InventoryService::from_listings(vec![floyd, krush, shadow]).unwrap()
    }

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.listing_id.clone()).collect()
    }

    #[test]
    fn all_is_newest_first_with_undated_last() {
        let inventory = sample();
        let order: Vec<&str> = inventory
            .all()
            .iter()
            .map(|l| l.listing_id.as_str())
            .collect();

        assert_eq!(order, vec!["1002", "1001", "1003"]);
    }

    #[test]
    fn get_ignores_case() {
        let inventory = sample();
        let upper = RecordUuid::parse("550E8400-E29B-41D4-A716-446655440000").unwrap();

        assert_eq!(inventory.get(&upper).unwrap().listing_id, "1001");
    }

    #[test]
    fn get_unknown_is_none() {
        let inventory = sample();
        assert!(inventory.get(&RecordUuid::new()).is_none());
    }

    #[test]
    fn get_by_listing_id() {
        let inventory = sample();

        assert_eq!(
            inventory.get_by_listing_id("1003").unwrap().display_name(),
            "DJ Krush - Strictly Turntablized"
        );
        assert!(inventory.get_by_listing_id("9999").is_none());
    }

    #[test]
    fn duplicate_uuids_rejected() {
        let a = listing("550e8400-e29b-41d4-a716-446655440000", "1", None);
        let b = listing("550E8400-E29B-41D4-A716-446655440000", "2", None);

        let result = InventoryService::from_listings(vec![a, b]);
        assert!(matches!(result, Err(StoreError::DuplicateListing(_))));
    }

    #[test]
    fn search_by_free_text() {
        let inventory = sample();
        let query = SearchQuery {
            q: Some("dj".into()),
            ..Default::default()
        };

        assert_eq!(ids(&inventory.search(&query)), vec!["1002", "1003"]);
    }

    #[test]
    fn search_matches_title_too() {
        let inventory = sample();
        let query = SearchQuery {
            q: Some("ANIMALS".into()),
            ..Default::default()
        };

        assert_eq!(ids(&inventory.search(&query)), vec!["1001"]);
    }

    #[test]
    fn search_filters_combine() {
        let inventory = sample();
        let query = SearchQuery {
            genre: Some("electronic".into()),
            format: Some("vinyl".into()),
            ..Default::default()
        };

        assert_eq!(ids(&inventory.search(&query)), vec!["1002"]);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let inventory = sample();
        let query = SearchQuery {
            q: Some("   ".into()),
            artist: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(inventory.search(&query).len(), 3);
    }

    #[test]
    fn search_by_condition_is_exact() {
        let inventory = sample();
        let near_mint = SearchQuery {
            condition: Some(" near mint (nm or m-) ".into()),
            ..Default::default()
        };
        let partial = SearchQuery {
            condition: Some("Near Mint".into()),
            ..Default::default()
        };

        assert_eq!(ids(&inventory.search(&near_mint)), vec!["1002", "1003"]);
        assert!(inventory.search(&partial).is_empty());
    }

    #[test]
    fn search_combines_condition_with_text() {
        let inventory = sample();
        let query = SearchQuery {
            q: Some("krush".into()),
            condition: Some("Near Mint (NM or M-)".into()),
            ..Default::default()
        };

        assert_eq!(ids(&inventory.search(&query)), vec!["1003"]);
    }

    #[test]
    fn facets_count_distinct_values() {
        let facets = sample().facets();
        let pairs = |list: &[FacetCount]| -> Vec<(String, usize)> {
            list.iter().map(|f| (f.value.clone(), f.count)).collect()
        };

        assert_eq!(
            pairs(&facets.artists),
            vec![
                ("DJ Krush".to_string(), 1),
                ("DJ Shadow".to_string(), 1),
                ("Pink Floyd".to_string(), 1),
            ]
        );
        assert_eq!(
            pairs(&facets.labels),
            vec![("Mo' Wax".to_string(), 2), ("Harvest".to_string(), 1)]
        );
        assert_eq!(
            pairs(&facets.years),
            vec![
                ("1977".to_string(), 1),
                ("1994".to_string(), 1),
                ("1996".to_string(), 1),
            ]
        );
        assert_eq!(facets.conditions[0].value, "Near Mint (NM or M-)");
        assert_eq!(facets.conditions[0].count, 2);
        assert_eq!(
            pairs(&facets.sleeve_conditions),
            vec![("Very Good (VG)".to_string(), 2)]
        );
    }

    #[test]
    fn facets_skip_blank_values() {
        let mut blank = listing("550e8400-e29b-41d4-a716-446655440000", "1", None);
        blank.condition = Some("  ".into());
        let inventory = InventoryService::from_listings(vec![blank]).unwrap();

        assert_eq!(inventory.facets(), InventoryFacets::default());
    }

    #[test]
    fn stats_reports_latest_update() {
        let inventory = sample();
        let stats = inventory.stats();

        assert_eq!(stats.total_listings, 3);
        assert_eq!(
            stats.last_updated,
            Some(Utc.with_ymd_and_hms(2024, 4, 9, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn stats_on_empty_inventory() {
        let stats = InventoryService::default().stats();

        assert_eq!(
            stats,
            InventoryStats {
                total_listings: 0,
                last_updated: None
            }
        );
    }

    #[test]
    fn load_reads_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        std::fs::write(
            &file,
            r#"[
                {"uuid": "550e8400-e29b-41d4-a716-446655440000", "listing_id": "1001",
                 "posted": "2024-03-01T12:00:00Z"},
                {"uuid": "123e4567-e89b-12d3-a456-426614174000", "listing_id": "1002",
                 "posted": "2024-03-05T12:00:00Z"}
            ]"#,
        )
        .unwrap();

        let inventory = InventoryService::load(&file).unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.all()[0].listing_id, "1002");
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = InventoryService::load(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(StoreError::InventoryRead { .. })));
    }

    #[test]
    fn load_malformed_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        std::fs::write(&file, r#"{"not": "an array"}"#).unwrap();

        let result = InventoryService::load(&file);
        assert!(matches!(result, Err(StoreError::InventoryParse { .. })));
    }
}
