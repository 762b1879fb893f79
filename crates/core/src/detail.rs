//! Record detail view state.
//!
//! The detail page decides once, when it is initialised, which listing it shows. The identifier
//! comes from the current path via [`freakinbeats_uuid::resolve_from`]; an absent identifier and
//! an identifier with no matching listing both end up as [`DetailState::NotFound`].

use crate::inventory::InventoryService;
use crate::listing::Listing;
use freakinbeats_uuid::{resolve_from, PathSource, RecordUuid};

/// What the detail page should render.
#[derive(Clone, Debug)]
pub enum DetailState<'a> {
    Found(&'a Listing),
    NotFound,
}

/// Detail page state, fixed at initialisation.
#[derive(Clone, Debug)]
pub struct DetailView<'a> {
    requested: Option<RecordUuid>,
    state: DetailState<'a>,
}

impl<'a> DetailView<'a> {
    /// Resolves the identifier from `source` and looks it up in `inventory`.
    pub fn initialise<S: PathSource + ?Sized>(source: &S, inventory: &'a InventoryService) -> Self {
        let requested = resolve_from(source);
        let state = match requested.as_ref().and_then(|id| inventory.get(id)) {
            Some(listing) => DetailState::Found(listing),
            None => DetailState::NotFound,
        };

        match (&requested, &state) {
            (None, _) => tracing::debug!("no listing identifier in detail path"),
            (Some(id), DetailState::NotFound) => tracing::debug!("no listing with uuid {}", id),
            (Some(id), DetailState::Found(_)) => tracing::debug!("showing listing {}", id),
        }

        Self { requested, state }
    }

    /// The identifier found in the path, with its original case.
    pub fn requested(&self) -> Option<&RecordUuid> {
        self.requested.as_ref()
    }

    pub fn state(&self) -> &DetailState<'a> {
        &self.state
    }

    pub fn listing(&self) -> Option<&'a Listing> {
        match self.state {
            DetailState::Found(listing) => Some(listing),
            DetailState::NotFound => None,
        }
    }
}
