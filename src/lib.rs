//! # Freakinbeats storefront
//!
//! HTTP surface of the record shop.
//!
//! Handles:
//! - Page shells for the index, cart and record detail pages
//! - The JSON inventory API under `/api`
//! - OpenAPI/Swagger documentation and request access logging
//!
//! Uses `freakinbeats-core` for the inventory and detail page state.

#![warn(rust_2018_idioms)]

use axum::{
    Router,
    extract::{OriginalUri, Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
};
use freakinbeats_core::{
    DetailView, FacetCount, InventoryFacets, InventoryService, InventoryStats, Listing, PathSource,
    RecordUuid, SearchQuery,
};
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

const INDEX_PAGE: &str = include_str!("../static/index.html");
const CART_PAGE: &str = include_str!("../static/cart.html");
const DETAIL_PAGE: &str = include_str!("../static/detail.html");
const NOT_FOUND_PAGE: &str = include_str!("../static/not_found.html");

/// Placeholder in the detail page shell replaced by the resolved listing UUID.
const LISTING_UUID_SLOT: &str = "{{listing_uuid}}";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    inventory: Arc<InventoryService>,
}

/// Health check response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_listings,
        get_listing_by_id,
        search_listings,
        filter_listings,
        inventory_facets,
        inventory_stats,
        get_listing
    ),
    components(schemas(HealthRes, Listing, InventoryStats, InventoryFacets, FacetCount))
)]
struct ApiDoc;

/// Adapts the request URI to the detail page's path source.
struct RequestLocation<'a>(&'a Uri);

impl PathSource for RequestLocation<'_> {
    fn current_path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0.path())
    }
}

/// Builds the storefront router.
///
/// Paths no route claims are handed to the detail page, so a detail path nested under a prefix
/// (`/shop/vinyl/detail/<uuid>`) is served too. Anything that does not resolve to a listing,
/// including `/detail/` paths without a valid identifier, gets the not-found page with 404.
pub fn app(inventory: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/cart", get(cart))
        .route("/detail/*rest", get(detail))
        .route("/health", get(health))
        .route("/api/data", get(list_listings))
        .route("/api/data/:listing_id", get(get_listing_by_id))
        .route("/api/search", get(search_listings))
        .route("/api/filter", get(filter_listings))
        .route("/api/facets", get(inventory_facets))
        .route("/api/stats", get(inventory_stats))
        .route("/api/listings/:uuid", get(get_listing))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(detail)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(AppState { inventory })
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn cart() -> Html<&'static str> {
    Html(CART_PAGE)
}

/// Record detail page.
///
/// The identifier is resolved once from the request path. The page shell is served with the
/// identifier embedded only when it names a listing in the inventory.
async fn detail(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> Response {
    let view = DetailView::initialise(&RequestLocation(&uri), &state.inventory);
    match view.requested().filter(|_| view.listing().is_some()) {
        Some(uuid) => Html(DETAIL_PAGE.replace(LISTING_UUID_SLOT, uuid.as_str())).into_response(),
        None => not_found().await.into_response(),
    }
}

async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring.
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Freakinbeats is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/data",
    responses(
        (status = 200, description = "All listings, newest first", body = [Listing])
    )
)]
/// List every listing in the inventory.
async fn list_listings(State(state): State<AppState>) -> Json<Vec<Listing>> {
    Json(state.inventory.all().to_vec())
}

#[utoipa::path(
    get,
    path = "/api/data/{listing_id}",
    params(
        ("listing_id" = String, Path, description = "Marketplace listing id")
    ),
    responses(
        (status = 200, description = "The listing", body = Listing),
        (status = 404, description = "No listing with this id")
    )
)]
/// Fetch a single listing by its marketplace listing id.
async fn get_listing_by_id(
    State(state): State<AppState>,
    Path(listing_id): Path<String>,
) -> Result<Json<Listing>, (StatusCode, &'static str)> {
    state
        .inventory
        .get_by_listing_id(&listing_id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Listing not found"))
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching listings, newest first", body = [Listing])
    )
)]
/// Search listings by free text, artist, genre and format.
///
/// The `condition` filter is only honoured by `/api/filter`.
async fn search_listings(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Listing>> {
    let query = SearchQuery {
        condition: None,
        ..query
    };
    Json(run_search(&state.inventory, &query))
}

#[utoipa::path(
    get,
    path = "/api/filter",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching listings, newest first", body = [Listing])
    )
)]
/// Filter listings by every search field plus media condition.
async fn filter_listings(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Listing>> {
    Json(run_search(&state.inventory, &query))
}

fn run_search(inventory: &InventoryService, query: &SearchQuery) -> Vec<Listing> {
    let results = inventory.search(query);
    tracing::debug!("search {:?} matched {} listings", query, results.len());
    results.into_iter().cloned().collect()
}

#[utoipa::path(
    get,
    path = "/api/facets",
    responses(
        (status = 200, description = "Distinct values with listing counts", body = InventoryFacets)
    )
)]
/// Distinct artists, labels, years and conditions, most common first.
async fn inventory_facets(State(state): State<AppState>) -> Json<InventoryFacets> {
    Json(state.inventory.facets())
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Inventory statistics", body = InventoryStats)
    )
)]
/// Inventory totals and last update time.
async fn inventory_stats(State(state): State<AppState>) -> Json<InventoryStats> {
    Json(state.inventory.stats())
}

#[utoipa::path(
    get,
    path = "/api/listings/{uuid}",
    params(
        ("uuid" = String, Path, description = "Listing UUID in 8-4-4-4-12 form")
    ),
    responses(
        (status = 200, description = "The listing", body = Listing),
        (status = 400, description = "Malformed UUID"),
        (status = 404, description = "No listing with this UUID")
    )
)]
/// Fetch a single listing by UUID.
///
/// # Errors
/// Returns `400 Bad Request` if the UUID is malformed and `404 Not Found` if no listing has it.
async fn get_listing(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<Listing>, (StatusCode, &'static str)> {
    let uuid = RecordUuid::parse(&uuid).map_err(|e| {
        tracing::warn!("Rejected listing lookup: {}", e);
        (StatusCode::BAD_REQUEST, "Invalid listing UUID")
    })?;
    state
        .inventory
        .get(&uuid)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Listing not found"))
}
