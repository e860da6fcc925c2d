// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod store;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    routing::{delete, get, post},
};
use capacity_api::{
    APPOINTMENT_SLOTS_PATH, AppointmentSlotsResponse, CAPACITY_STREAMS_PATH,
    CapacityStreamResponse, DATE_RANGES_PATH, DELETE_PATH, DateRangeListResponse,
    DeleteCapacityResponse, DeleteQuery, HIERARCHY_PATH, HierarchyResponse, TABLE_DATA_PATH,
    TableDataQuery, TableDataResponse, TerritoryQuery, UPDATE_PATH, UpdateCapacityRequest,
    UpdateCapacityResponse,
};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use store::{Fixture, FixtureStore};
use tokio::sync::Mutex;
use tracing::info;

/// Capacity Server - fixture backend for the Default Capacity manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON fixture file. If not provided, uses the built-in sample.
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The in-memory capacity data.
    store: Arc<Mutex<FixtureStore>>,
}

impl AppState {
    fn new(store: FixtureStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Handler for GET `/getServiceTerritoryHierarchy`.
async fn handle_get_hierarchy(
    AxumState(app_state): AxumState<AppState>,
) -> Json<HierarchyResponse> {
    info!("Handling hierarchy request");
    Json(app_state.store.lock().await.hierarchy())
}

/// Handler for GET `/getCapacityStreamHierarchy`.
async fn handle_get_capacity_streams(
    AxumState(app_state): AxumState<AppState>,
) -> Json<CapacityStreamResponse> {
    info!("Handling capacity stream request");
    Json(app_state.store.lock().await.capacity_streams())
}

/// Handler for GET `/getAppointmentSlotsHierarchy`.
async fn handle_get_appointment_slots(
    AxumState(app_state): AxumState<AppState>,
) -> Json<AppointmentSlotsResponse> {
    info!("Handling appointment slot request");
    Json(app_state.store.lock().await.appointment_slots())
}

/// Handler for GET `/getCalendarizedDateRangeForTerritory`.
async fn handle_get_date_ranges(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<TerritoryQuery>,
) -> Json<DateRangeListResponse> {
    info!(
        territory_id = query.service_territory_id,
        "Handling date range request"
    );
    Json(
        app_state
            .store
            .lock()
            .await
            .date_ranges(query.service_territory_id),
    )
}

/// Handler for GET `/getCapacityTableData`.
async fn handle_get_table_data(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<TableDataQuery>,
) -> Json<TableDataResponse> {
    info!(
        territory_id = query.service_territory_id,
        cust_date_id = ?query.cust_date_id,
        "Handling table data request"
    );
    Json(
        app_state
            .store
            .lock()
            .await
            .table_data(query.service_territory_id, query.cust_date_id),
    )
}

/// Handler for POST `/updateServiceTerritoryCapacityHours`.
///
/// Applies the change to the primary territory and every bulk territory.
async fn handle_update_capacity(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpdateCapacityRequest>,
) -> Json<UpdateCapacityResponse> {
    info!(
        territory_id = req.service_territory,
        calendarization = %req.calendarization,
        username = %req.username,
        bulk = req.bulk_territories.len(),
        "Handling update request"
    );
    Json(app_state.store.lock().await.update(&req))
}

/// Handler for DELETE `/deleteCapacityData`.
async fn handle_delete_capacity(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Json<DeleteCapacityResponse> {
    info!(cust_date_id = query.cust_date_id, "Handling delete request");
    Json(app_state.store.lock().await.delete(query.cust_date_id))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(&format!("/{HIERARCHY_PATH}"), get(handle_get_hierarchy))
        .route(
            &format!("/{CAPACITY_STREAMS_PATH}"),
            get(handle_get_capacity_streams),
        )
        .route(
            &format!("/{APPOINTMENT_SLOTS_PATH}"),
            get(handle_get_appointment_slots),
        )
        .route(&format!("/{DATE_RANGES_PATH}"), get(handle_get_date_ranges))
        .route(&format!("/{TABLE_DATA_PATH}"), get(handle_get_table_data))
        .route(&format!("/{UPDATE_PATH}"), post(handle_update_capacity))
        .route(&format!("/{DELETE_PATH}"), delete(handle_delete_capacity))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Capacity Server");

    let fixture: Fixture = if let Some(path) = &args.fixture {
        info!("Loading fixture from: {}", path.display());
        Fixture::from_file(path)?
    } else {
        info!("Using built-in sample fixture");
        Fixture::sample()?
    };

    let app: Router = build_router(AppState::new(FixtureStore::new(fixture)));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
