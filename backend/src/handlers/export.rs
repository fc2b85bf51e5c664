use axum::{
    extract::{Extension, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::models::account::Account;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle as vehicle_repo;
use crate::services::export::{self, ExportDocument};
use crate::state::AppState;

const VEHICLE_CSV_HEADERS: [&str; 5] = ["Make", "Model", "Year", "VIN", "Created At"];

/// Downloads the caller's vehicles as CSV. Admins get every vehicle on the
/// platform.
pub async fn export_vehicles_csv(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<impl IntoResponse, AppError> {
    let vehicles = visible_vehicles(&state, &account).await?;

    let rows = vehicles
        .iter()
        .map(|v| {
            vec![
                v.make.clone(),
                v.model.clone(),
                v.year.to_string(),
                v.vin.clone(),
                v.created_at.to_rfc3339(),
            ]
        })
        .collect();

    let doc = export::csv_document("vehicles", &VEHICLE_CSV_HEADERS, rows)?;
    Ok(download_response(doc))
}

/// Downloads the caller's vehicles as a PDF report.
pub async fn export_vehicles_pdf(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<impl IntoResponse, AppError> {
    let vehicles = visible_vehicles(&state, &account).await?;

    let lines: Vec<String> = vehicles
        .iter()
        .map(|v| format!("{} | VIN {} | added {}", v.summary(), v.vin, v.created_at.to_rfc3339()))
        .collect();

    let doc = export::pdf_document("vehicles", "Vehicle Report", &lines)?;
    Ok(download_response(doc))
}

async fn visible_vehicles(state: &AppState, account: &Account) -> Result<Vec<Vehicle>, AppError> {
    let vehicles = if account.is_admin() {
        vehicle_repo::list_all(&state.pool).await?
    } else {
        vehicle_repo::list_for_owner(&state.pool, &account.id).await?
    };
    Ok(vehicles)
}

pub(crate) fn download_response(doc: ExportDocument) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(doc.content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", doc.filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    (headers, doc.bytes)
}
