use contracts::dashboards::d001_overview::DashboardSummary;

use crate::shared::http::{api_client, ApiError};

/// Counters for the signed-in user, scoped by the backend.
pub async fn fetch_summary() -> Result<DashboardSummary, ApiError> {
    api_client().get_json("/api/dashboard/summary").await
}
