//! Ten-day earnings report for an admin's business.

use axum::{extract::State, Json};
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use workwave_db::EarningsRow;

use crate::auth::AuthAdmin;
use crate::error::ApiError;
use crate::state::SharedState;

const REPORT_DAYS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEarnings {
    pub date: String,
    pub earnings: f64,
}

/// `today` and the `n - 1` days before it, newest first, as `YYYY-MM-DD`.
pub fn last_n_days(today: NaiveDate, n: usize) -> Vec<String> {
    (0..n as i64)
        .map(|offset| (today - Duration::days(offset)).format("%Y-%m-%d").to_string())
        .collect()
}

/// Sum service prices per day. Days with no bookings report 0 and
/// bookings without a service add nothing.
pub fn aggregate_earnings(days: &[String], rows: &[EarningsRow]) -> Vec<DailyEarnings> {
    let mut totals: HashMap<&str, f64> = days.iter().map(|d| (d.as_str(), 0.0)).collect();
    for row in rows {
        if let Some(total) = totals.get_mut(row.booking_date.as_str()) {
            *total += row.price.unwrap_or(0.0);
        }
    }
    days.iter()
        .map(|d| DailyEarnings { date: d.clone(), earnings: totals[d.as_str()] })
        .collect()
}

/// GET /booking/getBookingLast10Days
pub async fn last_10_days(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
) -> Result<Json<Value>, ApiError> {
    let business = state.businesses.first_for_admin(claims.sub).await?
        .ok_or_else(|| ApiError::NotFound("No businesses found for this admin".to_string()))?;

    let days = last_n_days(Utc::now().date_naive(), REPORT_DAYS);
    let rows = state.bookings.earnings_rows(business.id, &days).await?;
    let data = aggregate_earnings(&days, &rows);

    tracing::debug!(business_id = %business.id, bookings = rows.len(), "earnings report built");
    Ok(Json(json!({ "success": true, "data": data })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, price: Option<f64>) -> EarningsRow {
        EarningsRow { booking_date: date.to_string(), price }
    }

    #[test]
    fn test_last_n_days_newest_first_across_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let days = last_n_days(today, 10);
        assert_eq!(days.len(), 10);
        assert_eq!(days[0], "2024-03-03");
        assert_eq!(days[2], "2024-03-01");
        assert_eq!(days[3], "2024-02-29");
        assert_eq!(days[9], "2024-02-23");
    }

    #[test]
    fn test_aggregate_sums_prices_per_day() {
        let days = vec!["2024-05-02".to_string(), "2024-05-01".to_string()];
        let rows = vec![
            row("2024-05-01", Some(500.0)),
            row("2024-05-01", Some(250.5)),
            row("2024-05-01", None),
            row("2024-04-01", Some(999.0)),
        ];
        let report = aggregate_earnings(&days, &rows);
        assert_eq!(report, vec![
            DailyEarnings { date: "2024-05-02".into(), earnings: 0.0 },
            DailyEarnings { date: "2024-05-01".into(), earnings: 750.5 },
        ]);
    }
}
