//! # Reading Repository
//!
//! Database operations for shift meter readings.
//!
//! ## Key Operations
//! - List every reading in one shift (feeds the summary aggregation)
//! - Find a nozzle's most recent reading (opening-reading prefill)
//! - Upsert on the natural key (saving twice edits, never duplicates)
//!
//! ## Natural-Key Upsert
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              One Reading per (nozzle, shift-type, date)                 │
//! │                                                                         │
//! │  Attendant submits the entry form for nozzle N, morning 2026-08-28     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT ... ON CONFLICT(outlet_id, nozzle_id, shift_type, shift_date)  │
//! │            DO UPDATE SET <all recorded columns>, updated_at            │
//! │       │                                                                 │
//! │       ├── First save  → new row, fresh id                              │
//! │       └── Second save → same row updated, id and created_at kept       │
//! │                                                                         │
//! │  The UNIQUE index makes racing saves safe: both resolve to the same    │
//! │  row, last writer wins column-by-column.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use forecourt_core::validation::ReadingInput;
use forecourt_core::{Reading, ShiftKey, DEFAULT_OUTLET_ID};

/// Repository for reading database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.readings();
///
/// let shift_readings = repo.list_for_shift(shift).await?;
/// let last = repo.find_last_for_nozzle("nozzle-uuid").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReadingRepository {
    pool: SqlitePool,
}

const READING_COLUMNS: &str = "\
    id, outlet_id, nozzle_id, attendant_id, product_id, \
    shift_type, shift_date, \
    previous_reading_ml, current_reading_ml, testing_ml, \
    cash_sales_paise, credit_sales_paise, upi_sales_paise, card_sales_paise, \
    total_sale_paise, created_at, updated_at";

impl ReadingRepository {
    /// Creates a new ReadingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReadingRepository { pool }
    }

    /// Lists all readings recorded in one shift, ordered by nozzle.
    ///
    /// This is the input set for the per-attendant summary: every nozzle
    /// that has an entry for the (shift-type, date) pair, at most one row
    /// each.
    pub async fn list_for_shift(&self, shift: ShiftKey) -> DbResult<Vec<Reading>> {
        debug!(shift = %shift, "Listing readings for shift");

        let sql = format!(
            "SELECT {READING_COLUMNS} FROM readings \
             WHERE outlet_id = ?1 AND shift_type = ?2 AND shift_date = ?3 \
             ORDER BY nozzle_id"
        );

        let readings = sqlx::query_as::<_, Reading>(&sql)
            .bind(DEFAULT_OUTLET_ID)
            .bind(shift.shift_type)
            .bind(shift.date)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = readings.len(), "Shift readings loaded");
        Ok(readings)
    }

    /// Gets the reading for one nozzle in one shift, if recorded.
    pub async fn get_for_nozzle(
        &self,
        nozzle_id: &str,
        shift: ShiftKey,
    ) -> DbResult<Option<Reading>> {
        let sql = format!(
            "SELECT {READING_COLUMNS} FROM readings \
             WHERE outlet_id = ?1 AND nozzle_id = ?2 AND shift_type = ?3 AND shift_date = ?4"
        );

        let reading = sqlx::query_as::<_, Reading>(&sql)
            .bind(DEFAULT_OUTLET_ID)
            .bind(nozzle_id)
            .bind(shift.shift_type)
            .bind(shift.date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reading)
    }

    /// Finds the most recently recorded reading for a nozzle, across all
    /// shifts.
    ///
    /// Used to prefill the opening meter value when the entry form loads:
    /// the last closing value carries forward as the next opening value.
    /// Recency is by record time, with rowid as the tiebreak for rows
    /// created in the same instant.
    pub async fn find_last_for_nozzle(&self, nozzle_id: &str) -> DbResult<Option<Reading>> {
        debug!(nozzle_id = %nozzle_id, "Finding last reading for nozzle");

        let sql = format!(
            "SELECT {READING_COLUMNS} FROM readings \
             WHERE outlet_id = ?1 AND nozzle_id = ?2 \
             ORDER BY created_at DESC, rowid DESC \
             LIMIT 1"
        );

        let reading = sqlx::query_as::<_, Reading>(&sql)
            .bind(DEFAULT_OUTLET_ID)
            .bind(nozzle_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reading)
    }

    /// Inserts or updates the reading for (nozzle, shift-type, date).
    ///
    /// ## Arguments
    /// * `shift` - The shift instance being edited
    /// * `product_id` - Product snapshot taken from the nozzle at save time
    /// * `input` - Validated form submission
    ///
    /// ## Returns
    /// The stored row after the write (fresh id on first save, original id
    /// and created_at on re-save).
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - nozzle or attendant was removed
    pub async fn upsert(
        &self,
        shift: ShiftKey,
        product_id: &str,
        input: &ReadingInput,
    ) -> DbResult<Reading> {
        debug!(
            nozzle_id = %input.nozzle_id,
            shift = %shift,
            "Upserting reading"
        );

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let total_sale_paise = input.total_sale().paise();

        sqlx::query(
            r#"
            INSERT INTO readings (
                id, outlet_id, nozzle_id, attendant_id, product_id,
                shift_type, shift_date,
                previous_reading_ml, current_reading_ml, testing_ml,
                cash_sales_paise, credit_sales_paise, upi_sales_paise, card_sales_paise,
                total_sale_paise, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7,
                ?8, ?9, ?10,
                ?11, ?12, ?13, ?14,
                ?15, ?16, ?17
            )
            ON CONFLICT(outlet_id, nozzle_id, shift_type, shift_date) DO UPDATE SET
                attendant_id = excluded.attendant_id,
                product_id = excluded.product_id,
                previous_reading_ml = excluded.previous_reading_ml,
                current_reading_ml = excluded.current_reading_ml,
                testing_ml = excluded.testing_ml,
                cash_sales_paise = excluded.cash_sales_paise,
                credit_sales_paise = excluded.credit_sales_paise,
                upi_sales_paise = excluded.upi_sales_paise,
                card_sales_paise = excluded.card_sales_paise,
                total_sale_paise = excluded.total_sale_paise,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&id)
        .bind(DEFAULT_OUTLET_ID)
        .bind(&input.nozzle_id)
        .bind(&input.attendant_id)
        .bind(product_id)
        .bind(shift.shift_type)
        .bind(shift.date)
        .bind(input.previous_reading.milliliters())
        .bind(input.current_reading.milliliters())
        .bind(input.testing.milliliters())
        .bind(input.cash_sales.paise())
        .bind(input.credit_sales.paise())
        .bind(input.upi_sales.paise())
        .bind(input.card_sales.paise())
        .bind(total_sale_paise)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        // Re-fetch: on conflict the stored id is the original one, not ours
        self.get_for_nozzle(&input.nozzle_id, shift)
            .await?
            .ok_or_else(|| DbError::not_found("Reading", &input.nozzle_id))
    }

    /// Counts readings recorded in one shift (for diagnostics).
    pub async fn count_for_shift(&self, shift: ShiftKey) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM readings \
             WHERE outlet_id = ?1 AND shift_type = ?2 AND shift_date = ?3",
        )
        .bind(DEFAULT_OUTLET_ID)
        .bind(shift.shift_type)
        .bind(shift.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{reading_form, seed_outlet, setup_db, shift};
    use forecourt_core::ShiftType;

    #[tokio::test]
    async fn test_upsert_creates_then_edits() {
        let db = setup_db().await;
        seed_outlet(&db).await;

        let repo = db.readings();
        let morning = shift(ShiftType::Morning, 2026, 8, 28);

        let input = reading_form("att-1", "noz-1", "1000", "1150", "5")
            .validate()
            .unwrap();
        let first = repo.upsert(morning, "petrol", &input).await.unwrap();
        assert_eq!(first.previous_reading_ml, 1_000_000);
        assert_eq!(first.current_reading_ml, 1_150_000);
        assert_eq!(first.product_id, "petrol");

        // Second save for the same nozzle and shift edits in place
        let edited = reading_form("att-1", "noz-1", "1000", "1160", "5")
            .validate()
            .unwrap();
        let second = repo.upsert(morning, "petrol", &edited).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.current_reading_ml, 1_160_000);

        assert_eq!(repo.count_for_shift(morning).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_for_shift_filters_by_shift() {
        let db = setup_db().await;
        seed_outlet(&db).await;

        let repo = db.readings();
        let morning = shift(ShiftType::Morning, 2026, 8, 28);
        let evening = shift(ShiftType::Evening, 2026, 8, 28);

        let a = reading_form("att-1", "noz-1", "1000", "1150", "0")
            .validate()
            .unwrap();
        let b = reading_form("att-1", "noz-2", "500", "620", "0")
            .validate()
            .unwrap();
        let c = reading_form("att-1", "noz-1", "1150", "1300", "0")
            .validate()
            .unwrap();

        repo.upsert(morning, "petrol", &a).await.unwrap();
        repo.upsert(morning, "diesel", &b).await.unwrap();
        repo.upsert(evening, "petrol", &c).await.unwrap();

        let morning_rows = repo.list_for_shift(morning).await.unwrap();
        assert_eq!(morning_rows.len(), 2);

        let evening_rows = repo.list_for_shift(evening).await.unwrap();
        assert_eq!(evening_rows.len(), 1);
        assert_eq!(evening_rows[0].current_reading_ml, 1_300_000);
    }

    #[tokio::test]
    async fn test_find_last_for_nozzle_prefers_latest() {
        let db = setup_db().await;
        seed_outlet(&db).await;

        let repo = db.readings();
        let morning = shift(ShiftType::Morning, 2026, 8, 28);
        let evening = shift(ShiftType::Evening, 2026, 8, 28);

        let first = reading_form("att-1", "noz-1", "1000", "1150", "0")
            .validate()
            .unwrap();
        let later = reading_form("att-1", "noz-1", "1150", "1280", "0")
            .validate()
            .unwrap();

        repo.upsert(morning, "petrol", &first).await.unwrap();
        repo.upsert(evening, "petrol", &later).await.unwrap();

        let last = repo.find_last_for_nozzle("noz-1").await.unwrap().unwrap();
        assert_eq!(last.current_reading_ml, 1_280_000);

        // Nozzle with no history: nothing to carry forward
        assert!(repo.find_last_for_nozzle("noz-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_rejects_unknown_nozzle() {
        let db = setup_db().await;
        seed_outlet(&db).await;

        let repo = db.readings();
        let morning = shift(ShiftType::Morning, 2026, 8, 28);

        let input = reading_form("att-1", "no-such-nozzle", "0", "10", "0")
            .validate()
            .unwrap();
        let err = repo.upsert(morning, "petrol", &input).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
