//! # Stock Entry Repository
//!
//! Database operations for per-shift tank stock entries.
//!
//! Recorded values only: opening dip, receipt volume, invoice value. The
//! same natural-key discipline as readings applies, one entry per
//! (tank, shift-type, date).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use forecourt_core::validation::StockEntryInput;
use forecourt_core::{ShiftKey, StockEntry, DEFAULT_OUTLET_ID};

/// Repository for stock-entry database operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

const STOCK_COLUMNS: &str = "\
    id, outlet_id, tank_id, shift_type, shift_date, \
    opening_stock_ml, receipt_ml, invoice_value_paise, created_at, updated_at";

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Lists the stock entries recorded for one shift, ordered by tank.
    pub async fn list_for_shift(&self, shift: ShiftKey) -> DbResult<Vec<StockEntry>> {
        debug!(shift = %shift, "Listing stock entries for shift");

        let sql = format!(
            "SELECT {STOCK_COLUMNS} FROM stock_entries \
             WHERE outlet_id = ?1 AND shift_type = ?2 AND shift_date = ?3 \
             ORDER BY tank_id"
        );

        let entries = sqlx::query_as::<_, StockEntry>(&sql)
            .bind(DEFAULT_OUTLET_ID)
            .bind(shift.shift_type)
            .bind(shift.date)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// Gets the stock entry for one tank in one shift, if recorded.
    pub async fn get_for_tank(
        &self,
        tank_id: &str,
        shift: ShiftKey,
    ) -> DbResult<Option<StockEntry>> {
        let sql = format!(
            "SELECT {STOCK_COLUMNS} FROM stock_entries \
             WHERE outlet_id = ?1 AND tank_id = ?2 AND shift_type = ?3 AND shift_date = ?4"
        );

        let entry = sqlx::query_as::<_, StockEntry>(&sql)
            .bind(DEFAULT_OUTLET_ID)
            .bind(tank_id)
            .bind(shift.shift_type)
            .bind(shift.date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    /// Inserts or updates the stock entry for (tank, shift-type, date).
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - tank was removed
    pub async fn upsert(
        &self,
        shift: ShiftKey,
        tank_id: &str,
        input: &StockEntryInput,
    ) -> DbResult<StockEntry> {
        debug!(tank_id = %tank_id, shift = %shift, "Upserting stock entry");

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO stock_entries (
                id, outlet_id, tank_id, shift_type, shift_date,
                opening_stock_ml, receipt_ml, invoice_value_paise,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10
            )
            ON CONFLICT(outlet_id, tank_id, shift_type, shift_date) DO UPDATE SET
                opening_stock_ml = excluded.opening_stock_ml,
                receipt_ml = excluded.receipt_ml,
                invoice_value_paise = excluded.invoice_value_paise,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&id)
        .bind(DEFAULT_OUTLET_ID)
        .bind(tank_id)
        .bind(shift.shift_type)
        .bind(shift.date)
        .bind(input.opening_stock.milliliters())
        .bind(input.receipt.milliliters())
        .bind(input.invoice_value.paise())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_for_tank(tank_id, shift)
            .await?
            .ok_or_else(|| DbError::not_found("StockEntry", tank_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_outlet, setup_db, shift};
    use forecourt_core::validation::StockEntryForm;
    use forecourt_core::ShiftType;

    #[tokio::test]
    async fn test_upsert_records_and_edits() {
        let db = setup_db().await;
        seed_outlet(&db).await;

        let repo = db.stock();
        let morning = shift(ShiftType::Morning, 2026, 8, 28);

        let input = StockEntryForm {
            opening_stock: "12000".into(),
            receipt: "8000".into(),
            invoice_value: "720000.00".into(),
        }
        .validate()
        .unwrap();

        let first = repo.upsert(morning, "tank-1", &input).await.unwrap();
        assert_eq!(first.opening_stock_ml, 12_000_000);
        assert_eq!(first.receipt_ml, 8_000_000);
        assert_eq!(first.invoice_value_paise, 72_000_000);

        let corrected = StockEntryForm {
            opening_stock: "12000".into(),
            receipt: "8000".into(),
            invoice_value: "718500.00".into(),
        }
        .validate()
        .unwrap();
        let second = repo.upsert(morning, "tank-1", &corrected).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.invoice_value_paise, 71_850_000);

        assert_eq!(repo.list_for_shift(morning).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_form_stores_zeroes() {
        let db = setup_db().await;
        seed_outlet(&db).await;

        let repo = db.stock();
        let night = shift(ShiftType::Night, 2026, 8, 28);

        let input = StockEntryForm::default().validate().unwrap();
        let stored = repo.upsert(night, "tank-1", &input).await.unwrap();

        assert_eq!(stored.opening_stock_ml, 0);
        assert_eq!(stored.receipt_ml, 0);
        assert_eq!(stored.invoice_value_paise, 0);
    }

    #[tokio::test]
    async fn test_upsert_rejects_unknown_tank() {
        let db = setup_db().await;
        seed_outlet(&db).await;

        let repo = db.stock();
        let morning = shift(ShiftType::Morning, 2026, 8, 28);

        let input = StockEntryForm::default().validate().unwrap();
        let err = repo.upsert(morning, "no-such-tank", &input).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
