//! # Product Rate Repository
//!
//! Database operations for per-shift product rates.
//!
//! ## Key Operations
//! - List the rates in effect for one shift (feeds proceeds calculation)
//! - Upsert on (product, shift-type, date)
//!
//! The 15 °C density is derived once at save time from the observations on
//! the form and stored alongside them; readers get the stored value without
//! re-running the correction.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use forecourt_core::validation::RateInput;
use forecourt_core::{ProductRate, ShiftKey, DEFAULT_OUTLET_ID};

/// Repository for product-rate database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.rates();
///
/// let rates = repo.list_for_shift(shift).await?;
/// let rate = rate_for(&rates, &reading.product_id);
/// ```
#[derive(Debug, Clone)]
pub struct RateRepository {
    pool: SqlitePool,
}

const RATE_COLUMNS: &str = "\
    id, outlet_id, product_id, shift_type, shift_date, \
    rate_paise, observed_density_centi, observed_temperature_deci, \
    density_at_15c_centi, created_at, updated_at";

impl RateRepository {
    /// Creates a new RateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RateRepository { pool }
    }

    /// Lists the rates recorded for one shift, ordered by product.
    ///
    /// Products with no row here are unrated for the shift: their readings
    /// reconcile with a zero calculated value and a `rate_missing` flag.
    pub async fn list_for_shift(&self, shift: ShiftKey) -> DbResult<Vec<ProductRate>> {
        debug!(shift = %shift, "Listing product rates for shift");

        let sql = format!(
            "SELECT {RATE_COLUMNS} FROM product_rates \
             WHERE outlet_id = ?1 AND shift_type = ?2 AND shift_date = ?3 \
             ORDER BY product_id"
        );

        let rates = sqlx::query_as::<_, ProductRate>(&sql)
            .bind(DEFAULT_OUTLET_ID)
            .bind(shift.shift_type)
            .bind(shift.date)
            .fetch_all(&self.pool)
            .await?;

        Ok(rates)
    }

    /// Gets the rate for one product in one shift, if recorded.
    pub async fn get_for_product(
        &self,
        product_id: &str,
        shift: ShiftKey,
    ) -> DbResult<Option<ProductRate>> {
        let sql = format!(
            "SELECT {RATE_COLUMNS} FROM product_rates \
             WHERE outlet_id = ?1 AND product_id = ?2 AND shift_type = ?3 AND shift_date = ?4"
        );

        let rate = sqlx::query_as::<_, ProductRate>(&sql)
            .bind(DEFAULT_OUTLET_ID)
            .bind(product_id)
            .bind(shift.shift_type)
            .bind(shift.date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rate)
    }

    /// Inserts or updates the rate for (product, shift-type, date).
    ///
    /// The stored `density_at_15c_centi` is derived here from the form
    /// observations; both-present-and-positive or it stays NULL.
    pub async fn upsert(
        &self,
        shift: ShiftKey,
        product_id: &str,
        input: &RateInput,
    ) -> DbResult<ProductRate> {
        debug!(product_id = %product_id, shift = %shift, "Upserting product rate");

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let observed_density_centi = input.observed_density.map(|d| d.centi());
        let observed_temperature_deci = input.observed_temperature.map(|t| t.deci());
        let density_at_15c_centi = input.density_at_15c().map(|d| d.centi());

        sqlx::query(
            r#"
            INSERT INTO product_rates (
                id, outlet_id, product_id, shift_type, shift_date,
                rate_paise, observed_density_centi, observed_temperature_deci,
                density_at_15c_centi, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11
            )
            ON CONFLICT(outlet_id, product_id, shift_type, shift_date) DO UPDATE SET
                rate_paise = excluded.rate_paise,
                observed_density_centi = excluded.observed_density_centi,
                observed_temperature_deci = excluded.observed_temperature_deci,
                density_at_15c_centi = excluded.density_at_15c_centi,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&id)
        .bind(DEFAULT_OUTLET_ID)
        .bind(product_id)
        .bind(shift.shift_type)
        .bind(shift.date)
        .bind(input.rate.paise())
        .bind(observed_density_centi)
        .bind(observed_temperature_deci)
        .bind(density_at_15c_centi)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_for_product(product_id, shift)
            .await?
            .ok_or_else(|| DbError::not_found("ProductRate", product_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
