//! # Outlet Configuration Repository
//!
//! Read access to the outlet's physical configuration: nozzles, tanks, and
//! the attendant roster.
//!
//! Configuration rows are soft-deleted (`is_active = 0`) rather than
//! removed, so historical readings keep valid foreign keys. The listing
//! methods here return only active rows, which is what entry forms show.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use forecourt_core::{Attendant, Nozzle, Tank, DEFAULT_OUTLET_ID};

/// Repository for outlet configuration lookups.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.outlet();
///
/// let nozzles = repo.list_nozzles().await?;
/// let attendants = repo.list_attendants().await?;
/// ```
#[derive(Debug, Clone)]
pub struct OutletRepository {
    pool: SqlitePool,
}

impl OutletRepository {
    /// Creates a new OutletRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OutletRepository { pool }
    }

    /// Lists active nozzles in dispensing-unit and position order.
    ///
    /// This is the row order of the shift entry form: one form row per
    /// nozzle, grouped by the unit it is mounted on.
    pub async fn list_nozzles(&self) -> DbResult<Vec<Nozzle>> {
        debug!("Listing active nozzles");

        let nozzles = sqlx::query_as::<_, Nozzle>(
            "SELECT id, outlet_id, dispensing_unit_id, tank_id, product_id, \
                    nozzle_number, calibration_valid_until, is_active, \
                    created_at, updated_at \
             FROM nozzles \
             WHERE outlet_id = ?1 AND is_active = 1 \
             ORDER BY dispensing_unit_id, nozzle_number",
        )
        .bind(DEFAULT_OUTLET_ID)
        .fetch_all(&self.pool)
        .await?;

        Ok(nozzles)
    }

    /// Gets a nozzle by id, active or not.
    ///
    /// Used at reading save time to snapshot the nozzle's product onto the
    /// row; inactive nozzles stay resolvable so old shifts remain editable.
    pub async fn get_nozzle(&self, id: &str) -> DbResult<Nozzle> {
        let nozzle = sqlx::query_as::<_, Nozzle>(
            "SELECT id, outlet_id, dispensing_unit_id, tank_id, product_id, \
                    nozzle_number, calibration_valid_until, is_active, \
                    created_at, updated_at \
             FROM nozzles \
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        nozzle.ok_or_else(|| DbError::not_found("Nozzle", id))
    }

    /// Lists active tanks by name.
    pub async fn list_tanks(&self) -> DbResult<Vec<Tank>> {
        debug!("Listing active tanks");

        let tanks = sqlx::query_as::<_, Tank>(
            "SELECT id, outlet_id, product_id, name, capacity_ml, is_active, \
                    created_at, updated_at \
             FROM tanks \
             WHERE outlet_id = ?1 AND is_active = 1 \
             ORDER BY name",
        )
        .bind(DEFAULT_OUTLET_ID)
        .fetch_all(&self.pool)
        .await?;

        Ok(tanks)
    }

    /// Lists the active attendant roster by name.
    pub async fn list_attendants(&self) -> DbResult<Vec<Attendant>> {
        debug!("Listing active attendants");

        let attendants = sqlx::query_as::<_, Attendant>(
            "SELECT id, outlet_id, name, phone, is_active, created_at, updated_at \
             FROM attendants \
             WHERE outlet_id = ?1 AND is_active = 1 \
             ORDER BY name",
        )
        .bind(DEFAULT_OUTLET_ID)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendants)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
