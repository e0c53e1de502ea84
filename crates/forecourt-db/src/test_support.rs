//! Shared fixtures for repository tests.
//!
//! Every test gets a fresh in-memory database with migrations applied, plus
//! a small seeded outlet: one attendant, two tanks (petrol and diesel), and
//! one nozzle on each tank. Fixed string ids keep assertions readable.

use chrono::{NaiveDate, Utc};

use crate::pool::{Database, DbConfig};
use forecourt_core::validation::ReadingForm;
use forecourt_core::{ShiftKey, ShiftType, DEFAULT_OUTLET_ID};

/// Creates a migrated in-memory database.
pub async fn setup_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// Builds a shift key from parts.
pub fn shift(shift_type: ShiftType, y: i32, m: u32, d: u32) -> ShiftKey {
    ShiftKey::new(shift_type, NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Builds a reading form with the payment columns left blank (zero).
pub fn reading_form(
    attendant_id: &str,
    nozzle_id: &str,
    previous: &str,
    current: &str,
    testing: &str,
) -> ReadingForm {
    ReadingForm {
        attendant_id: attendant_id.into(),
        nozzle_id: nozzle_id.into(),
        previous_reading: previous.into(),
        current_reading: current.into(),
        testing: testing.into(),
        ..Default::default()
    }
}

/// Seeds the fixed outlet configuration the tests reference by id.
pub async fn seed_outlet(db: &Database) {
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO attendants (id, outlet_id, name, phone, is_active, created_at, updated_at) \
         VALUES ('att-1', ?1, 'Ravi Kumar', NULL, 1, ?2, ?2)",
    )
    .bind(DEFAULT_OUTLET_ID)
    .bind(now)
    .execute(db.pool())
    .await
    .unwrap();

    for (id, product, name) in [
        ("tank-1", "petrol", "Tank 1 - Petrol"),
        ("tank-2", "diesel", "Tank 2 - Diesel"),
    ] {
        sqlx::query(
            "INSERT INTO tanks (id, outlet_id, product_id, name, capacity_ml, is_active, \
                                created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, 20000000, 1, ?5, ?5)",
        )
        .bind(id)
        .bind(DEFAULT_OUTLET_ID)
        .bind(product)
        .bind(name)
        .bind(now)
        .execute(db.pool())
        .await
        .unwrap();
    }

    for (id, tank, product, number) in [
        ("noz-1", "tank-1", "petrol", 1i64),
        ("noz-2", "tank-2", "diesel", 2i64),
    ] {
        sqlx::query(
            "INSERT INTO nozzles (id, outlet_id, dispensing_unit_id, tank_id, product_id, \
                                  nozzle_number, calibration_valid_until, is_active, \
                                  created_at, updated_at) \
             VALUES (?1, ?2, 'du-1', ?3, ?4, ?5, NULL, 1, ?6, ?6)",
        )
        .bind(id)
        .bind(DEFAULT_OUTLET_ID)
        .bind(tank)
        .bind(product)
        .bind(number)
        .bind(now)
        .execute(db.pool())
        .await
        .unwrap();
    }
}
