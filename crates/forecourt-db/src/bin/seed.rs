//! # Database Seeder
//!
//! Seeds a development database with a small outlet and one fully recorded
//! shift, so the entry form and summary view have data on first run.
//!
//! ## Usage
//! ```bash
//! cargo run --bin seed                 # seeds ./forecourt.db
//! DATABASE_PATH=/tmp/f.db cargo run --bin seed
//! ```
//!
//! ## What Gets Seeded
//! - 2 attendants, 2 tanks (petrol, diesel), 4 nozzles on 2 dispensing units
//! - Rates for the morning shift of today, with a density observation
//! - A reading per nozzle and a stock entry per tank for that shift
//!
//! Running twice is safe: configuration inserts are `OR IGNORE`, shift data
//! goes through the natural-key upserts.

use chrono::{Local, Utc};
use tracing::info;

use forecourt_core::validation::{RateForm, ReadingForm, StockEntryForm};
use forecourt_core::{ShiftKey, ShiftType, DEFAULT_OUTLET_ID};
use forecourt_db::{Database, DbConfig, DbResult};

#[tokio::main]
async fn main() -> DbResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./forecourt.db".to_string());
    info!(path = %path, "Seeding development database");

    let db = Database::new(DbConfig::new(&path)).await?;

    seed_configuration(&db).await?;
    seed_morning_shift(&db).await?;

    db.close().await;
    info!("Seed complete");
    Ok(())
}

/// Inserts the outlet's physical configuration (idempotent).
async fn seed_configuration(db: &Database) -> DbResult<()> {
    let now = Utc::now();

    for (id, name, phone) in [
        ("att-ravi", "Ravi Kumar", Some("+91-98000-11111")),
        ("att-suresh", "Suresh Patil", None),
    ] {
        sqlx::query(
            "INSERT OR IGNORE INTO attendants \
                 (id, outlet_id, name, phone, is_active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)",
        )
        .bind(id)
        .bind(DEFAULT_OUTLET_ID)
        .bind(name)
        .bind(phone)
        .bind(now)
        .execute(db.pool())
        .await?;
    }

    for (id, product, name, capacity_ml) in [
        ("tank-petrol", "petrol", "Tank 1 - Petrol", 20_000_000i64),
        ("tank-diesel", "diesel", "Tank 2 - Diesel", 30_000_000i64),
    ] {
        sqlx::query(
            "INSERT OR IGNORE INTO tanks \
                 (id, outlet_id, product_id, name, capacity_ml, is_active, \
                  created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
        )
        .bind(id)
        .bind(DEFAULT_OUTLET_ID)
        .bind(product)
        .bind(name)
        .bind(capacity_ml)
        .bind(now)
        .execute(db.pool())
        .await?;
    }

    for (id, du, tank, product, number) in [
        ("noz-p1", "du-1", "tank-petrol", "petrol", 1i64),
        ("noz-p2", "du-1", "tank-petrol", "petrol", 2i64),
        ("noz-d1", "du-2", "tank-diesel", "diesel", 1i64),
        ("noz-d2", "du-2", "tank-diesel", "diesel", 2i64),
    ] {
        sqlx::query(
            "INSERT OR IGNORE INTO nozzles \
                 (id, outlet_id, dispensing_unit_id, tank_id, product_id, \
                  nozzle_number, calibration_valid_until, is_active, \
                  created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, '2027-03-31', 1, ?7, ?7)",
        )
        .bind(id)
        .bind(DEFAULT_OUTLET_ID)
        .bind(du)
        .bind(tank)
        .bind(product)
        .bind(number)
        .bind(now)
        .execute(db.pool())
        .await?;
    }

    info!("Configuration seeded: 2 attendants, 2 tanks, 4 nozzles");
    Ok(())
}

/// Records rates, readings, and stock entries for today's morning shift.
async fn seed_morning_shift(db: &Database) -> DbResult<()> {
    let shift = ShiftKey::new(ShiftType::Morning, Local::now().date_naive());
    info!(shift = %shift, "Recording shift data");

    let petrol_rate = RateForm {
        rate: "104.50".into(),
        observed_density: "742.30".into(),
        observed_temperature: "27.5".into(),
    }
    .validate()
    .map_err(|e| forecourt_db::DbError::Internal(e.to_string()))?;
    db.rates().upsert(shift, "petrol", &petrol_rate).await?;

    let diesel_rate = RateForm {
        rate: "90.25".into(),
        ..Default::default()
    }
    .validate()
    .map_err(|e| forecourt_db::DbError::Internal(e.to_string()))?;
    db.rates().upsert(shift, "diesel", &diesel_rate).await?;

    let entries = [
        ("att-ravi", "noz-p1", "petrol", "12000", "12450.500", "5", "30000", "0", "17000", "0"),
        ("att-ravi", "noz-p2", "petrol", "8200", "8200", "0", "", "", "", ""),
        ("att-suresh", "noz-d1", "diesel", "45000", "45820", "10", "40000", "22500", "10000", "600"),
        ("att-suresh", "noz-d2", "diesel", "31000", "31215.250", "0", "19400", "0", "0", "0"),
    ];

    for (attendant, nozzle, product, prev, curr, testing, cash, credit, upi, card) in entries {
        let input = ReadingForm {
            attendant_id: attendant.into(),
            nozzle_id: nozzle.into(),
            previous_reading: prev.into(),
            current_reading: curr.into(),
            testing: testing.into(),
            cash_sales: cash.into(),
            credit_sales: credit.into(),
            upi_sales: upi.into(),
            card_sales: card.into(),
        }
        .validate()
        .map_err(|e| forecourt_db::DbError::Internal(e.to_string()))?;

        db.readings().upsert(shift, product, &input).await?;
    }

    for (tank, opening, receipt, invoice) in [
        ("tank-petrol", "14500", "0", ""),
        ("tank-diesel", "22000", "12000", "1083000.00"),
    ] {
        let input = StockEntryForm {
            opening_stock: opening.into(),
            receipt: receipt.into(),
            invoice_value: invoice.into(),
        }
        .validate()
        .map_err(|e| forecourt_db::DbError::Internal(e.to_string()))?;

        db.stock().upsert(shift, tank, &input).await?;
    }

    info!("Shift data recorded: 2 rates, 4 readings, 2 stock entries");
    Ok(())
}
