//! PostgreSQL-backed `VisitorStore` using Diesel.
//!
//! The record is split over two tables: a single `visitor_totals` row and one
//! `visitor_locations` row per label. `increment` upserts both inside one
//! transaction; row locks taken by `ON CONFLICT DO UPDATE` serialise
//! concurrent visits to the same label.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{VisitorStore, VisitorStoreError};
use crate::domain::{LocationLabel, VisitorRecord};

use super::models::{LocationRow, NewLocationRow, NewTotalsRow, TOTALS_ROW_ID};
use super::pool::{DbPool, PoolError};
use super::schema::{visitor_locations, visitor_totals};

/// Diesel implementation of the [`VisitorStore`] port.
#[derive(Clone)]
pub struct DieselVisitorStore {
    pool: DbPool,
}

impl DieselVisitorStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VisitorStoreError {
    VisitorStoreError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> VisitorStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            VisitorStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => VisitorStoreError::query(info.message()),
        other => VisitorStoreError::query(other.to_string()),
    }
}

fn to_column(value: u64, what: &str) -> Result<i64, VisitorStoreError> {
    i64::try_from(value)
        .map_err(|_| VisitorStoreError::corrupt(format!("{what} {value} exceeds BIGINT")))
}

fn from_column(value: i64, what: &str) -> Result<u64, VisitorStoreError> {
    u64::try_from(value).map_err(|_| VisitorStoreError::corrupt(format!("negative {what} {value}")))
}

fn rows_to_record(total: i64, rows: Vec<LocationRow>) -> Result<VisitorRecord, VisitorStoreError> {
    let total = from_column(total, "total")?;
    let mut locations = BTreeMap::new();
    for row in rows {
        let label = LocationLabel::new(row.label)
            .map_err(|err| VisitorStoreError::corrupt(err.to_string()))?;
        let visits = from_column(row.visits, "visit count")?;
        locations.insert(label, visits);
    }
    VisitorRecord::from_parts(total, locations)
        .map_err(|err| VisitorStoreError::corrupt(err.to_string()))
}

#[async_trait]
impl VisitorStore for DieselVisitorStore {
    async fn load(&self) -> Result<Option<VisitorRecord>, VisitorStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Repeatable read so the total and the location rows come from the
        // same snapshot even while visits are being committed.
        let snapshot = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let total: Option<i64> = visitor_totals::table
                        .find(TOTALS_ROW_ID)
                        .select(visitor_totals::total)
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(total) = total else {
                        return Ok(None);
                    };
                    let rows: Vec<LocationRow> = visitor_locations::table
                        .select(LocationRow::as_select())
                        .order_by(visitor_locations::label)
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(Some((total, rows)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        snapshot
            .map(|(total, rows)| rows_to_record(total, rows))
            .transpose()
    }

    async fn save(&self, record: &VisitorRecord) -> Result<(), VisitorStoreError> {
        if !record.is_consistent() {
            return Err(VisitorStoreError::corrupt(
                "refusing to save a record whose counts do not sum to its total",
            ));
        }
        let totals = NewTotalsRow {
            id: TOTALS_ROW_ID,
            total: to_column(record.total(), "total")?,
        };
        let rows = record
            .locations()
            .iter()
            .map(|(label, visits)| {
                Ok(NewLocationRow {
                    label: label.as_str(),
                    visits: to_column(*visits, "visit count")?,
                })
            })
            .collect::<Result<Vec<_>, VisitorStoreError>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Totals row first; `increment` locks in the same order.
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(visitor_totals::table)
                    .values(&totals)
                    .on_conflict(visitor_totals::id)
                    .do_update()
                    .set((
                        visitor_totals::total.eq(totals.total),
                        visitor_totals::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .await?;
                diesel::delete(visitor_locations::table)
                    .execute(conn)
                    .await?;
                if !rows.is_empty() {
                    diesel::insert_into(visitor_locations::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn increment(&self, location: &LocationLabel) -> Result<u64, VisitorStoreError> {
        let label = location.as_str();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Lock order matches `save`: the totals row before any location row.
        let total: i64 = conn
            .transaction(|conn| {
                async move {
                    let total = diesel::insert_into(visitor_totals::table)
                        .values(NewTotalsRow {
                            id: TOTALS_ROW_ID,
                            total: 1,
                        })
                        .on_conflict(visitor_totals::id)
                        .do_update()
                        .set((
                            visitor_totals::total.eq(visitor_totals::total + 1),
                            visitor_totals::updated_at.eq(now),
                        ))
                        .returning(visitor_totals::total)
                        .get_result(conn)
                        .await?;
                    diesel::insert_into(visitor_locations::table)
                        .values(NewLocationRow { label, visits: 1 })
                        .on_conflict(visitor_locations::label)
                        .do_update()
                        .set((
                            visitor_locations::visits.eq(visitor_locations::visits + 1),
                            visitor_locations::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .await?;
                    Ok::<i64, diesel::result::Error>(total)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        from_column(total, "total")
    }
}
