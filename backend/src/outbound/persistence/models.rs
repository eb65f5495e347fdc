//! Internal Diesel row structs. Never exposed outside the persistence layer.

use diesel::prelude::*;

use super::schema::{visitor_locations, visitor_totals};

/// Primary key of the only row in `visitor_totals`.
pub(crate) const TOTALS_ROW_ID: i16 = 1;

/// Row read from `visitor_locations`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = visitor_locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub label: String,
    pub visits: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = visitor_locations)]
pub(crate) struct NewLocationRow<'a> {
    pub label: &'a str,
    pub visits: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = visitor_totals)]
pub(crate) struct NewTotalsRow {
    pub id: i16,
    pub total: i64,
}
