//! Diesel table definitions for the visitor counter tables.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! when a migration changes them.

diesel::table! {
    /// Single-row table holding the all-time visit total.
    visitor_totals (id) {
        /// Always `1`; a check constraint rejects any other row.
        id -> Int2,
        total -> Int8,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-location visit counts keyed by the resolved label.
    visitor_locations (label) {
        label -> Text,
        visits -> Int8,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(visitor_totals, visitor_locations);
