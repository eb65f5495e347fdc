//! Domain primitives, services and ports.
//!
//! Purpose: hold the visitor-tracking model and the services that drive it.
//! Nothing in here knows about HTTP, Postgres or a particular geolocation
//! provider; adapters plug in through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - VisitorRecord / LocationLabel / VisitReceipt: the counter aggregate.
//! - VisitRecorder / StatsReporter: services behind the driving ports.
//! - resolve_location and friends: geolocation resolution policy.

pub mod error;
pub mod geolocation;
pub mod ports;
pub mod stats_reporter;
pub mod trace_id;
pub mod visit_recorder;
pub mod visitor;

pub use self::error::{Error, ErrorCode};
pub use self::geolocation::{is_publicly_routable, parse_client_address, resolve_location};
pub use self::stats_reporter::StatsReporter;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::visit_recorder::VisitRecorder;
pub use self::visitor::{
    LocationLabel, LocationLabelError, UNKNOWN_LOCATION, VisitReceipt, VisitorRecord,
    VisitorRecordError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use eduverse_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<u64> {
///     Err(Error::not_found("nothing here"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
