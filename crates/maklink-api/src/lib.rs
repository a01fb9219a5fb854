//! Async Rust client for the MAK Mobile grill cloud service.
//!
//! The service is a session-cookie web application reachable only over
//! HTTP polling. It exposes four logical operations, all form-encoded
//! POSTs with JSON responses:
//!
//! - **Login** — credentials in, session cookies out. A redirect means
//!   success (the site bounces to the account home); a 200 means the
//!   login form was re-rendered, i.e. failure.
//! - **GrillsRead** — the ordered list of grills the account owns.
//! - **GetAjaxGrillData** — one full reading for one grill.
//! - **SetGrillTemp** — push a new setpoint.
//!
//! A redirect on any authenticated operation signals session expiry; the
//! client marks the session invalid and re-authenticates on the next
//! opportunity rather than retrying inline.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod session;

pub use client::{DEFAULT_BASE_URL, GrillClient};
pub use error::Error;
pub use models::{
    GrillData, GrillId, GrillInfo, GrillListEntry, GrillListPage, PowerState, SessionData, Timer,
};
pub use transport::TransportConfig;
