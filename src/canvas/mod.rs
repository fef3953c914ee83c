// Canvas upstream core: the gateway client plus the missing-work aggregator.
//
// Everything here is request-scoped. Upstream coordinates (institution URL,
// bearer token) travel as explicit parameters on every call so one process
// can serve differently-authenticated callers concurrently.

pub mod client;
pub mod envelope;
pub mod error;
pub mod missing;
pub mod models;

pub use client::{ApiCall, CanvasApi, CanvasClient, Upstream};
pub use envelope::CanvasResponse;
