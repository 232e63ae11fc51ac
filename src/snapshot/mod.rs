//! Dashboard Snapshot Model
//!
//! The flat JSON object served by `GET /dashboard`:
//!
//! - **types**: `Snapshot`, `Transaction`, `TxKind`
//! - **de**: lenient field decoders (numbers, numeric strings, nulls)
//!
//! A snapshot is only trusted once it passes [`is_usable`]; placeholder
//! responses from a backend that has not loaded market data yet are all
//! zeros and must not replace the last good render.

mod de;
pub mod types;

pub use types::{is_usable, Snapshot, Transaction, TxKind};
