//! SQLite storage layer.
//!
//! The tier catalog lives in SQLite with WAL mode and split read/write
//! connection pools.

pub mod pool;
pub mod tier;
