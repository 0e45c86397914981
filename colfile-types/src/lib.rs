//! Schema, value and row-codec types shared by the colfile crates.
//!
//! - [`TableHandle`]: the host's description of a table (attributes, storage
//!   root, catalog statistics, persistence).
//! - [`Value`] and [`RowBuffer`]: single datums and the per-row slot array a
//!   scan fills.
//! - [`codec`]: fixed-width encode/decode of one attribute value.

pub mod internal;

pub mod errors;
pub use errors::*;

pub mod attribute;
pub use attribute::{AttributeDesc, AttributeType, VARIABLE_WIDTH};

pub mod codec;

pub mod ids;
pub use ids::{AttributeOrdinal, BlockNumber, Snapshot, TableId, TupleId};

pub mod row;
pub use row::RowBuffer;

pub mod table;
pub use table::{Persistence, RelationStats, TableHandle};

pub mod value;
pub use value::Value;
