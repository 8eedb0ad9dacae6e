pub mod record;
pub mod table;

pub use record::{Record, RecordField, UnknownField};
pub use table::RecordTable;
