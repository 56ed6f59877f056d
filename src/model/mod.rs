//! Types that represent the core data model: the `Record` and the numeric coercion applied to
//! its text fields.
mod number;
mod record;

pub use number::{display_number, serialize_number, to_number};
pub use record::Record;

/// The ordered sequence of records. Position is the only identity a record has.
pub type Records = Vec<Record>;
