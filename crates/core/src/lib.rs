//! Shared vocabulary for the bookmend workspace: record identifiers and
//! the permissive argument parsing used by bot scripts.

pub mod record;
pub mod util;

pub use record::{id_from_key, RecordError, RecordKind};
pub use util::{parse_bool, ParseBoolError};
