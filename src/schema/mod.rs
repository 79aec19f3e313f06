//! Source schema handling
//!
//! Every regional dataset spells its columns differently. This module holds the alias
//! tables that map those spellings onto logical fields, and the adapters that turn the
//! untyped values found there into canonical ones.

pub mod adapt;
pub mod field_mapping;

use serde_json::{Map, Value};

/// One decoded source element: source-specific field name to scalar value
pub type RawRecord = Map<String, Value>;

pub use field_mapping::{Field, is_sentinel, resolve, resolve_identity, resolve_str};
