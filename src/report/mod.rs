//! Turn query and pairing results into JSON or fixed text layouts.
//!
//! Presenters only read their input. Everything printed as JSON passes
//! through [`redact`](crate::redact::redact) first.

mod text;

use serde::Serialize;

use crate::redact::redact_serialize;
use crate::types::StxError;

pub use text::{
    format_clear_text, format_errors_text, format_events_text, format_pair_text,
    format_status_text, format_uptime, short_id, to_megabytes,
};

/// Pretty JSON of `value` with sensitive keys masked.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, StxError> {
    let redacted = redact_serialize(value)?;
    Ok(serde_json::to_string_pretty(&redacted)?)
}
