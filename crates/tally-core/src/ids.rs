//! ID prefixes and generation.
//!
//! IDs are `{prefix}-{8 hex chars}`, e.g. `aud-a3f8b2c1`. Records written by
//! earlier clients may carry any other string id; nothing parses the format.

use crate::errors::CoreError;

pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_ITEM: &str = "itm";
pub const PREFIX_SCHEDULE: &str = "sch";

/// Generate a prefixed random id.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn generate(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("random source unavailable: {e}")))?;
    Ok(format_id(prefix, bytes))
}

fn format_id(prefix: &str, bytes: [u8; 4]) -> String {
    use std::fmt::Write;

    let mut id = String::with_capacity(prefix.len() + 9);
    id.push_str(prefix);
    id.push('-');
    for b in bytes {
        let _ = write!(id, "{b:02x}");
    }
    id
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn formats_lowercase_hex() {
        assert_eq!(format_id(PREFIX_AUDIT, [0xa3, 0xf8, 0x0b, 0x01]), "aud-a3f80b01");
    }

    #[test]
    fn generated_ids_have_prefix_and_length() {
        let id = generate(PREFIX_SCHEDULE).unwrap();
        assert!(id.starts_with("sch-"));
        assert_eq!(id.len(), 12);
    }

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<String> = (0..64).map(|_| generate(PREFIX_ITEM).unwrap()).collect();
        assert_eq!(ids.len(), 64);
    }
}
