//! `--item CODE:NAME:EXPECTED:ACTUAL[:key=value,...]` parsing.
//!
//! Keys: `nf` not-found batches, `ur` unregistered boxes, `wl` wrong-location
//! boxes, `qm` quantity mismatches, `batch` and `box` numbers. Names may
//! contain `:`.

use anyhow::{Context, bail};
use tally_core::entities::AuditLineItem;

pub fn parse_item(spec: &str) -> anyhow::Result<AuditLineItem> {
    let mut parts: Vec<&str> = spec.split(':').collect();
    let extras = match parts.last() {
        Some(last) if parts.len() > 4 && last.contains('=') => parts.pop(),
        _ => None,
    };
    if parts.len() < 4 {
        bail!("invalid item '{spec}': expected CODE:NAME:EXPECTED:ACTUAL[:nf=N,ur=N,wl=N,qm=N]");
    }

    let actual = parts.pop().unwrap_or_default();
    let expected = parts.pop().unwrap_or_default();
    let code = parts[0].trim();
    if code.is_empty() {
        bail!("invalid item '{spec}': product code is empty");
    }

    let mut item = AuditLineItem {
        product_code: code.to_string(),
        product_name: parts[1..].join(":").trim().to_string(),
        expected_quantity: parse_count(expected, "expected quantity", spec)?,
        actual_quantity: parse_count(actual, "actual quantity", spec)?,
        ..AuditLineItem::default()
    };

    for pair in extras.into_iter().flat_map(|e| e.split(',')) {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("invalid item '{spec}': '{pair}' is not key=value"))?;
        match key.trim() {
            "nf" => item.not_found_batches = Some(parse_count(value, "nf", spec)?),
            "ur" => item.unregistered_boxes = Some(parse_count(value, "ur", spec)?),
            "wl" => item.wrong_location_boxes = Some(parse_count(value, "wl", spec)?),
            "qm" => item.quantity_mismatches = Some(parse_count(value, "qm", spec)?),
            "batch" => item.batch_number = value.trim().to_string(),
            "box" => item.box_number = value.trim().to_string(),
            other => bail!("invalid item '{spec}': unknown key '{other}'"),
        }
    }

    Ok(item)
}

fn parse_count(raw: &str, field: &str, spec: &str) -> anyhow::Result<u32> {
    raw.trim()
        .parse::<u32>()
        .with_context(|| format!("invalid item '{spec}': {field} '{raw}' is not a non-negative integer"))
}
