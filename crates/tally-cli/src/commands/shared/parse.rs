use serde::de::DeserializeOwned;

/// Parse an enum value through its serde spelling. Hyphens are accepted in
/// place of underscores.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> anyhow::Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid date '{raw}' (expected YYYY-MM-DD): {error}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tally_core::enums::{EntryType, ScheduleStatus};

    use super::{parse_date, parse_enum};

    #[rstest]
    #[case("rua", EntryType::Street)]
    #[case("street", EntryType::Street)]
    #[case("classe", EntryType::Class)]
    #[case("Class", EntryType::Class)]
    #[case("produto", EntryType::Product)]
    fn parses_entry_type_spellings(#[case] raw: &str, #[case] expected: EntryType) {
        let parsed: EntryType = parse_enum(raw, "entry type").expect("entry type should parse");
        assert_eq!(parsed, expected);
    }

    #[test]
    fn parses_hyphenated_status() {
        let status: ScheduleStatus = parse_enum("in-progress", "status").expect("status should parse");
        assert_eq!(status, ScheduleStatus::InProgress);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<ScheduleStatus>("done", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'done'"));
    }

    #[test]
    fn dates_are_iso() {
        assert!(parse_date("2025-06-14").is_ok());
        assert!(parse_date("14/06/2025").is_err());
    }
}
