//! Per-kind value canonicalization, applied only to a field's winning
//! value. Every normalizer is idempotent and falls back to trimmed
//! pass-through on input it does not recognize.

use chrono::NaiveDate;

use crate::schema::NormalizerKind;

/// Acronyms kept fully upper-case by the name normalizer.
const NAME_ACRONYMS: &[&str] = &["UK", "USA", "LLC", "LTD", "PLC"];

/// Canonicalize a winning value according to the field's normalizer.
pub fn normalize_value(value: &str, kind: NormalizerKind) -> String {
    match kind {
        NormalizerKind::Date => normalize_date(value),
        NormalizerKind::Boolean => normalize_boolean(value),
        NormalizerKind::Name => normalize_name(value),
        NormalizerKind::Uppercase => value.trim().to_uppercase(),
        NormalizerKind::None => value.trim().to_string(),
    }
}

/// Re-render `D/M/YYYY`- and `YYYY-M-D`-style dates (separators `/`,
/// `-`, `.`) as zero-padded `YYYY-MM-DD`. Anything else passes through
/// trimmed.
fn normalize_date(value: &str) -> String {
    let trimmed = value.trim();

    let parts: Vec<&str> = trimmed.split(['/', '-', '.']).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return trimmed.to_string();
    }

    let parsed: Result<Vec<u32>, _> = parts.iter().map(|p| p.parse::<u32>()).collect();
    let nums = match parsed {
        Ok(nums) => nums,
        Err(_) => return trimmed.to_string(),
    };

    let (year, month, day) = if parts[0].len() == 4 {
        (nums[0], nums[1], nums[2])
    } else {
        let mut year = nums[2];
        if parts[2].len() == 2 {
            year += 2000;
        }
        (year, nums[1], nums[0])
    };

    if NaiveDate::from_ymd_opt(year as i32, month, day).is_none() {
        return trimmed.to_string();
    }

    format!("{year:04}-{month:02}-{day:02}")
}

/// Map yes/no spellings onto "Yes"/"No"; pass anything else through
/// trimmed.
fn normalize_boolean(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => "Yes".to_string(),
        "no" | "n" | "false" | "0" => "No".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Title-case each whitespace-separated token, forcing known acronyms
/// upper-case.
fn normalize_name(value: &str) -> String {
    value
        .trim()
        .split_whitespace()
        .map(|token| {
            if NAME_ACRONYMS.contains(&token.to_uppercase().as_str()) {
                token.to_uppercase()
            } else {
                title_case(token)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            let mut s: String = first.to_uppercase().collect();
            s.push_str(&chars.as_str().to_lowercase());
            s
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_dmy_slash_renders_iso() {
        assert_eq!(normalize_value("15/01/2024", NormalizerKind::Date), "2024-01-15");
    }

    #[test]
    fn date_dmy_dot_and_dash_render_iso() {
        assert_eq!(normalize_value("5.3.2024", NormalizerKind::Date), "2024-03-05");
        assert_eq!(normalize_value("5-3-2024", NormalizerKind::Date), "2024-03-05");
    }

    #[test]
    fn date_ymd_renders_zero_padded() {
        assert_eq!(normalize_value("2024-1-5", NormalizerKind::Date), "2024-01-05");
        assert_eq!(normalize_value("2024/01/15", NormalizerKind::Date), "2024-01-15");
    }

    #[test]
    fn date_two_digit_year_maps_into_current_century() {
        assert_eq!(normalize_value("15/01/24", NormalizerKind::Date), "2024-01-15");
    }

    #[test]
    fn date_unrecognized_passes_through_trimmed() {
        assert_eq!(normalize_value(" 15 January 2024 ", NormalizerKind::Date), "15 January 2024");
        assert_eq!(normalize_value("n/a", NormalizerKind::Date), "n/a");
    }

    #[test]
    fn date_invalid_calendar_day_passes_through() {
        assert_eq!(normalize_value("32/01/2024", NormalizerKind::Date), "32/01/2024");
        assert_eq!(normalize_value("15/13/2024", NormalizerKind::Date), "15/13/2024");
    }

    #[test]
    fn date_normalization_is_idempotent() {
        for input in ["15/01/2024", "2024-1-5", "5.3.24", "not a date"] {
            let once = normalize_value(input, NormalizerKind::Date);
            let twice = normalize_value(&once, NormalizerKind::Date);
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }

    #[test]
    fn boolean_yes_spellings() {
        for input in ["Y", "yes", "TRUE", "1", " y "] {
            assert_eq!(normalize_value(input, NormalizerKind::Boolean), "Yes");
        }
    }

    #[test]
    fn boolean_no_spellings() {
        for input in ["n", "No", "FALSE", "0"] {
            assert_eq!(normalize_value(input, NormalizerKind::Boolean), "No");
        }
    }

    #[test]
    fn boolean_other_passes_through_trimmed() {
        assert_eq!(normalize_value(" Maybe ", NormalizerKind::Boolean), "Maybe");
    }

    #[test]
    fn name_title_cases_tokens() {
        assert_eq!(normalize_value("JOHN SMITH", NormalizerKind::Name), "John Smith");
        assert_eq!(normalize_value("jane doe", NormalizerKind::Name), "Jane Doe");
    }

    #[test]
    fn name_keeps_acronyms_upper() {
        assert_eq!(normalize_value("acme lifting ltd", NormalizerKind::Name), "Acme Lifting LTD");
        assert_eq!(normalize_value("crane services uk", NormalizerKind::Name), "Crane Services UK");
    }

    #[test]
    fn name_collapses_whitespace() {
        assert_eq!(normalize_value("  john   smith ", NormalizerKind::Name), "John Smith");
    }

    #[test]
    fn uppercase_trims_and_uppercases() {
        assert_eq!(normalize_value(" ab-1234 ", NormalizerKind::Uppercase), "AB-1234");
    }

    #[test]
    fn none_trims_only() {
        assert_eq!(normalize_value("  as found  ", NormalizerKind::None), "as found");
    }
}
