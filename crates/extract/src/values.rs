use once_cell::sync::Lazy;
use regex::Regex;

// Up to 10 digits, optional thousands groups, optional fraction: "$1,500", "1500.00"
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{1,10}(?:,[0-9]{3})*(?:\.[0-9]+)?").expect("valid number regex")
});

static TITLE_NOISE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s&'\-]").expect("valid title regex"));

/// First number in the line with grouping commas removed, or 0 when there is none
pub fn extract_number(line: &str) -> f64 {
    NUMBER_RE
        .find(line)
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Text after the first `:` or `-`, stripped of decoration.
///
/// `"**Risk Level:** Medium"` gives `"Medium"`. A line with neither
/// separator is returned whole.
pub fn value_after_marker(line: &str) -> String {
    match line.split_once([':', '-']) {
        Some((_, value)) => value
            .trim_matches(|c| matches!(c, ' ' | '*' | '"' | '-'))
            .to_string(),
        None => line.trim().to_string(),
    }
}

/// Strip markdown and punctuation from a boundary line, keeping `&`, `'` and `-`
pub fn clean_title(line: &str) -> String {
    TITLE_NOISE_RE.replace_all(line, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("Estimated cost: $5,000"), 5000.0);
        assert_eq!(extract_number("Startup cost: $12,345.50 total"), 12345.50);
        assert_eq!(extract_number("about 1500.00 dollars"), 1500.0);
        assert_eq!(extract_number("$1,000,000"), 1_000_000.0);
    }

    #[test]
    fn test_extract_number_takes_first_match() {
        assert_eq!(extract_number("Cost: $2,000 - $3,000"), 2000.0);
    }

    #[test]
    fn test_extract_number_defaults_to_zero() {
        assert_eq!(extract_number("Cost: depends on location"), 0.0);
        assert_eq!(extract_number(""), 0.0);
    }

    #[test]
    fn test_value_after_marker() {
        assert_eq!(value_after_marker("Expected profit: 20%"), "20%");
        assert_eq!(value_after_marker("Risk: Low"), "Low");
        assert_eq!(value_after_marker("**Risk Level:** Medium"), "Medium");
        assert_eq!(value_after_marker("Risk - \"High\""), "High");
    }

    #[test]
    fn test_value_after_marker_splits_on_first_separator_only() {
        assert_eq!(value_after_marker("Risk: medium-high"), "medium-high");
        assert_eq!(value_after_marker("Low-risk: yes"), "risk: yes");
    }

    #[test]
    fn test_value_after_marker_without_separator() {
        assert_eq!(value_after_marker("  low risk overall "), "low risk overall");
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("Idea 1: Coffee Cart"), "Idea 1 Coffee Cart");
        assert_eq!(clean_title("**Idea 2: Bed & Breakfast**"), "Idea 2 Bed & Breakfast");
        assert_eq!(clean_title("### Idea 3: Kid's Eco-Tours!"), "Idea 3 Kid's Eco-Tours");
    }
}
