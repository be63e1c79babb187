use regex::Regex;
use std::sync::OnceLock;
use subtle::ConstantTimeEq;

/// Markers that reject a value outright when found anywhere in it (case-insensitive)
const XSS_MARKERS: [&str; 9] = [
    "<script",
    "javascript:",
    "vbscript:",
    "onload=",
    "onerror=",
    "onclick=",
    "<iframe",
    "<object",
    "<embed",
];

static SQL_KEYWORD_REGEX: OnceLock<Regex> = OnceLock::new();
static SQL_CHAR_REGEX: OnceLock<Regex> = OnceLock::new();
static UNION_SELECT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing API keys, bearer tokens, and other sensitive values
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Detect SQL-injection shaped input.
///
/// Matches SQL/DOM keywords as whole words, `union select` anywhere
/// (even inside longer words), or a raw double quote, semicolon or
/// backslash. Apostrophes are not flagged: names such as
/// "O'Brien" are legitimate in every form field that allows them.
pub fn contains_sql_injection(value: &str) -> bool {
    let keywords = SQL_KEYWORD_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|UNION|SCRIPT|JAVASCRIPT|ONLOAD|ONERROR|ONCLICK)\b",
        )
        .unwrap()
    });
    let chars = SQL_CHAR_REGEX.get_or_init(|| Regex::new(r#"[";\\]"#).unwrap());
    let union_select =
        UNION_SELECT_REGEX.get_or_init(|| Regex::new(r"(?i)union\s+select").unwrap());

    let trimmed = value.trim();
    keywords.is_match(trimmed) || chars.is_match(trimmed) || union_select.is_match(trimmed)
}

/// Detect script-injection markers (case-insensitive substring match)
pub fn contains_xss(value: &str) -> bool {
    let lowered = value.to_lowercase();
    XSS_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// True when either detector rejects the value
pub fn is_malicious(value: &str) -> bool {
    contains_sql_injection(value) || contains_xss(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("anon-key-123", "anon-key-123"));
        assert!(!constant_time_compare("anon-key-123", "anon-key-124"));
        assert!(!constant_time_compare("anon-key-123", "anon-key-12"));
        assert!(!constant_time_compare("", "anon-key"));
    }

    // ==================== SQL Injection Tests ====================

    #[test]
    fn test_sql_keyword_detected_any_case() {
        assert!(contains_sql_injection("1 UNION SELECT password"));
        assert!(contains_sql_injection("please drop table users"));
        assert!(contains_sql_injection("Exec xp_cmdshell"));
    }

    #[test]
    fn test_sql_keyword_must_be_whole_word() {
        // "selection" and "updated" contain keywords but not as whole words
        assert!(!contains_sql_injection("A fine selection of wines"));
        assert!(!contains_sql_injection("We updated our menu"));
        assert!(!contains_sql_injection("Dropbox link"));
    }

    #[test]
    fn test_union_select_detected_inside_words() {
        assert!(contains_sql_injection("family reunion selection"));
        assert!(contains_sql_injection("xUnIoN\tSeLeCtx"));
        assert!(!contains_sql_injection("reunion, then a selection"));
    }

    #[test]
    fn test_sql_raw_characters_detected() {
        assert!(contains_sql_injection("name; --"));
        assert!(contains_sql_injection("say \"hello\""));
        assert!(contains_sql_injection("back\\slash"));
    }

    #[test]
    fn test_apostrophe_is_not_sql_injection() {
        assert!(!contains_sql_injection("O'Brien"));
        assert!(!contains_sql_injection("Joana d'Arc"));
    }

    #[test]
    fn test_plain_text_is_clean() {
        assert!(!contains_sql_injection("Table for four on Friday, please!"));
    }

    // ==================== XSS Tests ====================

    #[test]
    fn test_xss_markers_detected() {
        assert!(contains_xss("<script>alert(1)</script>"));
        assert!(contains_xss("JavaScript:void(0)"));
        assert!(contains_xss("vbscript:msgbox"));
        assert!(contains_xss("<img ONERROR=x>"));
        assert!(contains_xss("<IFRAME src=x>"));
        assert!(contains_xss("<object data=x>"));
        assert!(contains_xss("<embed src=x>"));
        assert!(contains_xss("<body onload=x>"));
        assert!(contains_xss("<a onclick=x>"));
    }

    #[test]
    fn test_xss_clean_text() {
        assert!(!contains_xss("Loved the grilled octopus"));
        assert!(!contains_xss("onload without equals"));
    }

    #[test]
    fn test_is_malicious_combines_detectors() {
        assert!(is_malicious("<script"));
        assert!(is_malicious("union select"));
        assert!(!is_malicious("Maria Silva"));
    }
}
