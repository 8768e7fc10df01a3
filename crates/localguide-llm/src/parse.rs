//! Strict parsers for the line formats the prompts ask the model to use.
//!
//! Accepted grammar:
//!
//! - keyword mode: the first non-empty line is `keyword: <value>`. A value of
//!   `none` (or `없음`) means the model found nothing to search for.
//! - place-name mode: two numbered lines, `1) <description>` and
//!   `2) place name: <value>` (`장소명:` is accepted too). Only the second is
//!   required.
//!
//! Both ASCII `:` and full-width `：` colons are accepted. Anything else is
//! reported as a parse miss, never an error.

use std::sync::LazyLock;

use regex::Regex;

pub use localguide_core::MAX_KEYWORD_CHARS;

static KEYWORD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^keyword\s*[:：]\s*(.*)$").expect("valid keyword regex")
});

static PLACE_NAME_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:장소명|place\s*name)\s*[:：]\s*(.+)$").expect("valid place name regex")
});

static DESCRIPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1\)\s*(.+)$").expect("valid description regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordParse {
    Found(String),
    /// Malformed output, an empty value, or an explicit `none`.
    NoKeyword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceNameParse {
    Found {
        name: String,
        description: Option<String>,
    },
    Missing,
}

/// Parses `keyword: <value>` from the first non-empty line of `output`.
///
/// The value is trimmed, unquoted, and cut to [`MAX_KEYWORD_CHARS`]
/// characters.
#[must_use]
pub fn parse_keyword(output: &str) -> KeywordParse {
    let Some(first_line) = output.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return KeywordParse::NoKeyword;
    };
    let Some(captures) = KEYWORD_LINE.captures(first_line) else {
        return KeywordParse::NoKeyword;
    };
    let value = clean_value(captures.get(1).map_or("", |m| m.as_str()));
    if value.is_empty() || is_none_marker(&value) {
        return KeywordParse::NoKeyword;
    }

    let truncated: String = value.chars().take(MAX_KEYWORD_CHARS).collect();
    KeywordParse::Found(truncated.trim_end().to_string())
}

/// Finds the `place name:` line anywhere in `output` and returns its value,
/// together with the `1)` description line when present.
#[must_use]
pub fn parse_place_name(output: &str) -> PlaceNameParse {
    let mut description = None;
    for line in output.lines().map(str::trim) {
        if let Some(captures) = PLACE_NAME_LINE.captures(line) {
            let name = clean_value(captures.get(1).map_or("", |m| m.as_str()));
            if !name.is_empty() {
                return PlaceNameParse::Found { name, description };
            }
        } else if description.is_none() {
            description = DESCRIPTION_LINE
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string());
        }
    }
    PlaceNameParse::Missing
}

/// Trims whitespace and one layer of matching quotes or backticks.
fn clean_value(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'', '`', '“']
        .iter()
        .find_map(|q| {
            let close = if *q == '“' { '”' } else { *q };
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(close))
        })
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

fn is_none_marker(value: &str) -> bool {
    value.eq_ignore_ascii_case("none") || value == "없음"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_keyword() {
        assert_eq!(
            parse_keyword("keyword: 마라탕"),
            KeywordParse::Found("마라탕".to_string())
        );
    }

    #[test]
    fn keyword_is_trimmed_and_unquoted() {
        assert_eq!(
            parse_keyword("\n  Keyword：  \"돼지국밥\"  \n"),
            KeywordParse::Found("돼지국밥".to_string())
        );
    }

    #[test]
    fn missing_prefix_is_no_keyword() {
        assert_eq!(parse_keyword("마라탕"), KeywordParse::NoKeyword);
        assert_eq!(
            parse_keyword("Sure! keyword: 마라탕"),
            KeywordParse::NoKeyword
        );
    }

    #[test]
    fn empty_output_is_no_keyword() {
        assert_eq!(parse_keyword(""), KeywordParse::NoKeyword);
        assert_eq!(parse_keyword("   \n\n"), KeywordParse::NoKeyword);
    }

    #[test]
    fn explicit_none_is_no_keyword() {
        assert_eq!(parse_keyword("keyword: none"), KeywordParse::NoKeyword);
        assert_eq!(parse_keyword("keyword: 없음"), KeywordParse::NoKeyword);
        assert_eq!(parse_keyword("keyword:"), KeywordParse::NoKeyword);
    }

    #[test]
    fn long_keyword_is_truncated_to_twenty_chars() {
        let long = "가".repeat(25);
        let KeywordParse::Found(keyword) = parse_keyword(&format!("keyword: {long}")) else {
            panic!("expected a keyword");
        };
        assert_eq!(keyword.chars().count(), MAX_KEYWORD_CHARS);

        let ascii = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(
            parse_keyword(&format!("keyword: {ascii}")),
            KeywordParse::Found("abcdefghijklmnopqrst".to_string())
        );
    }

    #[test]
    fn only_first_line_is_considered() {
        assert_eq!(
            parse_keyword("keyword: 카페\nkeyword: 빵집"),
            KeywordParse::Found("카페".to_string())
        );
    }

    #[test]
    fn parses_two_line_place_name_answer() {
        let output = "1) 부산대 앞 조용한 카페입니다.\n2) 장소명: 이디야 부산대점";
        assert_eq!(
            parse_place_name(output),
            PlaceNameParse::Found {
                name: "이디야 부산대점".to_string(),
                description: Some("부산대 앞 조용한 카페입니다.".to_string()),
            }
        );
    }

    #[test]
    fn english_label_and_fullwidth_colon() {
        let output = "2) Place name：\"스타벅스 서면본점\"";
        assert_eq!(
            parse_place_name(output),
            PlaceNameParse::Found {
                name: "스타벅스 서면본점".to_string(),
                description: None,
            }
        );
    }

    #[test]
    fn place_name_on_numbered_first_line() {
        assert_eq!(
            parse_place_name("1) 장소명: 요아정 해운대점"),
            PlaceNameParse::Found {
                name: "요아정 해운대점".to_string(),
                description: None,
            }
        );
    }

    #[test]
    fn place_name_missing_is_reported() {
        assert_eq!(
            parse_place_name("1) 좋은 곳이 많아요.\n2) 잘 모르겠어요"),
            PlaceNameParse::Missing
        );
        assert_eq!(parse_place_name(""), PlaceNameParse::Missing);
    }
}
