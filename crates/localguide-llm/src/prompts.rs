//! Prompt builders. Each one pins the answer to a line format that
//! [`crate::parse`] understands.

use std::fmt::Write as _;

use localguide_core::Place;

pub const KEYWORD_SYSTEM: &str = "You turn a user's request for a local recommendation into one short \
search keyword for a map search service. Answer with exactly one line in the form \
`keyword: <value>`. The value is at most 20 characters, in the user's language, and names a kind of \
place or food (for example `keyword: 돼지국밥`). If the request names nothing searchable, answer \
`keyword: none`. Do not add any other text.";

pub const PLACE_NAME_SYSTEM: &str = "You are a local recommendation expert. Only name places that \
really exist. Always include the branch name, with at least two words (for example \
\"이디야 부산대점\" or \"스타벅스 서면본점\"), never a bare brand name. Answer in exactly two lines:\n\
1) <one-sentence description>\n\
2) 장소명: <branch-qualified place name>";

pub const SUMMARY_SYSTEM: &str = "You describe the commercial character of a small set of nearby \
places: what kinds of businesses they are and the general atmosphere of the area. Use only the \
facts listed. Never invent prices, menus, opening hours, or ratings. Answer in two or three \
sentences in the user's language.";

/// User message for keyword extraction.
#[must_use]
pub fn keyword_user(user_text: &str) -> String {
    format!("Request: {}", user_text.trim())
}

/// User message for qualified place-name extraction, scoped to `region`.
#[must_use]
pub fn place_name_user(region: &str, category: &str, user_text: &str) -> String {
    format!(
        "Region: {region}\nCategory: {category}\nRequest: {}",
        user_text.trim()
    )
}

/// User message for the summary call: the request plus one line per place.
#[must_use]
pub fn summary_user(user_text: &str, places: &[Place]) -> String {
    let mut out = format!("Request: {}\nPlaces:\n", user_text.trim());
    for (i, place) in places.iter().enumerate() {
        let _ = write!(out, "{}. {} | {}", i + 1, place.name, place.address);
        if let Some(category) = &place.category {
            let _ = write!(out, " | {category}");
        }
        if let Some(distance) = place.distance_m {
            let _ = write!(out, " | {distance}m");
        }
        out.push('\n');
    }
    out
}
