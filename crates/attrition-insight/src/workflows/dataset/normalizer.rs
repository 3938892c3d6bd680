use crate::workflows::attrition::domain::Gender;

pub(crate) fn clean_text(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Header cells compare case-insensitively, with spaces and dashes read as underscores.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = clean_text(value);
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    collapsed.replace('-', "_").to_ascii_lowercase()
}

/// Accepts `male`/`female` and their initials in any case.
pub fn parse_gender(value: &str) -> Option<Gender> {
    match clean_text(value).to_ascii_lowercase().as_str() {
        "male" | "m" => Some(Gender::Male),
        "female" | "f" => Some(Gender::Female),
        _ => None,
    }
}
