//! Indian state and union territory names.
//!
//! Full names are the canonical representation. Two-letter codes found in
//! compiled sources are mapped onto them so that a record and a criterion
//! always compare in the same form.

/// Two-letter code and full name for every known state/UT.
pub const STATE_NAMES: &[(&str, &str)] = &[
    ("AP", "Andhra Pradesh"),
    ("AR", "Arunachal Pradesh"),
    ("AS", "Assam"),
    ("BR", "Bihar"),
    ("CG", "Chhattisgarh"),
    ("GA", "Goa"),
    ("GJ", "Gujarat"),
    ("HR", "Haryana"),
    ("HP", "Himachal Pradesh"),
    ("JH", "Jharkhand"),
    ("KA", "Karnataka"),
    ("KL", "Kerala"),
    ("MP", "Madhya Pradesh"),
    ("MH", "Maharashtra"),
    ("MN", "Manipur"),
    ("ML", "Meghalaya"),
    ("MZ", "Mizoram"),
    ("NL", "Nagaland"),
    ("OR", "Odisha"),
    ("PB", "Punjab"),
    ("RJ", "Rajasthan"),
    ("SK", "Sikkim"),
    ("TN", "Tamil Nadu"),
    ("TG", "Telangana"),
    ("TR", "Tripura"),
    ("UP", "Uttar Pradesh"),
    ("UK", "Uttarakhand"),
    ("WB", "West Bengal"),
    ("DL", "Delhi"),
    ("PY", "Puducherry"),
    ("JK", "Jammu and Kashmir"),
    ("LA", "Ladakh"),
];

/// Values that stand for "no state" in source data.
const PLACEHOLDERS: &[&str] = &["unknown", "not specified", "n/a", "na", "-"];

/// Returns true if the value carries no state information.
pub fn is_placeholder_state(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed.to_lowercase().as_str())
}

/// Map a raw state value onto its canonical full name.
///
/// Codes and names match case-insensitively. Values outside the table are
/// returned trimmed and otherwise untouched. Placeholders yield `None`.
pub fn canonical_state_name(raw: &str) -> Option<String> {
    if is_placeholder_state(raw) {
        return None;
    }
    let trimmed = raw.trim();
    let known = STATE_NAMES.iter().find(|(code, name)| {
        code.eq_ignore_ascii_case(trimmed) || name.eq_ignore_ascii_case(trimmed)
    });
    Some(match known {
        Some((_, name)) => (*name).to_string(),
        None => trimmed.to_string(),
    })
}

/// Canonicalize a list of raw state values, dropping placeholders and
/// keeping the first occurrence of each canonical name.
pub fn canonicalize_states<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut states: Vec<String> = Vec::new();
    for value in values {
        if let Some(name) = canonical_state_name(value.as_ref())
            && !states.contains(&name)
        {
            states.push(name);
        }
    }
    states
}

/// Two-letter code for a canonical state name, if it is in the table.
pub fn state_code(name: &str) -> Option<&'static str> {
    STATE_NAMES
        .iter()
        .find(|(_, full)| full.eq_ignore_ascii_case(name.trim()))
        .map(|(code, _)| *code)
}
