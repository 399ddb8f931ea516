//! Input validation utilities
//!
//! Query parameters are identifiers assigned by the judge site; matching is
//! exact and case-sensitive.

/// Validate a site identifier (user, contest, problem, status label)
pub fn validate_identifier(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Identifier cannot be empty");
    }
    if value.len() > 64 {
        return Err("Identifier is too long");
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Identifier can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(())
}

/// Parse a comma-joined rival list into a sorted, deduplicated set
///
/// Empty segments are dropped; any invalid segment rejects the whole list.
pub fn parse_rival_list(value: &str) -> Result<Vec<String>, &'static str> {
    let mut rivals = Vec::new();
    for part in value.split(',') {
        if part.is_empty() {
            continue;
        }
        validate_identifier(part)?;
        rivals.push(part.to_string());
    }
    rivals.sort();
    rivals.dedup();
    Ok(rivals)
}
