/// Separator for the plain printed list
pub const PLAIN_SEPARATOR: &str = ",";

/// Separator inside the versions file field
pub const FIELD_SEPARATOR: &str = ", ";

pub fn join_plain(identifiers: &[String]) -> String {
    identifiers.join(PLAIN_SEPARATOR)
}

pub fn join_field(identifiers: &[String]) -> String {
    identifiers.join(FIELD_SEPARATOR)
}

/// Splits a field value the way the Gradle build reads it:
/// on commas, trimmed, empty entries dropped.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
