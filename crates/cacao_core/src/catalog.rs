/// How many catalog entries are suggested for a date.
pub const SUGGESTIONS_PER_DATE: usize = 3;

pub const DEFAULT_CATALOG: &[&str] = &[
    "Manually remove the mealybugs",
    "Prune severely infested pods or branches if needed.",
    "Apply neem oil or insecticidal soap",
    "Water the young cacao seedlings",
    "Check soil moisture around the trees",
    "Harvest ripe pods",
    "Inspect pods for black pod rot",
    "Clear fallen leaves and pod husks",
];

pub const DEFAULT_PALETTE: &[&str] = &["#FF6B6B", "#FF9F43", "#6C63FF"];

pub fn default_catalog() -> Vec<String> {
    DEFAULT_CATALOG.iter().map(|entry| entry.to_string()).collect()
}

pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|entry| entry.to_string()).collect()
}

/// Trims entries and drops blank ones.
pub fn clean_entries<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}
