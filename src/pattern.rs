//! Built-in breathing patterns and the custom pattern parser.

use crate::session::Phase;

/// The classic relaxing 4-7-8 pattern. This is the default.
pub fn relaxing() -> Vec<Phase> {
    vec![
        Phase::new("Inhale", 4),
        Phase::new("Hold", 7),
        Phase::new("Exhale", 8),
    ]
}

/// Box breathing: four equal sides of four seconds.
pub fn box_breathing() -> Vec<Phase> {
    vec![
        Phase::new("Inhale", 4),
        Phase::new("Hold", 4),
        Phase::new("Exhale", 4),
        Phase::new("Hold", 4),
    ]
}

/// Coherent breathing: even five-second inhale and exhale.
pub fn coherent() -> Vec<Phase> {
    vec![Phase::new("Inhale", 5), Phase::new("Exhale", 5)]
}

/// Parse a user-supplied pattern of comma-separated `name:seconds` pairs,
/// e.g. `"inhale:4,hold:7,exhale:8"`.
///
/// Parsing never fails: malformed entries are skipped, durations are clamped
/// to at least one second, and an empty result falls back to the default
/// pattern.
pub fn parse_custom(spec: &str) -> Vec<Phase> {
    let phases: Vec<Phase> = spec
        .split(',')
        .filter_map(|entry| {
            let (name, secs) = entry.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let duration = secs.trim().parse::<u16>().ok()?;
            Some(Phase::new(title_case(name), duration))
        })
        .collect();

    if phases.is_empty() {
        relaxing()
    } else {
        phases
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
