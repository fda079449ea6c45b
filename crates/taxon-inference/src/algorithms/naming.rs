//! Deterministic equipment names from leading keywords.

use taxon_core::constants::UNKNOWN_EQUIPMENT_NAME;

/// A family of equipment recognised by substring triggers, with optional
/// refinements checked in order.
struct NameRule {
    triggers: &'static [&'static str],
    refinements: &'static [(&'static [&'static str], &'static str)],
    name: &'static str,
}

const RULES: &[NameRule] = &[
    NameRule {
        triggers: &["well"],
        refinements: &[
            (&["production", "prod"], "Production Wells"),
            (&["injection", "injector"], "Injection Wells"),
            (&["water"], "Water Wells"),
        ],
        name: "Wells",
    },
    NameRule {
        triggers: &["meter", "metering"],
        refinements: &[(&["gas"], "Gas Meters"), (&["flow"], "Flow Meters")],
        name: "Meters",
    },
    NameRule {
        triggers: &["separator", "sep"],
        refinements: &[],
        name: "Separators",
    },
    NameRule {
        triggers: &["tank", "storage"],
        refinements: &[],
        name: "Tanks/Storage",
    },
    NameRule {
        triggers: &["compressor", "comp"],
        refinements: &[],
        name: "Compressors",
    },
    NameRule {
        triggers: &["pump"],
        refinements: &[],
        name: "Pumps",
    },
    NameRule {
        triggers: &["heater", "treater"],
        refinements: &[],
        name: "Heaters/Treaters",
    },
];

/// Suggest a name for a group from its strongest keywords.
///
/// Rules match substrings of the space-joined keywords. Without a match the
/// first keyword is title-cased and suffixed with `Equipment`.
pub fn suggest_name<S: AsRef<str>>(keywords: &[S]) -> String {
    let Some(first) = keywords.first() else {
        return UNKNOWN_EQUIPMENT_NAME.to_string();
    };
    let joined = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let has_any = |needles: &[&str]| needles.iter().any(|n| joined.contains(n));

    for rule in RULES {
        if !has_any(rule.triggers) {
            continue;
        }
        return rule
            .refinements
            .iter()
            .find(|&&(needles, _)| has_any(needles))
            .map_or(rule.name, |&(_, name)| name)
            .to_string();
    }
    format!("{} Equipment", title_case(first.as_ref()))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
