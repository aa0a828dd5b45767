// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

/// The closed list of the 32 region names, lexicographically sorted,
/// lowercase, diacritics-free. Every normalized region token resolves to
/// one of these or is dropped.
pub const CANONICAL_REGIONS: [&str; 32] = [
    "aguascalientes",
    "baja california",
    "baja california sur",
    "campeche",
    "chiapas",
    "chihuahua",
    "ciudad de mexico",
    "coahuila",
    "colima",
    "durango",
    "guanajuato",
    "guerrero",
    "hidalgo",
    "jalisco",
    "mexico",
    "michoacan",
    "morelos",
    "nayarit",
    "nuevo leon",
    "oaxaca",
    "puebla",
    "queretaro",
    "quintana roo",
    "san luis potosi",
    "sinaloa",
    "sonora",
    "tabasco",
    "tamaulipas",
    "tlaxcala",
    "veracruz",
    "yucatan",
    "zacatecas",
];

/// One parsed entry of the serialized `top_locations` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLocation {
    pub name: String,
    pub count: Option<u64>,
}

/// Strip the accented vowels the upstream data actually contains.
/// This is the full mapping by contract; it is not general Unicode folding.
#[must_use]
pub fn strip_diacritics(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

/// Lowercase + diacritic strip, the normalized form used both for region
/// tokens and for the region filter needle.
#[must_use]
pub fn normalize_region_token(input: &str) -> String {
    strip_diacritics(&input.to_lowercase())
}

/// Parse the serialized JSON array of `"Name (N)"` strings into a typed
/// intermediate. Malformed or non-JSON input yields an empty vector; the
/// strings come from an upstream enrichment step and are not validated at
/// write time.
#[must_use]
pub fn parse_top_locations(raw: &str) -> Vec<TopLocation> {
    let Ok(entries) = serde_json::from_str::<Vec<String>>(raw) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let (name_part, rest) = match entry.split_once('(') {
                Some((name, rest)) => (name, Some(rest)),
                None => (entry.as_str(), None),
            };
            let name = name_part.trim();
            if name.is_empty() {
                return None;
            }
            let count = rest
                .and_then(|r| r.split_once(')'))
                .and_then(|(digits, _)| digits.trim().parse::<u64>().ok());
            Some(TopLocation {
                name: name.to_string(),
                count,
            })
        })
        .collect()
}

/// Match one normalized token against the canonical list: equality or
/// bidirectional substring, first canonical name wins.
#[must_use]
pub fn match_canonical(token: &str) -> Option<&'static str> {
    if token.is_empty() {
        return None;
    }
    CANONICAL_REGIONS
        .iter()
        .find(|canonical| {
            token == **canonical || canonical.contains(token) || token.contains(*canonical)
        })
        .copied()
}

/// Canonical region set for a raw `top_locations` string: parsed, each
/// name normalized and matched, unmatched tokens dropped. The set is
/// sorted and de-duplicated by construction.
#[must_use]
pub fn canonical_regions(raw: &str) -> BTreeSet<String> {
    parse_top_locations(raw)
        .iter()
        .filter_map(|loc| match_canonical(&normalize_region_token(&loc.name)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_list_is_sorted_and_normalized() {
        assert_eq!(CANONICAL_REGIONS.len(), 32);
        let mut sorted = CANONICAL_REGIONS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, CANONICAL_REGIONS);
        for name in CANONICAL_REGIONS {
            assert_eq!(normalize_region_token(name), name);
        }
    }

    #[test]
    fn parses_names_and_counts() {
        let parsed = parse_top_locations(r#"["Jalisco (120)","Sonora"]"#);
        assert_eq!(
            parsed,
            vec![
                TopLocation {
                    name: "Jalisco".to_string(),
                    count: Some(120),
                },
                TopLocation {
                    name: "Sonora".to_string(),
                    count: None,
                },
            ]
        );
    }

    #[test]
    fn malformed_input_yields_empty_set() {
        assert!(parse_top_locations("not json").is_empty());
        assert!(parse_top_locations("{\"a\":1}").is_empty());
        assert!(canonical_regions("[1,2,3]").is_empty());
    }

    #[test]
    fn known_names_match_and_unknown_names_drop() {
        let regions = canonical_regions(
            r#"["Jalisco (120)","Edo. de Mexico (45)","Unknown Place (3)"]"#,
        );
        let expected: BTreeSet<String> =
            ["jalisco", "mexico"].iter().map(|s| s.to_string()).collect();
        assert_eq!(regions, expected);
    }

    #[test]
    fn accents_normalize_before_matching() {
        let regions = canonical_regions(r#"["Yucatán (12)","Michoacán (4)","Querétaro (1)"]"#);
        let expected: BTreeSet<String> = ["michoacan", "queretaro", "yucatan"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(regions, expected);
    }

    #[test]
    fn normalization_is_idempotent_over_canonical_names() {
        let raw = serde_json::to_string(&CANONICAL_REGIONS.to_vec()).expect("serialize");
        let once = canonical_regions(&raw);
        let again =
            canonical_regions(&serde_json::to_string(&once.iter().collect::<Vec<_>>()).expect("serialize"));
        assert_eq!(once, again);
    }
}
