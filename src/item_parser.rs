use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Structured form of a loosely formatted item string such as `"milk (~500ml)"`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ParsedItem {
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

/// Recognised unit spellings and their canonical short form.
/// Metric, imperial, then countable units.
const UNIT_SYNONYMS: &[(&str, &[&str])] = &[
    ("g", &["g", "gr", "gram", "grams"]),
    ("kg", &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"]),
    ("mg", &["mg", "milligram", "milligrams"]),
    ("ml", &["ml", "milliliter", "milliliters", "millilitre", "millilitres"]),
    ("l", &["l", "liter", "liters", "litre", "litres"]),
    ("oz", &["oz", "ounce", "ounces"]),
    ("lb", &["lb", "lbs", "pound", "pounds"]),
    ("cup", &["cup", "cups"]),
    ("tbsp", &["tbsp", "tablespoon", "tablespoons"]),
    ("tsp", &["tsp", "teaspoon", "teaspoons"]),
    ("pieces", &["pc", "pcs", "piece", "pieces"]),
    ("can", &["can", "cans"]),
    ("bottle", &["bottle", "bottles"]),
    ("jar", &["jar", "jars"]),
    ("pack", &["pack", "packs", "pkg", "package", "packages"]),
    ("bag", &["bag", "bags"]),
    ("box", &["box", "boxes"]),
    ("carton", &["carton", "cartons"]),
    ("bunch", &["bunch", "bunches"]),
    ("head", &["head", "heads"]),
    ("clove", &["clove", "cloves"]),
    ("slice", &["slice", "slices"]),
    ("loaf", &["loaf", "loaves"]),
    ("dozen", &["dozen"]),
];

const NUMBER: &str = r"\d+(?:[.,]\d+)?(?:/\d+)?";

static PAREN_RE: OnceLock<Regex> = OnceLock::new();
static TRAILING_RE: OnceLock<Regex> = OnceLock::new();
static LEADING_RE: OnceLock<Regex> = OnceLock::new();

/// Alternation of every unit spelling, longest first so `cans` wins over `can`.
fn unit_alternation() -> String {
    let mut spellings: Vec<&str> = UNIT_SYNONYMS
        .iter()
        .flat_map(|(_, synonyms)| synonyms.iter().copied())
        .collect();
    spellings.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    spellings.join("|")
}

fn paren_re() -> &'static Regex {
    PAREN_RE.get_or_init(|| {
        Regex::new(&format!(r"^(.+?)\s*\(\s*~?\s*({NUMBER})\s*([^()]*?)\s*\)$"))
            .expect("parenthetical quantity pattern")
    })
}

fn trailing_re() -> &'static Regex {
    TRAILING_RE.get_or_init(|| {
        Regex::new(&format!(r"(?i)^(.+?)\s+({NUMBER})\s*({})\.?$", unit_alternation()))
            .expect("trailing quantity pattern")
    })
}

fn leading_re() -> &'static Regex {
    LEADING_RE.get_or_init(|| {
        Regex::new(&format!(r"(?i)^({NUMBER})(?:\s*({})\.?)?\s+(.+)$", unit_alternation()))
            .expect("leading quantity pattern")
    })
}

/// Maps a unit spelling to its canonical short form. Unknown units come back
/// trimmed and lower-cased; blank input yields `None`.
pub fn normalize_unit(unit: &str) -> Option<String> {
    let lowered = unit.trim().trim_end_matches('.').to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    let canonical = UNIT_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&lowered.as_str()))
        .map(|(canonical, _)| canonical.to_string());
    Some(canonical.unwrap_or(lowered))
}

/// Float parsing with decimal commas and simple fractions ("1/2").
/// Non-finite results are treated as "no quantity".
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let raw = raw.trim().replace(',', ".");
    let value = match raw.split_once('/') {
        Some((num, den)) => num.parse::<f64>().ok()? / den.parse::<f64>().ok()?,
        None => raw.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn build(name: &str, quantity: &str, unit: Option<&str>) -> Option<ParsedItem> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let quantity = parse_quantity(quantity);
    Some(ParsedItem {
        name: name.to_string(),
        // A unit without a quantity carries no information.
        unit: quantity.and(unit.and_then(normalize_unit)),
        quantity,
    })
}

/// Splits a display string into name, quantity and unit.
///
/// Rules are tried in order: trailing parenthetical (`"Flour (2 kg)"`),
/// trailing quantity with a known unit (`"Milk 2 l"`), leading quantity
/// (`"3 cans Tomatoes"`). Anything else is returned as a bare name, so the
/// function never fails.
pub fn parse_item_quantity(text: &str) -> ParsedItem {
    let text = text.trim();

    if let Some(caps) = paren_re().captures(text) {
        if let Some(item) = build(&caps[1], &caps[2], caps.get(3).map(|m| m.as_str())) {
            return item;
        }
    }

    if let Some(caps) = trailing_re().captures(text) {
        if let Some(item) = build(&caps[1], &caps[2], Some(&caps[3])) {
            return item;
        }
    }

    if let Some(caps) = leading_re().captures(text) {
        if let Some(item) = build(&caps[3], &caps[1], caps.get(2).map(|m| m.as_str())) {
            return item;
        }
    }

    ParsedItem {
        name: text.to_string(),
        quantity: None,
        unit: None,
    }
}

/// Like [`parse_item_quantity`], but keeps stripping quantities from the name
/// until none is left, so `"2 kg Potatoes (1kg)"` yields `"Potatoes"`. The
/// quantity and unit are the ones found first.
pub fn parse_item_name(text: &str) -> ParsedItem {
    let mut parsed = parse_item_quantity(text);
    loop {
        // Every rule that matches removes a number, so the name shrinks.
        let name = parse_item_quantity(&parsed.name).name;
        if name == parsed.name {
            return parsed;
        }
        parsed.name = name;
    }
}

/// Deduplication key: the lower-cased name with every quantity stripped.
pub fn base_name(text: &str) -> String {
    parse_item_name(text).name.to_lowercase()
}

/// Display form understood by [`parse_item_quantity`], e.g. `"Milk (500ml)"`.
pub fn format_item_quantity(name: &str, quantity: Option<f64>, unit: Option<&str>) -> String {
    match quantity {
        Some(q) => format!("{} ({}{})", name.trim(), q, unit.unwrap_or("")),
        None => name.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(name: &str, quantity: Option<f64>, unit: Option<&str>) -> ParsedItem {
        ParsedItem {
            name: name.to_string(),
            quantity,
            unit: unit.map(str::to_string),
        }
    }

    #[test]
    fn test_parenthetical_with_space() {
        assert_eq!(parse_item_quantity("Flour (2 kg)"), parsed("Flour", Some(2.0), Some("kg")));
    }

    #[test]
    fn test_parenthetical_with_tilde() {
        assert_eq!(parse_item_quantity("milk (~500ml)"), parsed("milk", Some(500.0), Some("ml")));
    }

    #[test]
    fn test_parenthetical_unknown_unit_is_kept() {
        assert_eq!(
            parse_item_quantity("Eggs (6 Large)"),
            parsed("Eggs", Some(6.0), Some("large"))
        );
    }

    #[test]
    fn test_parenthetical_without_unit() {
        assert_eq!(parse_item_quantity("Lemons (3)"), parsed("Lemons", Some(3.0), None));
    }

    #[test]
    fn test_trailing_quantity_and_unit() {
        assert_eq!(parse_item_quantity("Rice 1.5 KG"), parsed("Rice", Some(1.5), Some("kg")));
        assert_eq!(
            parse_item_quantity("Butter 250 grams"),
            parsed("Butter", Some(250.0), Some("g"))
        );
    }

    #[test]
    fn test_trailing_number_without_known_unit_is_name() {
        assert_eq!(parse_item_quantity("Route 66 diner"), parsed("Route 66 diner", None, None));
    }

    #[test]
    fn test_leading_quantity_with_unit() {
        assert_eq!(
            parse_item_quantity("3 cans Tomatoes"),
            parsed("Tomatoes", Some(3.0), Some("can"))
        );
        assert_eq!(
            parse_item_quantity("2 pcs Avocado"),
            parsed("Avocado", Some(2.0), Some("pieces"))
        );
    }

    #[test]
    fn test_leading_quantity_without_unit() {
        assert_eq!(parse_item_quantity("4 garlic bulbs"), parsed("garlic bulbs", Some(4.0), None));
    }

    #[test]
    fn test_fraction_and_decimal_comma() {
        assert_eq!(parse_item_quantity("1/2 cup sugar"), parsed("sugar", Some(0.5), Some("cup")));
        assert_eq!(parse_item_quantity("Cream (0,2 l)"), parsed("Cream", Some(0.2), Some("l")));
    }

    #[test]
    fn test_zero_denominator_clears_quantity() {
        assert_eq!(parse_item_quantity("1/0 cup sugar"), parsed("sugar", None, None));
    }

    #[test]
    fn test_bare_number_is_not_split() {
        assert_eq!(parse_item_quantity("12"), parsed("12", None, None));
        assert_eq!(parse_item_quantity("3eggs"), parsed("3eggs", None, None));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 2.5 "), Some(2.5));
        assert_eq!(parse_quantity("3/4"), Some(0.75));
        assert_eq!(parse_quantity("a pinch"), None);
        assert_eq!(parse_quantity("1/0"), None);
    }

    #[test]
    fn test_fallback_is_whole_string() {
        assert_eq!(parse_item_quantity("  Salt to taste "), parsed("Salt to taste", None, None));
        assert_eq!(parse_item_quantity(""), parsed("", None, None));
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(normalize_unit("Grams").as_deref(), Some("g"));
        assert_eq!(normalize_unit("piece").as_deref(), Some("pieces"));
        assert_eq!(normalize_unit("tbsp.").as_deref(), Some("tbsp"));
        assert_eq!(normalize_unit("Handful").as_deref(), Some("handful"));
        assert_eq!(normalize_unit("  "), None);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Milk (~500ml)"), "milk");
        assert_eq!(base_name("2 kg Potatoes"), "potatoes");
        assert_eq!(base_name(" EGGS "), "eggs");
    }

    #[test]
    fn test_nested_quantities_are_all_stripped() {
        assert_eq!(
            parse_item_name("2 kg Potatoes (1kg)"),
            parsed("Potatoes", Some(1.0), Some("kg"))
        );
        assert_eq!(base_name("2 kg Potatoes (1kg)"), "potatoes");
        assert_eq!(base_name("1 1/2 cups flour"), "flour");
    }

    #[test]
    fn test_base_name_is_idempotent() {
        for text in ["2 kg Potatoes (1kg)", "Rice 1.5 KG", "3 cans Tomatoes", "Salt to taste"] {
            let once = base_name(text);
            assert_eq!(base_name(&once), once);
        }
    }

    #[test]
    fn test_format_item_quantity() {
        assert_eq!(format_item_quantity("Milk", Some(500.0), Some("ml")), "Milk (500ml)");
        assert_eq!(format_item_quantity("Limes", Some(2.5), None), "Limes (2.5)");
        assert_eq!(format_item_quantity("Salt", None, Some("g")), "Salt");
    }
}
