//! Total accessors over the application document.
//!
//! Every function here returns a default instead of failing: `""` for text,
//! `0` for integers, an empty slice for lists. Paths are dotted, e.g.
//! `"data.residence.postalCode"`.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

static EMPTY_OBJECT: Lazy<Value> = Lazy::new(|| Value::Object(Map::new()));

/// Walk a dotted path through nested objects
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
}

/// Scalar rendered as text. Containers and `null` become `""`.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn text(root: &Value, path: &str) -> String {
    lookup(root, path).map(scalar_text).unwrap_or_default()
}

/// Integer leaf; numeric strings are accepted, anything else is `0`.
pub fn integer(root: &Value, path: &str) -> i64 {
    match lookup(root, path) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Fixed decimal leaf; `None` when absent or not numeric.
pub fn decimal(root: &Value, path: &str) -> Option<Decimal> {
    match lookup(root, path)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim().replace(',', "").as_str()).ok(),
        _ => None,
    }
}

/// Boolean leaf. Accepts JSON booleans and the usual "Y"/"true" spellings.
pub fn flag(root: &Value, path: &str) -> bool {
    match lookup(root, path) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "true" | "1"
        ),
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}

/// Selected option of an enum-tagged field.
///
/// `{"key": "MR", ...}` yields `"MR"`. A bare value, an object without `key`,
/// or a missing field yields `""`.
pub fn enum_key(root: &Value, path: &str) -> String {
    lookup(root, path).map(key_of).unwrap_or_default()
}

fn key_of(value: &Value) -> String {
    match value {
        Value::Object(obj) => obj.get("key").map(scalar_text).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Raw text of a date field: the `formatted` member of a date wrapper, or a bare string.
pub fn date_text(root: &Value, path: &str) -> String {
    match lookup(root, path) {
        Some(Value::Object(obj)) => obj.get("formatted").map(scalar_text).unwrap_or_default(),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

pub fn list<'a>(root: &'a Value, path: &str) -> &'a [Value] {
    match lookup(root, path) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// First element of a list of objects, or `{}`.
pub fn first_entry<'a>(root: &'a Value, path: &str) -> &'a Value {
    let items = list(root, path);
    if items.len() > 1 {
        tracing::debug!(path, dropped = items.len() - 1, "only the first entry is used");
    }
    match items.first() {
        Some(entry @ Value::Object(_)) => entry,
        _ => &*EMPTY_OBJECT,
    }
}

/// Option keys of a list-backed group, exactly `cap` long.
///
/// Items may be enum objects or bare scalars. Extra items are dropped,
/// missing ones are padded with `""`.
pub fn repeating_group(root: &Value, path: &str, cap: usize) -> Vec<String> {
    let mut items: Vec<String> = list(root, path)
        .iter()
        .take(cap)
        .map(|item| match item {
            Value::Object(_) => key_of(item),
            other => scalar_text(other),
        })
        .collect();
    items.resize(cap, String::new());
    items
}

/// Tags of a list such as `types`, skipping entries that carry no text
pub fn tags(root: &Value, path: &str) -> Vec<String> {
    list(root, path)
        .iter()
        .map(|item| match item {
            Value::Object(_) => key_of(item),
            other => scalar_text(other),
        })
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// First character, or `""` for empty input
pub fn first_char(s: &str) -> String {
    s.chars().next().map(String::from).unwrap_or_default()
}

/// Join the non-empty parts with single spaces
pub fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One address block with every leaf defaulted to `""`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub no: String,
    pub moo: String,
    pub village: String,
    pub building: String,
    pub floor: String,
    pub soi: String,
    pub road: String,
    pub sub_district: String,
    pub district: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
}

impl Address {
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(block @ Value::Object(_)) = value else {
            return Address::default();
        };
        Address {
            no: text(block, "no"),
            moo: text(block, "moo"),
            village: text(block, "village"),
            building: text(block, "building"),
            floor: text(block, "floor"),
            soi: text(block, "soi"),
            road: text(block, "road"),
            sub_district: text(block, "subDistrict"),
            district: text(block, "district"),
            province: text(block, "province"),
            country: text(block, "country"),
            postal_code: text(block, "postalCode"),
        }
    }

    /// House number, moo and road
    pub fn line1(&self) -> String {
        join_parts(&[self.no.as_str(), self.moo.as_str(), self.road.as_str()])
    }

    /// Sub-district and district
    pub fn line2(&self) -> String {
        join_parts(&[self.sub_district.as_str(), self.district.as_str()])
    }

    pub fn line3(&self) -> String {
        self.province.trim().to_string()
    }

    /// The 12 leaves as `(name, value)` pairs in canonical order
    pub fn fields(&self) -> [(&'static str, &str); 12] {
        [
            ("no", self.no.as_str()),
            ("moo", self.moo.as_str()),
            ("village", self.village.as_str()),
            ("building", self.building.as_str()),
            ("floor", self.floor.as_str()),
            ("soi", self.soi.as_str()),
            ("road", self.road.as_str()),
            ("sub_district", self.sub_district.as_str()),
            ("district", self.district.as_str()),
            ("province", self.province.as_str()),
            ("country", self.country.as_str()),
            ("postal_code", self.postal_code.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_path() {
        let doc = json!({"data": {"residence": {"no": "99"}}});
        assert_eq!(lookup(&doc, "data.residence.no"), Some(&json!("99")));
        assert_eq!(lookup(&doc, "data.mailing.no"), None);
        assert_eq!(lookup(&doc, "data.residence.no.deeper"), None);
    }

    #[test]
    fn test_text_defaults() {
        let doc = json!({"a": "x", "n": 7, "b": true, "z": null, "o": {"k": 1}});
        assert_eq!(text(&doc, "a"), "x");
        assert_eq!(text(&doc, "n"), "7");
        assert_eq!(text(&doc, "b"), "true");
        assert_eq!(text(&doc, "z"), "");
        assert_eq!(text(&doc, "o"), "");
        assert_eq!(text(&doc, "missing"), "");
    }

    #[test]
    fn test_enum_key_tolerates_any_shape() {
        let doc = json!({
            "tagged": {"key": "MR", "label": "Mister"},
            "numeric": {"key": 3},
            "bare": "MR",
            "number": 5,
            "list": ["MR"],
            "empty": {},
            "null_key": {"key": null},
            "nothing": null
        });
        assert_eq!(enum_key(&doc, "tagged"), "MR");
        assert_eq!(enum_key(&doc, "numeric"), "3");
        assert_eq!(enum_key(&doc, "bare"), "");
        assert_eq!(enum_key(&doc, "number"), "");
        assert_eq!(enum_key(&doc, "list"), "");
        assert_eq!(enum_key(&doc, "empty"), "");
        assert_eq!(enum_key(&doc, "null_key"), "");
        assert_eq!(enum_key(&doc, "nothing"), "");
        assert_eq!(enum_key(&doc, "absent"), "");
    }

    #[test]
    fn test_integer_and_decimal() {
        let doc = json!({"id": 42, "s": " 17 ", "bad": "x", "amt": 15000.5, "amt_s": "1,250.75"});
        assert_eq!(integer(&doc, "id"), 42);
        assert_eq!(integer(&doc, "s"), 17);
        assert_eq!(integer(&doc, "bad"), 0);
        assert_eq!(integer(&doc, "missing"), 0);
        assert_eq!(decimal(&doc, "amt"), Decimal::from_str("15000.5").ok());
        assert_eq!(decimal(&doc, "amt_s"), Decimal::from_str("1250.75").ok());
        assert_eq!(decimal(&doc, "bad"), None);
        assert_eq!(decimal(&doc, "missing"), None);
    }

    #[test]
    fn test_flag_spellings() {
        let doc = json!({"t": true, "y": "Y", "f": false, "n": "N", "one": 1});
        assert!(flag(&doc, "t"));
        assert!(flag(&doc, "y"));
        assert!(flag(&doc, "one"));
        assert!(!flag(&doc, "f"));
        assert!(!flag(&doc, "n"));
        assert!(!flag(&doc, "missing"));
    }

    #[test]
    fn test_date_text_wrapper_or_bare() {
        let doc = json!({
            "wrapped": {"formatted": "15/01/1990", "timestamp": 632361600},
            "bare": "1990-01-15",
            "odd": 19900115
        });
        assert_eq!(date_text(&doc, "wrapped"), "15/01/1990");
        assert_eq!(date_text(&doc, "bare"), "1990-01-15");
        assert_eq!(date_text(&doc, "odd"), "");
        assert_eq!(date_text(&doc, "missing"), "");
    }

    #[test]
    fn test_address_defaults_every_leaf() {
        let addr = Address::from_value(Some(&json!({"no": "99", "postalCode": "10110"})));
        assert_eq!(addr.no, "99");
        assert_eq!(addr.postal_code, "10110");
        assert_eq!(addr.fields().len(), 12);
        assert!(addr
            .fields()
            .iter()
            .filter(|(name, _)| !matches!(*name, "no" | "postal_code"))
            .all(|(_, value)| value.is_empty()));

        assert_eq!(Address::from_value(None), Address::default());
        assert_eq!(Address::from_value(Some(&json!("street"))), Address::default());
    }

    #[test]
    fn test_address_renames_sub_district() {
        let addr = Address::from_value(Some(&json!({
            "subDistrict": "Khlong Toei Nuea",
            "district": "Watthana",
            "villageType": "CONDO"
        })));
        assert_eq!(addr.sub_district, "Khlong Toei Nuea");
        assert_eq!(addr.line2(), "Khlong Toei Nuea Watthana");
    }

    #[test]
    fn test_address_lines_single_spaced() {
        let addr = Address::from_value(Some(&json!({"no": "99", "road": "Sukhumvit"})));
        assert_eq!(addr.line1(), "99 Sukhumvit");
        assert_eq!(addr.line2(), "");
        assert_eq!(addr.line3(), "");
    }

    #[test]
    fn test_first_entry() {
        let doc = json!({"accts": [{"bankCode": "004"}, {"bankCode": "014"}], "empty": [], "junk": ["x"]});
        assert_eq!(text(first_entry(&doc, "accts"), "bankCode"), "004");
        assert_eq!(first_entry(&doc, "empty"), &json!({}));
        assert_eq!(first_entry(&doc, "junk"), &json!({}));
        assert_eq!(first_entry(&doc, "missing"), &json!({}));
    }

    #[test]
    fn test_repeating_group_pads_and_caps() {
        let doc = json!({
            "few": [{"key": "SALARY"}, "BUSINESS"],
            "many": ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
        });
        assert_eq!(
            repeating_group(&doc, "few", 7),
            vec!["SALARY", "BUSINESS", "", "", "", "", ""]
        );
        let many = repeating_group(&doc, "many", 8);
        assert_eq!(many.len(), 8);
        assert_eq!(many.last().map(String::as_str), Some("h"));
        assert_eq!(repeating_group(&doc, "missing", 7), vec![String::new(); 7]);
    }

    #[test]
    fn test_tags_skip_empty() {
        let doc = json!({"types": ["EQUITY", {"key": "BOND"}, null, 3]});
        assert_eq!(tags(&doc, "types"), vec!["EQUITY", "BOND", "3"]);
    }

    #[test]
    fn test_first_char_and_join() {
        assert_eq!(first_char("CITIZEN_CARD"), "C");
        assert_eq!(first_char(""), "");
        assert_eq!(first_char("ชาย"), "ช");
        assert_eq!(join_parts(&["99", "", "Sukhumvit"]), "99 Sukhumvit");
        assert_eq!(join_parts(&["", " "]), "");
    }
}
