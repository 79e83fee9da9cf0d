//! URL query-string rendering for request DTOs.
//!
//! Two styles exist. Form style (no prefix) writes `Key=value` and repeats
//! the key for every list item. Deep-object style (a prefix `p`) writes
//! `p[Key]=value` and indexes list items as `p[Key][0]=value`. Nested
//! records always render in deep style under the parent key, so a nested
//! `Path` field comes out as `Key[Path]=...`.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// A scalar that can appear on the right-hand side of a query pair.
pub trait QueryValue {
    fn to_query_value(&self) -> String;
}

impl QueryValue for String {
    fn to_query_value(&self) -> String {
        self.clone()
    }
}

impl QueryValue for bool {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for i32 {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for i64 {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for f32 {
    fn to_query_value(&self) -> String {
        render_float(f64::from(*self), self.to_string(), format!("{self:e}"))
    }
}

impl QueryValue for f64 {
    fn to_query_value(&self) -> String {
        render_float(*self, self.to_string(), format!("{self:e}"))
    }
}

impl QueryValue for Uuid {
    fn to_query_value(&self) -> String {
        self.hyphenated().to_string()
    }
}

impl QueryValue for DateTime<Utc> {
    fn to_query_value(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

/// Decimal notation with at least one fractional digit (`2.0`, `0.25`) for
/// magnitudes in `[1e-3, 1e7)` and zero, computerized scientific notation
/// (`1.0E7`, `1.5E-4`) outside it.
fn render_float(value: f64, plain: String, scientific: String) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        return format!("{sign}Infinity");
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return with_fraction(plain);
    }
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => format!("{}E{exponent}", with_fraction(mantissa.to_string())),
        None => with_fraction(plain),
    }
}

fn with_fraction(digits: String) -> String {
    if digits.contains('.') {
        digits
    } else {
        format!("{digits}.0")
    }
}

/// Form-encodes `value`: alphanumerics and `-_.*` pass through, everything
/// else (space included) is percent-encoded as UTF-8.
fn encode(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%2A", "*")
        .replace('~', "%7E")
}

/// A record that renders itself as URL query pairs.
pub trait ToQueryString {
    /// Append this record's pairs to `query`.
    fn write_query(&self, query: &mut QueryWriter);

    /// Render in form style.
    fn to_query_string(&self) -> String {
        let mut query = QueryWriter::form();
        self.write_query(&mut query);
        query.finish()
    }

    /// Render in deep-object style under `prefix`. An empty prefix means
    /// form style.
    fn to_query_string_with_prefix(&self, prefix: &str) -> String {
        let mut query = if prefix.is_empty() {
            QueryWriter::form()
        } else {
            QueryWriter::deep(prefix)
        };
        self.write_query(&mut query);
        query.finish()
    }
}

/// Accumulates `key=value` pairs for one record level.
#[derive(Debug, Clone)]
pub struct QueryWriter {
    prefix: String,
    suffix: &'static str,
    deep: bool,
    pairs: Vec<String>,
}

impl QueryWriter {
    /// Writer for the top level of a form-style query.
    pub fn form() -> Self {
        Self {
            prefix: String::new(),
            suffix: "",
            deep: false,
            pairs: Vec::new(),
        }
    }

    /// Writer for a deep-object query rooted at `prefix`.
    pub fn deep(prefix: &str) -> Self {
        Self {
            prefix: format!("{prefix}["),
            suffix: "]",
            deep: true,
            pairs: Vec::new(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }

    fn indexed_key(&self, name: &str, index: usize) -> String {
        if self.deep {
            format!("{}[{index}]", self.key(name))
        } else {
            self.key(name)
        }
    }

    fn push(&mut self, key: String, value: &str) {
        self.pairs.push(format!("{key}={}", encode(value)));
    }

    fn extend(&mut self, child: QueryWriter) {
        self.pairs.extend(child.pairs);
    }

    /// A scalar field.
    pub fn value<V: QueryValue>(&mut self, name: &str, value: &Option<V>) {
        if let Some(value) = value {
            let key = self.key(name);
            self.push(key, &value.to_query_value());
        }
    }

    /// A list of scalars.
    pub fn values<V: QueryValue>(&mut self, name: &str, values: &Option<Vec<V>>) {
        for (index, value) in values.iter().flatten().enumerate() {
            let key = self.indexed_key(name, index);
            self.push(key, &value.to_query_value());
        }
    }

    /// A nested record.
    pub fn record<R: ToQueryString>(&mut self, name: &str, record: &Option<R>) {
        if let Some(record) = record {
            let mut child = QueryWriter::deep(&self.key(name));
            record.write_query(&mut child);
            self.extend(child);
        }
    }

    /// A list of nested records.
    pub fn records<R: ToQueryString>(&mut self, name: &str, records: &Option<Vec<R>>) {
        for (index, record) in records.iter().flatten().enumerate() {
            let mut child = QueryWriter::deep(&self.indexed_key(name, index));
            record.write_query(&mut child);
            self.extend(child);
        }
    }

    /// A string-keyed map, one pair per entry in key order.
    pub fn map<V: QueryValue>(&mut self, name: &str, map: &Option<BTreeMap<String, V>>) {
        for (entry, value) in map.iter().flatten() {
            let key = format!("{}[{entry}]", self.key(name));
            self.push(key, &value.to_query_value());
        }
    }

    /// Join the collected pairs with `&`.
    pub fn finish(self) -> String {
        self.pairs.join("&")
    }
}

/// Assertions shared by the DTO test modules.
#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;
    use std::fmt::Debug;

    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_json::Value;

    use super::ToQueryString;

    pub(crate) fn string_pair(name: &str) -> Option<Vec<String>> {
        Some(vec![format!("{name} 1"), format!("{name} 2")])
    }

    fn scalar_count(value: &Value) -> usize {
        match value {
            Value::Null => 0,
            Value::Array(items) => items.iter().map(scalar_count).sum(),
            Value::Object(fields) => fields.values().map(scalar_count).sum(),
            _ => 1,
        }
    }

    /// Checks that `dto` encodes `field_count` keys, decodes back to itself,
    /// and renders one query pair per encoded scalar under the matching
    /// top-level key.
    pub(crate) fn assert_full_dto<T>(dto: &T, field_count: usize)
    where
        T: Serialize + DeserializeOwned + ToQueryString + PartialEq + Debug,
    {
        let json = serde_json::to_value(dto).unwrap();
        let back: T = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(&back, dto);

        let fields = json.as_object().unwrap();
        assert_eq!(fields.len(), field_count);

        let query = dto.to_query_string();
        let mut rendered: BTreeMap<&str, usize> = BTreeMap::new();
        for pair in query.split('&') {
            let (key, _) = pair.split_once('=').unwrap();
            let name = key.split('[').next().unwrap_or(key);
            *rendered.entry(name).or_default() += 1;
        }
        for (name, value) in fields {
            let expected = scalar_count(value);
            assert!(expected > 0, "{name} has no values");
            assert_eq!(rendered.remove(name.as_str()), Some(expected), "{name}");
        }
        assert!(rendered.is_empty(), "keys without a JSON field: {rendered:?}");
    }
}
