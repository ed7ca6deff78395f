//! Recursive boolean filter used by search, scroll, count and the
//! selector-based mutations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::ExtendedPointId;
use crate::codec::{decode_shape, deserialize_via_from_json};
use crate::error::UnionDecodeError;

const FILTER_KEYS: &[&str] = &["should", "must", "must_not"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// At least one must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should: Option<Vec<Condition>>,
    /// All must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must: Option<Vec<Condition>>,
    /// None may match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_not: Option<Vec<Condition>>,
}

impl Filter {
    pub fn must(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::default().with_must(conditions)
    }

    pub fn should(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::default().with_should(conditions)
    }

    pub fn must_not(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::default().with_must_not(conditions)
    }

    pub fn with_must(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.must.get_or_insert_with(Vec::new).extend(conditions);
        self
    }

    pub fn with_should(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.should.get_or_insert_with(Vec::new).extend(conditions);
        self
    }

    pub fn with_must_not(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.must_not.get_or_insert_with(Vec::new).extend(conditions);
        self
    }

    /// Deepest chain of nested filters below this one.
    pub fn depth(&self) -> usize {
        [&self.should, &self.must, &self.must_not]
            .into_iter()
            .flatten()
            .flatten()
            .map(Condition::depth)
            .max()
            .unwrap_or(0)
    }
}

/// One clause of a [`Filter`].
///
/// Decoding dispatches on the first discriminating key, in this order:
/// `key` (field), `is_empty`, `is_null`, `has_id`, `nested`, and finally an
/// object whose keys are all among `should`/`must`/`must_not` (sub-filter).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Condition {
    Field(FieldCondition),
    IsEmpty(IsEmptyCondition),
    IsNull(IsNullCondition),
    HasId(HasIdCondition),
    Nested(NestedCondition),
    Filter(Filter),
}

impl Condition {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["field", "is_empty", "is_null", "has_id", "nested", "filter"];
        const UNION: &str = "Condition";

        let Value::Object(object) = value else {
            return Err(UnionDecodeError::new(UNION, SHAPES, value));
        };

        if object.contains_key("key") {
            decode_shape(UNION, SHAPES, value).map(Condition::Field)
        } else if object.contains_key("is_empty") {
            decode_shape(UNION, SHAPES, value).map(Condition::IsEmpty)
        } else if object.contains_key("is_null") {
            decode_shape(UNION, SHAPES, value).map(Condition::IsNull)
        } else if object.contains_key("has_id") {
            decode_shape(UNION, SHAPES, value).map(Condition::HasId)
        } else if object.contains_key("nested") {
            decode_shape(UNION, SHAPES, value).map(Condition::Nested)
        } else if object.keys().all(|k| FILTER_KEYS.contains(&k.as_str())) {
            decode_shape(UNION, SHAPES, value).map(Condition::Filter)
        } else {
            Err(UnionDecodeError::new(UNION, SHAPES, value).with_reason("no discriminating key"))
        }
    }

    pub fn matches(key: impl Into<String>, value: impl Into<ValueVariants>) -> Self {
        FieldCondition::new(key).with_match(Match::Value(value.into())).into()
    }

    pub fn matches_text(key: impl Into<String>, text: impl Into<String>) -> Self {
        FieldCondition::new(key).with_match(Match::Text(text.into())).into()
    }

    pub fn matches_any(key: impl Into<String>, any: impl Into<AnyVariants>) -> Self {
        FieldCondition::new(key).with_match(Match::Any(any.into())).into()
    }

    pub fn matches_except(key: impl Into<String>, except: impl Into<AnyVariants>) -> Self {
        FieldCondition::new(key).with_match(Match::Except(except.into())).into()
    }

    pub fn range(key: impl Into<String>, range: Range) -> Self {
        FieldCondition {
            range: Some(range),
            ..FieldCondition::new(key)
        }
        .into()
    }

    pub fn values_count(key: impl Into<String>, values_count: ValuesCount) -> Self {
        FieldCondition {
            values_count: Some(values_count),
            ..FieldCondition::new(key)
        }
        .into()
    }

    pub fn geo_radius(key: impl Into<String>, geo_radius: GeoRadius) -> Self {
        FieldCondition {
            geo_radius: Some(geo_radius),
            ..FieldCondition::new(key)
        }
        .into()
    }

    pub fn geo_bounding_box(key: impl Into<String>, geo_bounding_box: GeoBoundingBox) -> Self {
        FieldCondition {
            geo_bounding_box: Some(geo_bounding_box),
            ..FieldCondition::new(key)
        }
        .into()
    }

    pub fn is_empty(key: impl Into<String>) -> Self {
        Condition::IsEmpty(IsEmptyCondition {
            is_empty: PayloadField { key: key.into() },
        })
    }

    pub fn is_null(key: impl Into<String>) -> Self {
        Condition::IsNull(IsNullCondition {
            is_null: PayloadField { key: key.into() },
        })
    }

    pub fn has_id<I>(ids: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<ExtendedPointId>,
    {
        Condition::HasId(HasIdCondition {
            has_id: ids.into_iter().map(Into::into).collect(),
        })
    }

    pub fn nested(key: impl Into<String>, filter: Filter) -> Self {
        Condition::Nested(NestedCondition {
            nested: Nested {
                key: key.into(),
                filter,
            },
        })
    }

    fn depth(&self) -> usize {
        match self {
            Condition::Nested(n) => 1 + n.nested.filter.depth(),
            Condition::Filter(f) => 1 + f.depth(),
            _ => 0,
        }
    }
}

deserialize_via_from_json!(Condition);

impl From<FieldCondition> for Condition {
    fn from(condition: FieldCondition) -> Self {
        Condition::Field(condition)
    }
}

impl From<Filter> for Condition {
    fn from(filter: Filter) -> Self {
        Condition::Filter(filter)
    }
}

/// Condition on a single payload key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCondition {
    pub key: String,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub r#match: Option<Match>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_bounding_box: Option<GeoBoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_radius: Option<GeoRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_count: Option<ValuesCount>,
}

impl FieldCondition {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            r#match: None,
            range: None,
            geo_bounding_box: None,
            geo_radius: None,
            values_count: None,
        }
    }

    pub fn with_match(mut self, m: Match) -> Self {
        self.r#match = Some(m);
        self
    }
}

/// Match clause. Exactly one of `value`, `text`, `any`, `except` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Match {
    Value(ValueVariants),
    Text(String),
    Any(AnyVariants),
    Except(AnyVariants),
}

impl Match {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["value", "text", "any", "except"];
        const UNION: &str = "Match";

        let Value::Object(object) = value else {
            return Err(UnionDecodeError::new(UNION, SHAPES, value));
        };

        let present: Vec<&str> = SHAPES
            .iter()
            .copied()
            .filter(|k| object.contains_key(*k))
            .collect();

        let nested = |e: UnionDecodeError| UnionDecodeError::new(UNION, SHAPES, value).with_reason(e);
        match present.as_slice() {
            [key] => {
                let inner = &object[*key];
                match *key {
                    "value" => ValueVariants::from_json(inner).map(Match::Value).map_err(nested),
                    "text" => decode_shape(UNION, SHAPES, inner).map(Match::Text),
                    "any" => AnyVariants::from_json(inner).map(Match::Any).map_err(nested),
                    _ => AnyVariants::from_json(inner).map(Match::Except).map_err(nested),
                }
            }
            [] => Err(UnionDecodeError::new(UNION, SHAPES, value)
                .with_reason("none of value/text/any/except present")),
            several => Err(UnionDecodeError::new(UNION, SHAPES, value)
                .with_reason(format!("ambiguous, found keys {}", several.join(", ")))),
        }
    }
}

deserialize_via_from_json!(Match);

/// Scalar compared for exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ValueVariants {
    Keyword(String),
    Integer(i64),
    Bool(bool),
}

impl ValueVariants {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["string", "integer", "bool"];
        match value {
            Value::String(s) => Ok(ValueVariants::Keyword(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(ValueVariants::Integer)
                .ok_or_else(|| UnionDecodeError::new("ValueVariants", SHAPES, value)),
            Value::Bool(b) => Ok(ValueVariants::Bool(*b)),
            _ => Err(UnionDecodeError::new("ValueVariants", SHAPES, value)),
        }
    }
}

deserialize_via_from_json!(ValueVariants);

impl From<&str> for ValueVariants {
    fn from(s: &str) -> Self {
        ValueVariants::Keyword(s.to_string())
    }
}

impl From<String> for ValueVariants {
    fn from(s: String) -> Self {
        ValueVariants::Keyword(s)
    }
}

impl From<i64> for ValueVariants {
    fn from(n: i64) -> Self {
        ValueVariants::Integer(n)
    }
}

impl From<bool> for ValueVariants {
    fn from(b: bool) -> Self {
        ValueVariants::Bool(b)
    }
}

/// Homogeneous set for `any`/`except` matches. An empty array decodes as
/// keywords; empty keyword and integer sets compare equal.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(untagged)]
pub enum AnyVariants {
    Keywords(Vec<String>),
    Integers(Vec<i64>),
}

impl PartialEq for AnyVariants {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnyVariants::Keywords(a), AnyVariants::Keywords(b)) => a == b,
            (AnyVariants::Integers(a), AnyVariants::Integers(b)) => a == b,
            (AnyVariants::Keywords(k), AnyVariants::Integers(i))
            | (AnyVariants::Integers(i), AnyVariants::Keywords(k)) => k.is_empty() && i.is_empty(),
        }
    }
}

impl AnyVariants {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["string array", "integer array"];
        let Value::Array(items) = value else {
            return Err(UnionDecodeError::new("AnyVariants", SHAPES, value));
        };
        if items.iter().all(Value::is_string) {
            return Ok(AnyVariants::Keywords(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ));
        }
        items
            .iter()
            .map(Value::as_i64)
            .collect::<Option<Vec<_>>>()
            .map(AnyVariants::Integers)
            .ok_or_else(|| {
                UnionDecodeError::new("AnyVariants", SHAPES, value)
                    .with_reason("array mixes types or holds non-integers")
            })
    }
}

deserialize_via_from_json!(AnyVariants);

impl From<Vec<String>> for AnyVariants {
    fn from(keywords: Vec<String>) -> Self {
        AnyVariants::Keywords(keywords)
    }
}

impl From<Vec<&str>> for AnyVariants {
    fn from(keywords: Vec<&str>) -> Self {
        AnyVariants::Keywords(keywords.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for AnyVariants {
    fn from(integers: Vec<i64>) -> Self {
        if integers.is_empty() {
            return AnyVariants::Keywords(Vec::new());
        }
        AnyVariants::Integers(integers)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBox {
    pub top_left: GeoPoint,
    pub bottom_right: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRadius {
    pub center: GeoPoint,
    /// Meters.
    pub radius: f64,
}

/// Bounds on the number of values stored under a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuesCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadField {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsEmptyCondition {
    pub is_empty: PayloadField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsNullCondition {
    pub is_null: PayloadField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasIdCondition {
    pub has_id: Vec<ExtendedPointId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedCondition {
    pub nested: Nested,
}

/// Filter applied to each element of an array-of-objects payload key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nested {
    pub key: String,
    pub filter: Filter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_match(raw: Value) -> Result<Condition, serde_json::Error> {
        serde_json::from_value(json!({"key": "city", "match": raw}))
    }

    #[test]
    fn test_match_value_keyword() {
        let condition = field_match(json!({"value": "Berlin"})).unwrap();
        assert_eq!(condition, Condition::matches("city", "Berlin"));
    }

    #[test]
    fn test_match_any_keywords() {
        let condition = field_match(json!({"any": ["Berlin", "London"]})).unwrap();
        assert_eq!(condition, Condition::matches_any("city", vec!["Berlin", "London"]));
    }

    #[test]
    fn test_match_with_two_keys_is_error() {
        let err = field_match(json!({"value": "x", "any": ["y"]})).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Match"));
        assert!(text.contains("ambiguous"));
    }

    #[test]
    fn test_match_with_no_keys_is_error() {
        let err = serde_json::from_value::<Match>(json!({})).unwrap_err();
        assert!(err.to_string().contains("none of value/text/any/except"));
    }

    #[test]
    fn test_value_variants_order() {
        assert_eq!(
            ValueVariants::from_json(&json!(3)).unwrap(),
            ValueVariants::Integer(3)
        );
        assert_eq!(
            ValueVariants::from_json(&json!(true)).unwrap(),
            ValueVariants::Bool(true)
        );
        assert!(ValueVariants::from_json(&json!(2.5)).is_err());
    }

    #[test]
    fn test_any_variants() {
        assert_eq!(
            AnyVariants::from_json(&json!([])).unwrap(),
            AnyVariants::Keywords(vec![])
        );
        assert_eq!(
            AnyVariants::from_json(&json!([1, 2])).unwrap(),
            AnyVariants::Integers(vec![1, 2])
        );
        assert!(AnyVariants::from_json(&json!(["a", 1])).is_err());
    }

    #[test]
    fn test_empty_any_variants_are_one_value() {
        assert!(matches!(AnyVariants::from(Vec::<i64>::new()), AnyVariants::Keywords(_)));
        assert_eq!(AnyVariants::Integers(vec![]), AnyVariants::Keywords(vec![]));
        assert_ne!(AnyVariants::Integers(vec![1]), AnyVariants::Keywords(vec!["1".to_string()]));
        assert_eq!(
            Match::Except(AnyVariants::Integers(vec![])),
            Match::Except(AnyVariants::Keywords(vec![]))
        );
    }

    #[test]
    fn test_condition_dispatch_order() {
        let is_empty: Condition = serde_json::from_value(json!({"is_empty": {"key": "tags"}})).unwrap();
        assert_eq!(is_empty, Condition::is_empty("tags"));

        let is_null: Condition = serde_json::from_value(json!({"is_null": {"key": "tags"}})).unwrap();
        assert_eq!(is_null, Condition::is_null("tags"));

        let has_id: Condition = serde_json::from_value(json!({"has_id": [1, "a"]})).unwrap();
        assert_eq!(
            has_id,
            Condition::has_id([ExtendedPointId::from(1), ExtendedPointId::from("a")])
        );

        let sub: Condition = serde_json::from_value(json!({"must_not": []})).unwrap();
        assert_eq!(
            sub,
            Condition::Filter(Filter {
                must_not: Some(vec![]),
                ..Filter::default()
            })
        );
    }

    #[test]
    fn test_condition_rejects_unknown_object() {
        let err = serde_json::from_value::<Condition>(json!({"unknown": 1})).unwrap_err();
        assert!(err.to_string().contains("no discriminating key"));
    }

    #[test]
    fn test_range_condition_encoding() {
        let condition = Condition::range(
            "price",
            Range {
                gte: Some(10.0),
                lt: Some(100.0),
                ..Range::default()
            },
        );
        assert_eq!(
            serde_json::to_value(&condition).unwrap(),
            json!({"key": "price", "range": {"lt": 100.0, "gte": 10.0}})
        );
    }

    #[test]
    fn test_filter_depth() {
        let leaf = Filter::must([Condition::matches("a", 1i64)]);
        assert_eq!(leaf.depth(), 0);
        let nested = Filter::must([Condition::nested("a", Filter::should([Condition::from(leaf)]))]);
        assert_eq!(nested.depth(), 2);
    }
}
