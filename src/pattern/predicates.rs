use super::error::PredicateParseError;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("valid field name regex")
});

/// Extra equality constraints for a generated pattern.
///
/// Values of one field are OR-ed in insertion order; fields are AND-ed in
/// lexicographic order regardless of how they were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PredicateSet {
    fields: BTreeMap<String, Vec<String>>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value to the OR-list of `field`
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Fields in lexicographic order with their values in supplied order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, values)| (field.as_str(), values.as_slice()))
    }

    /// Build a set from `field:value` terms; repeated fields OR together
    pub fn parse_terms<'a>(
        terms: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, PredicateParseError> {
        let mut set = Self::new();
        for raw in terms {
            let term = PredicateTerm::parse(raw)?;
            set.push(term.field, term.value);
        }
        Ok(set)
    }
}

impl<K, V, S> FromIterator<(K, V)> for PredicateSet
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (field, values) in iter {
            let field = field.into();
            for value in values {
                set.push(field.clone(), value);
            }
            // keep fields supplied with no values so the compiler can skip them
            set.fields.entry(field).or_default();
        }
        set
    }
}

/// A single predicate term (e.g. "mailer_class:UserMailer")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateTerm {
    /// Log field the value is matched against
    pub field: String,
    /// Literal value, unescaped
    pub value: String,
}

impl PredicateTerm {
    /// Parse a single term. Everything after the first ':' is the value,
    /// kept verbatim; only the field name is trimmed.
    pub fn parse(s: &str) -> Result<Self, PredicateParseError> {
        let (field, value) = s
            .split_once(':')
            .ok_or_else(|| PredicateParseError::InvalidExpression(s.to_string()))?;

        let field = field.trim();
        if !FIELD_RE.is_match(field) {
            return Err(PredicateParseError::InvalidField(field.to_string()));
        }

        if value.trim().is_empty() {
            return Err(PredicateParseError::EmptyValue(field.to_string()));
        }

        Ok(PredicateTerm {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_term() {
        let term = PredicateTerm::parse("mailer_class:UserMailer").unwrap();
        assert_eq!(term.field, "mailer_class");
        assert_eq!(term.value, "UserMailer");
    }

    #[test]
    fn test_value_keeps_colons_and_quotes() {
        let term = PredicateTerm::parse("url:https://example.com").unwrap();
        assert_eq!(term.value, "https://example.com");

        let term = PredicateTerm::parse(r#"msg:He said "hi""#).unwrap();
        assert_eq!(term.value, r#"He said "hi""#);
    }

    #[test]
    fn test_value_whitespace_is_preserved() {
        let term = PredicateTerm::parse(" msg : padded ").unwrap();
        assert_eq!(term.field, "msg");
        assert_eq!(term.value, " padded ");
    }

    #[test]
    fn test_dotted_field_names() {
        let term = PredicateTerm::parse("data.user_id:42").unwrap();
        assert_eq!(term.field, "data.user_id");
    }

    #[test]
    fn test_invalid_terms() {
        assert_eq!(
            PredicateTerm::parse("novalue"),
            Err(PredicateParseError::InvalidExpression("novalue".to_string()))
        );
        assert_eq!(
            PredicateTerm::parse("field:  "),
            Err(PredicateParseError::EmptyValue("field".to_string()))
        );
        assert!(matches!(
            PredicateTerm::parse("bad field:x"),
            Err(PredicateParseError::InvalidField(_))
        ));
        assert!(matches!(
            PredicateTerm::parse("$.evt:x"),
            Err(PredicateParseError::InvalidField(_))
        ));
    }

    #[test]
    fn test_repeated_fields_accumulate_in_order() {
        let set = PredicateSet::parse_terms([
            "mailer_class:UserMailer",
            "level:info",
            "mailer_class:AdminMailer",
        ])
        .unwrap();

        assert_eq!(
            set.get("mailer_class").unwrap(),
            ["UserMailer", "AdminMailer"]
        );
        let fields: Vec<&str> = set.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, ["level", "mailer_class"]);
    }

    #[test]
    fn test_from_iter_keeps_empty_fields() {
        let set: PredicateSet = [("b", vec!["2"]), ("a", vec![])].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("a").unwrap(), &[] as &[String]);
    }
}
