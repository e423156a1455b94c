//! Array kind: homogeneous lists.

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::coerce::ListParser;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::leaf::check_length;
use crate::schema::Schema;

#[derive(Debug, Clone)]
pub struct ArrayKind {
    element: Schema,
    min: Option<usize>,
    max: Option<usize>,
    unique: bool,
    parser: ListParser,
}

/// Indexes of elements equal to an earlier element.
fn duplicate_indexes(items: &[Value]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(i, item)| items[..*i].contains(item))
        .map(|(i, _)| i)
        .collect()
}

impl ArrayKind {
    pub(crate) fn new(element: Schema) -> Self {
        Self {
            element,
            min: None,
            max: None,
            unique: false,
            parser: ListParser::default(),
        }
    }

    pub fn element(&self) -> &Schema {
        &self.element
    }

    pub fn min_len(&self) -> Option<usize> {
        self.min
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn parser(&self) -> ListParser {
        self.parser
    }

    fn check_items(&self, items: Vec<Value>, ctx: &mut ParsingContext) -> Checked {
        let mut valid = check_length(items.len(), self.min, self.max, ctx);
        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match ctx.enter(index, |ctx| self.element.run(item, ctx))? {
                Some(value) => output.push(value),
                None => valid = false,
            }
        }
        if valid && self.unique {
            let indexes = duplicate_indexes(&output);
            if !indexes.is_empty() {
                ctx.report(IssueDetail::NotUnique { indexes });
                valid = false;
            }
        }
        Ok(valid.then_some(Value::Array(output)))
    }
}

impl KindSpec for ArrayKind {
    fn tag(&self) -> KindTag {
        KindTag::Array
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match value {
            Value::Array(items) => self.check_items(items, ctx),
            other => {
                ctx.report(IssueDetail::invalid_type("array", &other));
                Ok(None)
            }
        }
    }

    /// Strings go through the configured [`ListParser`]. Any other scalar
    /// becomes a one-element list.
    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let items = match value {
            Value::Array(items) => items,
            Value::String(s) => match self.parser.parse(&s) {
                Some(Ok(items)) => items,
                Some(Err(reason)) => {
                    ctx.report(IssueDetail::parsing(reason));
                    return Ok(None);
                }
                None => vec![Value::String(s)],
            },
            Value::Undefined | Value::Null | Value::Object(_) => {
                ctx.report(IssueDetail::invalid_type("array", &value));
                return Ok(None);
            }
            scalar => vec![scalar],
        };
        self.check_items(items, ctx)
    }
}

impl Schema<ArrayKind> {
    pub fn min_len(self, n: usize) -> Self {
        self.update_kind(|k| k.min = Some(n))
    }

    pub fn max_len(self, n: usize) -> Self {
        self.update_kind(|k| k.max = Some(n))
    }

    pub fn length(self, n: usize) -> Self {
        self.update_kind(|k| {
            k.min = Some(n);
            k.max = Some(n);
        })
    }

    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Reject lists containing equal elements.
    pub fn unique(self) -> Self {
        self.update_kind(|k| k.unique = true)
    }

    /// How coercion splits a string input.
    pub fn parser(self, parser: ListParser) -> Self {
        self.update_kind(|k| k.parser = parser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory as l;
    use luft_core::{IssueCode, PathSegment};
    use serde_json::json;

    #[test]
    fn element_issues_carry_indexes() {
        let err = l::array(l::int())
            .validate(Value::from(json!([1, "x", 3, 4.5])))
            .unwrap_err();
        let issues = err.issues().unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, vec![PathSegment::Index(1)]);
        assert_eq!(issues[1].path, vec![PathSegment::Index(3)]);
    }

    #[test]
    fn length_and_elements_both_reported() {
        let err = l::array(l::string())
            .min_len(3)
            .validate(Value::from(json!([1])))
            .unwrap_err();
        let codes: Vec<IssueCode> = err.issues().unwrap().iter().map(|i| i.code()).collect();
        assert_eq!(codes, vec![IssueCode::InvalidLength, IssueCode::InvalidType]);
    }

    #[test]
    fn unique_reports_duplicate_indexes() {
        let err = l::array(l::string())
            .unique()
            .validate(Value::from(json!(["a", "b", "a", "b", "c"])))
            .unwrap_err();
        assert_eq!(
            err.issues().unwrap()[0].detail,
            IssueDetail::NotUnique {
                indexes: vec![2, 3]
            }
        );
    }

    #[test]
    fn unique_compares_coerced_values() {
        let schema = l::array(l::int()).unique();
        assert!(schema.coerce(Value::from(json!(["1", 1]))).is_err());
        assert!(schema.coerce(Value::from(json!(["1", 2]))).is_ok());
    }

    #[test]
    fn coerce_wraps_scalars() {
        let schema = l::array(l::int());
        assert_eq!(schema.coerce("5").unwrap(), Value::from(json!([5])));
        assert_eq!(schema.coerce(7).unwrap(), Value::from(json!([7])));
        assert!(schema.coerce(Value::Null).is_err());
        assert!(schema.validate(7).is_err());
    }

    #[test]
    fn csv_and_json_parsers() {
        let csv = l::array(l::int()).parser(ListParser::Csv);
        assert_eq!(csv.coerce("1, 2,3").unwrap(), Value::from(json!([1, 2, 3])));
        assert_eq!(csv.coerce("").unwrap(), Value::from(json!([])));

        let json_list = l::array(l::string()).parser(ListParser::Json);
        assert_eq!(
            json_list.coerce(r#"["a","b"]"#).unwrap(),
            Value::from(json!(["a", "b"]))
        );
        let err = json_list.coerce("[oops").unwrap_err();
        assert_eq!(err.issues().unwrap()[0].code(), IssueCode::ParsingIssue);
    }
}
