//! Tuple kind: fixed-length lists with a schema per position.

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::coerce::ListParser;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

#[derive(Debug, Clone)]
pub struct TupleKind {
    items: Vec<Schema>,
    parser: ListParser,
}

impl TupleKind {
    pub(crate) fn new(items: Vec<Schema>) -> Self {
        Self {
            items,
            parser: ListParser::default(),
        }
    }

    /// Position schemas in order.
    pub fn items(&self) -> &[Schema] {
        &self.items
    }

    pub fn parser(&self) -> ListParser {
        self.parser
    }

    /// A length mismatch is reported once; the positions present in both
    /// the input and the schema are still checked.
    fn check_items(&self, values: Vec<Value>, ctx: &mut ParsingContext) -> Checked {
        let expected = self.items.len();
        let mut valid = true;
        if values.len() != expected {
            ctx.report(IssueDetail::InvalidLength {
                length: values.len(),
                minimum: Some(expected),
                maximum: Some(expected),
            });
            valid = false;
        }
        let mut output = Vec::with_capacity(expected);
        for (index, (schema, value)) in self.items.iter().zip(values).enumerate() {
            match ctx.enter(index, |ctx| schema.run(value, ctx))? {
                Some(value) => output.push(value),
                None => valid = false,
            }
        }
        Ok(valid.then_some(Value::Array(output)))
    }
}

impl KindSpec for TupleKind {
    fn tag(&self) -> KindTag {
        KindTag::Tuple
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match value {
            Value::Array(values) => self.check_items(values, ctx),
            other => {
                ctx.report(IssueDetail::invalid_type("array", &other));
                Ok(None)
            }
        }
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match value {
            Value::Array(values) => self.check_items(values, ctx),
            Value::String(s) => match self.parser.parse(&s) {
                Some(Ok(values)) => self.check_items(values, ctx),
                Some(Err(reason)) => {
                    ctx.report(IssueDetail::parsing(reason));
                    Ok(None)
                }
                None => {
                    ctx.report(IssueDetail::invalid_type("array", &Value::String(s)));
                    Ok(None)
                }
            },
            other => {
                ctx.report(IssueDetail::invalid_type("array", &other));
                Ok(None)
            }
        }
    }
}

impl Schema<TupleKind> {
    /// How coercion splits a string input.
    pub fn parser(self, parser: ListParser) -> Self {
        self.update_kind(|k| k.parser = parser)
    }
}
