//! Record kind: maps with arbitrary keys checked by a key schema and
//! values checked by a value schema.
//!
//! Object keys always arrive as strings, so the key schema runs in coerce
//! mode regardless of the call's mode (a `number()` key schema accepts
//! `"42"`). The produced key is rendered back to a string.

use luft_core::{Map, Mode, ParsingContext, Value};

use crate::coerce::primitive_to_string;
use crate::composite::object_input;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::leaf::check_length;
use crate::schema::Schema;

#[derive(Debug, Clone)]
pub struct RecordKind {
    key: Schema,
    value: Schema,
    min: Option<usize>,
    max: Option<usize>,
}

fn render_key(key: Value) -> String {
    primitive_to_string(&key).unwrap_or_else(|| key.to_string())
}

impl RecordKind {
    pub(crate) fn new(key: Schema, value: Schema) -> Self {
        Self {
            key,
            value,
            min: None,
            max: None,
        }
    }

    pub fn key_schema(&self) -> &Schema {
        &self.key
    }

    pub fn value_schema(&self) -> &Schema {
        &self.value
    }

    pub fn min_keys(&self) -> Option<usize> {
        self.min
    }

    pub fn max_keys(&self) -> Option<usize> {
        self.max
    }

    fn check_entries(&self, input: Map, ctx: &mut ParsingContext) -> Checked {
        let mut valid = check_length(input.len(), self.min, self.max, ctx);
        let mut output = Map::new();
        for (key, value) in input {
            let checked_key = ctx.enter(key.as_str(), |ctx| {
                ctx.with_mode(Mode::Coerce, |ctx| {
                    self.key.run(Value::String(key.clone()), ctx)
                })
            })?;
            let checked_value = ctx.enter(key.as_str(), |ctx| self.value.run(value, ctx))?;
            match (checked_key, checked_value) {
                (Some(_), Some(value)) if value.is_undefined() => {}
                (Some(key), Some(value)) => {
                    output.insert(render_key(key), value);
                }
                _ => valid = false,
            }
        }
        Ok(valid.then_some(Value::Object(output)))
    }
}

impl KindSpec for RecordKind {
    fn tag(&self) -> KindTag {
        KindTag::Record
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match object_input(value, false, ctx) {
            Some(map) => self.check_entries(map, ctx),
            None => Ok(None),
        }
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match object_input(value, true, ctx) {
            Some(map) => self.check_entries(map, ctx),
            None => Ok(None),
        }
    }
}

impl Schema<RecordKind> {
    /// Require at least `n` entries.
    pub fn min_keys(self, n: usize) -> Self {
        self.update_kind(|k| k.min = Some(n))
    }

    /// Allow at most `n` entries.
    pub fn max_keys(self, n: usize) -> Self {
        self.update_kind(|k| k.max = Some(n))
    }

    pub fn non_empty(self) -> Self {
        self.min_keys(1)
    }
}
