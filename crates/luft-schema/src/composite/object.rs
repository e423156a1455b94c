//! Object kind: a fixed set of named fields.
//!
//! ## Missing Keys
//!
//! A declared key is *missing* when it is absent from the input and its
//! schema rejects `undefined`. Missing keys are collected into one
//! `MISSING_KEYS` issue at the object's path rather than one issue per
//! field. A field whose schema accepts `undefined` (optional, or with a
//! default) is never missing. With `treat_missing_as_error(false)` an
//! absent key is instead checked as `undefined` at the field's own path.
//!
//! ## Unknown Keys
//!
//! Keys the schema does not declare are stripped by default, copied
//! through with [`UnknownKeys::Passthrough`], or reported in one
//! `EXTRA_KEYS` issue with [`UnknownKeys::Reject`].

use luft_core::{IssueDetail, Map, ParsingContext, Value};

use crate::composite::object_input;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

/// Policy for keys present in the input but not declared by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    #[default]
    Strip,
    Passthrough,
    Reject,
}

#[derive(Debug, Clone)]
pub struct ObjectKind {
    fields: Vec<(String, Schema)>,
    unknown_keys: UnknownKeys,
    missing_as_error: bool,
}

impl Default for ObjectKind {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            unknown_keys: UnknownKeys::default(),
            missing_as_error: true,
        }
    }
}

impl ObjectKind {
    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn field_schema(&self, name: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, schema)| schema)
    }

    /// Declared keys in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn unknown_keys(&self) -> UnknownKeys {
        self.unknown_keys
    }

    pub fn missing_as_error(&self) -> bool {
        self.missing_as_error
    }

    fn insert_field(&mut self, name: String, schema: Schema) {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some(slot) => slot.1 = schema,
            None => self.fields.push((name, schema)),
        }
    }

    fn check_entries(&self, mut input: Map, ctx: &mut ParsingContext) -> Checked {
        let mut output = Map::new();
        let mut missing = Vec::new();
        let mut valid = true;

        for (key, schema) in &self.fields {
            let checked = match input.remove(key) {
                Some(value) => ctx.enter(key.as_str(), |ctx| schema.run(value, ctx))?,
                None if self.missing_as_error => {
                    let mut probe = ctx.fork();
                    match probe.enter(key.as_str(), |probe| schema.run(Value::Undefined, probe))? {
                        Some(value) => Some(value),
                        None => {
                            missing.push(key.clone());
                            continue;
                        }
                    }
                }
                None => ctx.enter(key.as_str(), |ctx| schema.run(Value::Undefined, ctx))?,
            };
            match checked {
                Some(value) if value.is_undefined() => {}
                Some(value) => {
                    output.insert(key.clone(), value);
                }
                None => valid = false,
            }
        }

        if !missing.is_empty() {
            ctx.report(IssueDetail::MissingKeys { keys: missing });
            valid = false;
        }

        match self.unknown_keys {
            UnknownKeys::Strip => {}
            UnknownKeys::Passthrough => output.extend(input),
            UnknownKeys::Reject if !input.is_empty() => {
                ctx.report(IssueDetail::ExtraKeys {
                    keys: input.into_keys().collect(),
                });
                valid = false;
            }
            UnknownKeys::Reject => {}
        }

        Ok(valid.then_some(Value::Object(output)))
    }
}

impl KindSpec for ObjectKind {
    fn tag(&self) -> KindTag {
        KindTag::Object
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

impl Schema<ObjectKind> {
    /// Declare a field, replacing any earlier field with the same name.
    pub fn field(self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let (name, schema) = (name.into(), schema.into());
        self.update_kind(|k| k.insert_field(name, schema))
    }

    /// Add every field of `other`. Fields of `other` replace same-named
    /// fields of this schema.
    pub fn extend(self, other: Schema<ObjectKind>) -> Self {
        self.update_kind(|k| {
            for (name, schema) in &other.kind().fields {
                k.insert_field(name.clone(), schema.clone());
            }
        })
    }

    /// Keep only the named fields.
    pub fn pick<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.into_iter().collect();
        self.update_kind(|k| k.fields.retain(|(field, _)| names.contains(&field.as_str())))
    }

    /// Drop the named fields.
    pub fn omit<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.into_iter().collect();
        self.update_kind(|k| k.fields.retain(|(field, _)| !names.contains(&field.as_str())))
    }

    /// Make every declared field optional.
    pub fn partial(self) -> Self {
        self.update_kind(|k| {
            for (_, schema) in k.fields.iter_mut() {
                *schema = schema.clone().optional().into();
            }
        })
    }

    pub fn unknown_keys(self, policy: UnknownKeys) -> Self {
        self.update_kind(|k| k.unknown_keys = policy)
    }

    /// Report undeclared keys as `EXTRA_KEYS`.
    pub fn strict(self) -> Self {
        self.unknown_keys(UnknownKeys::Reject)
    }

    /// Copy undeclared keys into the output unchecked.
    pub fn passthrough(self) -> Self {
        self.unknown_keys(UnknownKeys::Passthrough)
    }

    /// Drop undeclared keys from the output (the default).
    pub fn strip(self) -> Self {
        self.unknown_keys(UnknownKeys::Strip)
    }

    /// When `false`, an absent key is checked as `undefined` at the
    /// field's path instead of being collected into `MISSING_KEYS`.
    pub fn treat_missing_as_error(self, flag: bool) -> Self {
        self.update_kind(|k| k.missing_as_error = flag)
    }
}
