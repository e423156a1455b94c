//! # OpenAPI Schema Projection
//!
//! Reads a schema's metadata and constraints and builds the matching
//! `utoipa` schema object. Nothing is checked or mutated; document assembly
//! (paths, components) stays with the caller.
//!
//! ## Mapping
//!
//! - dates, URLs and UUIDs become strings with `date-time`, `uri` and
//!   `uuid` formats; pattern schemas carry their expression.
//! - literal sets become `enum`; `never` becomes an empty `enum`.
//! - `undefined` alternatives are dropped from unions; an object field whose
//!   schema accepts a missing value (or has a default) is not `required`.
//! - tuples become arrays of fixed length whose items are `oneOf` the
//!   positional schemas.
//! - a lazy schema whose target is named becomes a `$ref` to
//!   `#/components/schemas/<name>`; unnamed lazy targets are inlined up to a
//!   fixed depth, then left open.

use luft_schema::{Kind, KindSpec, KindTag, NumberKind, Schema, StringKind};
use utoipa::openapi::schema::{
    AdditionalProperties, ArrayBuilder, KnownFormat, ObjectBuilder, OneOfBuilder, SchemaFormat,
    Type,
};
use utoipa::openapi::{Deprecated, Ref, RefOr, Schema as ApiSchema};

const MAX_INLINE_LAZY_DEPTH: usize = 8;

/// Project `schema` into an OpenAPI schema object.
pub fn schema_object<K>(schema: &Schema<K>) -> RefOr<ApiSchema>
where
    K: KindSpec,
    Schema<K>: Clone + Into<Schema>,
{
    project(&schema.clone().into(), 0)
}

fn project(schema: &Schema, lazy_depth: usize) -> RefOr<ApiSchema> {
    let mut projected = match schema.kind() {
        Kind::String(kind) => string_object(kind),
        Kind::Number(kind) => number_object(kind),
        Kind::Boolean(_) => typed(Type::Boolean),
        Kind::Date(_) => formatted(KnownFormat::DateTime),
        Kind::Url(_) => formatted(KnownFormat::Uri),
        Kind::Uuid(_) => formatted(KnownFormat::Uuid),
        Kind::Pattern(kind) => ApiSchema::Object(
            ObjectBuilder::new()
                .schema_type(Type::String)
                .pattern(Some(kind.as_str()))
                .build(),
        ),
        Kind::Literal(kind) => ApiSchema::Object(
            ObjectBuilder::new()
                .enum_values(Some(kind.values().iter().map(|value| value.to_json())))
                .build(),
        ),
        Kind::Never(_) => ApiSchema::Object(
            ObjectBuilder::new()
                .enum_values(Some(Vec::<serde_json::Value>::new()))
                .build(),
        ),
        Kind::Null(_) => typed(Type::Null),
        Kind::Any(_) | Kind::Undefined(_) => ApiSchema::Object(ObjectBuilder::new().build()),
        Kind::Object(kind) => {
            let mut builder = ObjectBuilder::new().schema_type(Type::Object);
            for (name, field) in kind.fields() {
                builder = builder.property(name, project(field, lazy_depth));
                if !accepts_missing(field) {
                    builder = builder.required(name);
                }
            }
            if kind.unknown_keys() == luft_schema::UnknownKeys::Reject {
                builder = builder.additional_properties(Some(AdditionalProperties::FreeForm(false)));
            }
            ApiSchema::Object(builder.build())
        }
        Kind::Array(kind) => ApiSchema::Array(
            ArrayBuilder::new()
                .items(project(kind.element(), lazy_depth))
                .min_items(kind.min_len())
                .max_items(kind.max_len())
                .unique_items(kind.is_unique())
                .build(),
        ),
        Kind::Tuple(kind) => {
            let mut items = OneOfBuilder::new();
            for item in kind.items() {
                items = items.item(project(item, lazy_depth));
            }
            let len = kind.items().len();
            ApiSchema::Array(
                ArrayBuilder::new()
                    .items(RefOr::T(ApiSchema::OneOf(items.build())))
                    .min_items(Some(len))
                    .max_items(Some(len))
                    .build(),
            )
        }
        Kind::Record(kind) => ApiSchema::Object(
            ObjectBuilder::new()
                .schema_type(Type::Object)
                .additional_properties(Some(AdditionalProperties::RefOr(project(
                    kind.value_schema(),
                    lazy_depth,
                ))))
                .min_properties(kind.min_keys())
                .max_properties(kind.max_keys())
                .build(),
        ),
        Kind::Union(kind) => {
            let present: Vec<&Schema> = kind
                .alternatives()
                .iter()
                .filter(|alt| alt.tag() != KindTag::Undefined)
                .collect();
            match present.as_slice() {
                [only] => return annotate(project(only, lazy_depth), schema),
                alternatives => {
                    let mut one_of = OneOfBuilder::new();
                    for alt in alternatives {
                        one_of = one_of.item(project(alt, lazy_depth));
                    }
                    ApiSchema::OneOf(one_of.build())
                }
            }
        }
        Kind::Lazy(kind) => {
            let target = kind.resolve();
            if let Some(name) = target.name() {
                return RefOr::Ref(Ref::from_schema_name(name));
            }
            if lazy_depth >= MAX_INLINE_LAZY_DEPTH {
                return RefOr::T(ApiSchema::Object(ObjectBuilder::new().build()));
            }
            return annotate(project(&target, lazy_depth + 1), schema);
        }
    };
    apply_meta(&mut projected, schema);
    RefOr::T(projected)
}

fn annotate(projected: RefOr<ApiSchema>, schema: &Schema) -> RefOr<ApiSchema> {
    match projected {
        RefOr::T(mut inner) => {
            apply_meta(&mut inner, schema);
            RefOr::T(inner)
        }
        reference => reference,
    }
}

fn apply_meta(projected: &mut ApiSchema, schema: &Schema) {
    let description = schema.description_text().map(str::to_string);
    let default = schema.default_value().map(|value| value.to_json());
    let deprecated = schema.deprecation().map(|_| Deprecated::True);
    let title = schema.name().map(str::to_string);
    match projected {
        ApiSchema::Object(object) => {
            object.title = title.or(object.title.take());
            object.description = description.or(object.description.take());
            object.default = default.or(object.default.take());
            object.deprecated = deprecated.or(object.deprecated.take());
        }
        ApiSchema::Array(array) => {
            array.title = title.or(array.title.take());
            array.description = description.or(array.description.take());
            array.default = default.or(array.default.take());
            array.deprecated = deprecated.or(array.deprecated.take());
        }
        ApiSchema::OneOf(one_of) => {
            one_of.title = title.or(one_of.title.take());
            one_of.description = description.or(one_of.description.take());
            one_of.default = default.or(one_of.default.take());
        }
        _ => {}
    }
}

/// Whether an object field may be absent from the input.
fn accepts_missing(schema: &Schema) -> bool {
    if schema.default_value().is_some() {
        return true;
    }
    match schema.kind() {
        Kind::Undefined(_) | Kind::Any(_) => true,
        Kind::Union(kind) => kind.alternatives().iter().any(accepts_missing),
        _ => false,
    }
}

fn typed(ty: Type) -> ApiSchema {
    ApiSchema::Object(ObjectBuilder::new().schema_type(ty).build())
}

fn formatted(format: KnownFormat) -> ApiSchema {
    ApiSchema::Object(
        ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(format)))
            .build(),
    )
}

fn string_object(kind: &StringKind) -> ApiSchema {
    ApiSchema::Object(
        ObjectBuilder::new()
            .schema_type(Type::String)
            .min_length(kind.min_len())
            .max_length(kind.max_len())
            .build(),
    )
}

fn number_object(kind: &NumberKind) -> ApiSchema {
    let ty = if kind.is_integer() {
        Type::Integer
    } else {
        Type::Number
    };
    let mut builder = ObjectBuilder::new()
        .schema_type(ty)
        .multiple_of(kind.divisor());
    if let Some(bound) = kind.minimum() {
        builder = if bound.inclusive {
            builder.minimum(Some(bound.value))
        } else {
            builder.exclusive_minimum(Some(bound.value))
        };
    }
    if let Some(bound) = kind.maximum() {
        builder = if bound.inclusive {
            builder.maximum(Some(bound.value))
        } else {
            builder.exclusive_maximum(Some(bound.value))
        };
    }
    ApiSchema::Object(builder.build())
}
