//! # Coercing Extractors
//!
//! Request data arrives as strings and loosely typed JSON. The extractors
//! here run it through a schema in coerce mode and deserialize the result,
//! so a handler receives a typed value or the client receives a 400 with
//! every issue listed.
//!
//! ```ignore
//! async fn create(Coerced(user): Coerced<NewUser>) -> Result<Json<User>, AppError> {
//!     // `user` already passed the `NewUser::schema()` checks.
//! }
//! ```
//!
//! Handlers whose schema is only known at runtime use [`coerce_json`],
//! [`coerce_query_pairs`], and [`coerce_path_params`] directly.

use std::collections::btree_map::Entry;

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use luft_core::{Map, Value};
use luft_schema::{KindSpec, Schema};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A type that names the schema its wire form must satisfy.
pub trait Described {
    fn schema() -> Schema;

    /// How repeated query keys are folded before coercion.
    fn query_config() -> QueryConfig {
        QueryConfig::default()
    }
}

/// Folding rule for repeated query-string keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryConfig {
    /// Keep only the last occurrence.
    Last,
    /// Gather repeated keys into an array; a key seen once stays a string.
    #[default]
    Collect,
}

/// JSON body extractor: coerce against `T::schema()`, then deserialize.
#[derive(Debug, Clone)]
pub struct Coerced<T>(pub T);

/// Query-string extractor: fold pairs per `T::query_config()`, coerce
/// against `T::schema()`, then deserialize.
#[derive(Debug, Clone)]
pub struct CoercedQuery<T>(pub T);

impl<T, S> FromRequest<S> for Coerced<T>
where
    T: Described + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;
        let schema = T::schema();
        schema
            .coerce_as::<T>(body)
            .map(Coerced)
            .map_err(|err| AppError::from_luft(err, &schema))
    }
}

impl<T, S> FromRequestParts<S> for CoercedQuery<T>
where
    T: Described + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|err| AppError::BadRequest(err.body_text()))?;
        let schema = T::schema();
        let folded = fold_query(pairs, T::query_config());
        schema
            .coerce_as::<T>(folded)
            .map(CoercedQuery)
            .map_err(|err| AppError::from_luft(err, &schema))
    }
}

// ─── Runtime-schema helpers ─────────────────────────────────────────

/// Coerce a parsed JSON body.
pub fn coerce_json<K: KindSpec>(
    schema: &Schema<K>,
    body: serde_json::Value,
) -> Result<Value, AppError> {
    schema
        .coerce(body)
        .map_err(|err| AppError::from_luft(err, schema))
}

/// Fold decoded query pairs per `config` and coerce the resulting object.
pub fn coerce_query_pairs<K, I, N, V>(
    schema: &Schema<K>,
    pairs: I,
    config: QueryConfig,
) -> Result<Value, AppError>
where
    K: KindSpec,
    I: IntoIterator<Item = (N, V)>,
    N: Into<String>,
    V: Into<String>,
{
    let folded = fold_query(pairs, config);
    schema
        .coerce(folded)
        .map_err(|err| AppError::from_luft(err, schema))
}

/// Coerce matched path parameters. Every parameter is a string until the
/// schema says otherwise.
pub fn coerce_path_params<K, I, N, V>(schema: &Schema<K>, params: I) -> Result<Value, AppError>
where
    K: KindSpec,
    I: IntoIterator<Item = (N, V)>,
    N: Into<String>,
    V: Into<String>,
{
    let map: Map = params
        .into_iter()
        .map(|(name, value)| (name.into(), Value::String(value.into())))
        .collect();
    schema
        .coerce(map)
        .map_err(|err| AppError::from_luft(err, schema))
}

fn fold_query<I, N, V>(pairs: I, config: QueryConfig) -> Value
where
    I: IntoIterator<Item = (N, V)>,
    N: Into<String>,
    V: Into<String>,
{
    let mut map = Map::new();
    for (name, value) in pairs {
        let value = Value::String(value.into());
        let slot = map.entry(name.into());
        match (config, slot) {
            (QueryConfig::Last, Entry::Occupied(mut seen)) => {
                seen.insert(value);
            }
            (QueryConfig::Collect, Entry::Occupied(mut seen)) => {
                let slot = seen.get_mut();
                if let Value::Array(items) = slot {
                    items.push(value);
                } else {
                    let first = std::mem::take(slot);
                    *slot = Value::Array(vec![first, value]);
                }
            }
            (_, Entry::Vacant(slot)) => {
                slot.insert(value);
            }
        }
    }
    Value::Object(map)
}
