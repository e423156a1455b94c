//! UUID kind: the canonical 36-character hyphenated form.

use uuid::Uuid;

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::coerce::unwrap_singleton;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

/// Shape reported in `INVALID_VALUE` issues and the OpenAPI projection.
pub const UUID_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// Hyphen offsets in the canonical form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

#[derive(Debug, Clone, Default)]
pub struct UuidKind {
    version: Option<usize>,
}

/// Parse only the canonical hyphenated form.
fn parse_hyphenated(input: &str) -> Option<Uuid> {
    let bytes = input.as_bytes();
    if bytes.len() != 36 || HYPHENS.iter().any(|&i| bytes[i] != b'-') {
        return None;
    }
    Uuid::try_parse(input).ok()
}

impl UuidKind {
    pub fn version(&self) -> Option<usize> {
        self.version
    }

    fn check(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let Value::String(s) = value else {
            ctx.report(IssueDetail::invalid_type("uuid", &value));
            return Ok(None);
        };
        let Some(uuid) = parse_hyphenated(&s) else {
            ctx.report(IssueDetail::InvalidValue {
                received: Value::String(s),
                options: Vec::new(),
                pattern: Some(UUID_PATTERN.to_string()),
            });
            return Ok(None);
        };
        if let Some(expected) = self.version {
            if uuid.get_version_num() != expected {
                ctx.report_with(
                    IssueDetail::InvalidValue {
                        received: Value::String(s),
                        options: Vec::new(),
                        pattern: Some(UUID_PATTERN.to_string()),
                    },
                    format!(
                        "expected a version {expected} UUID, received version {}",
                        uuid.get_version_num()
                    ),
                );
                return Ok(None);
            }
        }
        Ok(Some(Value::String(s)))
    }
}

impl KindSpec for UuidKind {
    fn tag(&self) -> KindTag {
        KindTag::Uuid
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        self.check(value, ctx)
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let value = match unwrap_singleton(value) {
            Value::String(s) => Value::String(s.trim().to_ascii_lowercase()),
            other => other,
        };
        self.check(value, ctx)
    }
}

impl Schema<UuidKind> {
    /// Require a specific UUID version (e.g. `4`).
    pub fn version(self, version: usize) -> Self {
        self.update_kind(|k| k.version = Some(version))
    }
}
