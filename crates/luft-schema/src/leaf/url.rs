//! URL kind: absolute URLs, optionally restricted to a protocol allow-list.

use url::Url;

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::coerce::unwrap_singleton;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

#[derive(Debug, Clone, Default)]
pub struct UrlKind {
    /// Lowercase schemes without the trailing `:`.
    protocols: Option<Vec<String>>,
}

impl UrlKind {
    pub fn protocols(&self) -> Option<&[String]> {
        self.protocols.as_deref()
    }

    fn check(&self, url: Url, ctx: &mut ParsingContext) -> Checked {
        if let Some(allowed) = &self.protocols {
            if !allowed.iter().any(|p| p == url.scheme()) {
                ctx.report_with(
                    IssueDetail::InvalidValue {
                        received: Value::Url(url.clone()),
                        options: allowed
                            .iter()
                            .map(|p| Value::String(format!("{p}:")))
                            .collect(),
                        pattern: None,
                    },
                    format!("protocol \"{}:\" is not allowed", url.scheme()),
                );
                return Ok(None);
            }
        }
        Ok(Some(Value::Url(url)))
    }
}

impl KindSpec for UrlKind {
    fn tag(&self) -> KindTag {
        KindTag::Url
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match value {
            Value::Url(url) => self.check(url, ctx),
            other => {
                ctx.report(IssueDetail::invalid_type("url", &other));
                Ok(None)
            }
        }
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match unwrap_singleton(value) {
            Value::Url(url) => self.check(url, ctx),
            Value::String(s) => match Url::parse(s.trim()) {
                Ok(url) => self.check(url, ctx),
                Err(err) => {
                    ctx.report_with(
                        IssueDetail::invalid_type("url", &Value::String(s.clone())),
                        format!("could not parse {s:?} as url: {err}"),
                    );
                    Ok(None)
                }
            },
            other => {
                ctx.report(IssueDetail::invalid_type("url", &other));
                Ok(None)
            }
        }
    }
}

impl Schema<UrlKind> {
    /// Restrict the scheme. Entries may be given with or without the
    /// trailing colon (`"https"` or `"https:"`).
    pub fn protocols<I, S>(self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let protocols: Vec<String> = protocols
            .into_iter()
            .map(|p| p.as_ref().trim_end_matches(':').to_ascii_lowercase())
            .collect();
        self.update_kind(|k| k.protocols = Some(protocols))
    }
}
