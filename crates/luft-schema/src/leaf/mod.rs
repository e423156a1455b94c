//! # Leaf Kinds
//!
//! Kinds that check a single scalar value: strings, numbers, booleans,
//! dates, literals, patterns, URLs, UUIDs, and the special kinds
//! (`any`, `never`, `null`, `undefined`).
//!
//! In coerce mode every scalar leaf first unwraps a single-element array,
//! then attempts its own conversion, then applies the same constraints as
//! validate mode. Coerce therefore accepts everything validate accepts.

mod boolean;
mod date;
mod literal;
mod number;
mod pattern;
mod special;
mod string;
mod url;
mod uuid;

pub use boolean::BooleanKind;
pub use date::{DateBound, DateKind};
pub use literal::LiteralKind;
pub use number::{NumberBound, NumberKind, Rounding};
pub use pattern::PatternKind;
pub use special::{AnyKind, NeverKind, NullKind, UndefinedKind};
pub use string::StringKind;
pub use self::url::UrlKind;
pub use self::uuid::{UuidKind, UUID_PATTERN};

use luft_core::{IssueDetail, ParsingContext};

/// Check `length` against optional inclusive bounds, recording one
/// `INVALID_LENGTH` issue on violation. Returns whether it passed.
pub(crate) fn check_length(
    length: usize,
    minimum: Option<usize>,
    maximum: Option<usize>,
    ctx: &mut ParsingContext,
) -> bool {
    let too_short = minimum.is_some_and(|min| length < min);
    let too_long = maximum.is_some_and(|max| length > max);
    if too_short || too_long {
        ctx.report(IssueDetail::InvalidLength {
            length,
            minimum,
            maximum,
        });
        return false;
    }
    true
}
