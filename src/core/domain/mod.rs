//! Domain types.

mod expression;
mod fingerprint;
mod member;
mod recipient;

pub use expression::AccessExpression;
pub(crate) use expression::tokenize;
pub use fingerprint::Fingerprint;
pub use member::{Group, Member, User};
pub use recipient::Recipients;
