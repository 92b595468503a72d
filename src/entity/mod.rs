pub mod expense;
pub mod group;
pub mod member;
pub mod membership;
pub mod settlement;
pub mod split;

/// Members are keyed by their Telegram user id.
pub type MemberId = i64;
pub type GroupId = i64;
pub type ExpenseId = i64;
