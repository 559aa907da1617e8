//! User account record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A bettor's account.
///
/// The balance is mutated only by ledger debits and credits and is
/// non-negative after any committed operation. Credentials and sessions
/// live with the authentication collaborator, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub balance: Decimal,
}
