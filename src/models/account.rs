use serde::{Deserialize, Serialize};

/// Native currency symbol reported with balances.
pub const NATIVE_SYMBOL: &str = "ETH";
/// Unit the balance string is expressed in.
pub const BASE_UNITS: &str = "wei";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub address: String,
    /// Decimal string, base units.
    pub balance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl BalanceResponse {
    /// Balance in wei of the native currency.
    pub fn native(address: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balance: balance.into(),
            symbol: Some(NATIVE_SYMBOL.to_string()),
            units: Some(BASE_UNITS.to_string()),
        }
    }
}
