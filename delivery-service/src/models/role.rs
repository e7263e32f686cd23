//! User roles and their relative authority.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account roles, ordered by authority: CUSTOMER < OWNER < MANAGER < MASTER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Owner,
    Manager,
    Master,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Owner => "owner",
            UserRole::Manager => "manager",
            UserRole::Master => "master",
        }
    }

    /// Numeric authority rank. Total over the enum; higher means more authority.
    pub fn authority_rank(&self) -> u8 {
        match self {
            UserRole::Customer => 0,
            UserRole::Owner => 1,
            UserRole::Manager => 2,
            UserRole::Master => 3,
        }
    }

    /// Manager and Master accounts are staff roles that register products
    /// on behalf of any store.
    pub fn is_privileged(&self) -> bool {
        matches!(self, UserRole::Manager | UserRole::Master)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(UserRole::Customer),
            "owner" => Ok(UserRole::Owner),
            "manager" => Ok(UserRole::Manager),
            "master" => Ok(UserRole::Master),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
