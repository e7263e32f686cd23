//! Authorization policy for store and product mutations.
//!
//! A single pure decision table consumed by every resource service. The actor
//! is always passed explicitly; nothing here reads ambient request state, and
//! nothing here performs IO. A denial is a returned value, never an error the
//! caller can forget to check.
//!
//! The reason strings are the user-facing Korean messages the API has always
//! returned; clients match on them, so they must not change.

use serde::Serialize;

use crate::models::UserRole;

/// Customers may not register products.
pub const DENY_CUSTOMER_CREATE_PRODUCT: &str = "CUSTOMER는 음식을 등록할 권한이 없습니다.";
/// Only the store's owner may register products there.
pub const DENY_NOT_STORE_OWNER_CREATE: &str = "가게의 OWNER만 음식을 등록할 수 있습니다.";
/// Only one's own store (or its products) may be modified.
pub const DENY_NOT_OWN_STORE: &str = "본인 점포만 수정이 가능합니다.";
/// Customers may not register stores.
pub const DENY_CUSTOMER_CREATE_STORE: &str = "CUSTOMER는 점포를 등록할 권한이 없습니다.";

/// The authenticated user making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub username: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

/// Resource kinds the policy governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Store,
    Product,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Store => "store",
            Resource::Product => "product",
        }
    }
}

/// Mutating operations the policy governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// A policy denial: a structured forbidden outcome with a user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denial {
    pub reason: &'static str,
}

impl Denial {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason)
    }
}

/// Authorization decision table for store/product mutations.
#[derive(Debug, Clone)]
pub struct PolicyService;

impl PolicyService {
    /// Decide whether `actor` may perform `operation` on `resource`.
    ///
    /// `owner` is the resolved owner username of the target store (for
    /// product mutations, the store behind the product). It is only
    /// meaningful for ownership-gated rules; `None` on such a rule is a
    /// deny, never an implicit allow. Ownership equality is an exact,
    /// case-sensitive username comparison.
    ///
    /// Rules, first match wins:
    /// 1. Product create: CUSTOMER denied outright; OWNER allowed only for
    ///    their own store; MANAGER/MASTER allowed unconditionally.
    /// 2. Product update/delete: allowed only for an OWNER who owns the
    ///    store behind the product. MANAGER/MASTER are denied here even
    ///    though rule 1 lets them create; the asymmetry is long-standing
    ///    observable behavior and is kept as-is.
    /// 3. Store create: CUSTOMER denied, everyone else allowed (the store
    ///    does not exist yet, so there is no owner to compare).
    /// 4. Store update/delete: rule 2's ownership check against the store's
    ///    own id.
    pub fn evaluate(
        actor: &Actor,
        resource: Resource,
        operation: Operation,
        owner: Option<&str>,
    ) -> Result<(), Denial> {
        match (resource, operation) {
            (Resource::Product, Operation::Create) => match actor.role {
                UserRole::Customer => Err(Denial::new(DENY_CUSTOMER_CREATE_PRODUCT)),
                UserRole::Owner => {
                    if owner == Some(actor.username.as_str()) {
                        Ok(())
                    } else {
                        Err(Denial::new(DENY_NOT_STORE_OWNER_CREATE))
                    }
                }
                UserRole::Manager | UserRole::Master => Ok(()),
            },
            (Resource::Product, Operation::Update | Operation::Delete)
            | (Resource::Store, Operation::Update | Operation::Delete) => {
                if actor.role == UserRole::Owner && owner == Some(actor.username.as_str()) {
                    Ok(())
                } else {
                    Err(Denial::new(DENY_NOT_OWN_STORE))
                }
            }
            (Resource::Store, Operation::Create) => match actor.role {
                UserRole::Customer => Err(Denial::new(DENY_CUSTOMER_CREATE_STORE)),
                _ => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(username: &str, role: UserRole) -> Actor {
        Actor::new(username, role)
    }

    #[test]
    fn customer_never_creates_products() {
        // Denied regardless of what the ownership lookup would have said.
        for owner in [None, Some("carol"), Some("someone-else")] {
            let denial = PolicyService::evaluate(
                &actor("carol", UserRole::Customer),
                Resource::Product,
                Operation::Create,
                owner,
            )
            .unwrap_err();
            assert_eq!(denial.reason, DENY_CUSTOMER_CREATE_PRODUCT);
        }
    }

    #[test]
    fn owner_creates_products_only_in_own_store() {
        let alice = actor("alice", UserRole::Owner);

        assert!(PolicyService::evaluate(
            &alice,
            Resource::Product,
            Operation::Create,
            Some("alice")
        )
        .is_ok());

        let denial = PolicyService::evaluate(
            &alice,
            Resource::Product,
            Operation::Create,
            Some("bob"),
        )
        .unwrap_err();
        assert_eq!(denial.reason, DENY_NOT_STORE_OWNER_CREATE);

        // A missing owner is a deny, never an implicit allow.
        assert!(PolicyService::evaluate(
            &alice,
            Resource::Product,
            Operation::Create,
            None
        )
        .is_err());
    }

    #[test]
    fn manager_and_master_create_products_unconditionally() {
        for role in [UserRole::Manager, UserRole::Master] {
            assert!(PolicyService::evaluate(
                &actor("dan", role),
                Resource::Product,
                Operation::Create,
                Some("alice")
            )
            .is_ok());
        }
    }

    #[test]
    fn product_update_and_delete_require_owning_owner() {
        for op in [Operation::Update, Operation::Delete] {
            assert!(PolicyService::evaluate(
                &actor("alice", UserRole::Owner),
                Resource::Product,
                op,
                Some("alice")
            )
            .is_ok());

            let denial = PolicyService::evaluate(
                &actor("bob", UserRole::Owner),
                Resource::Product,
                op,
                Some("alice"),
            )
            .unwrap_err();
            assert_eq!(denial.reason, DENY_NOT_OWN_STORE);
        }
    }

    #[test]
    fn manager_and_master_are_denied_product_update_and_delete() {
        // Privileged roles can create but not update/delete. The asymmetry
        // is deliberate and pinned here.
        for role in [UserRole::Manager, UserRole::Master] {
            for op in [Operation::Update, Operation::Delete] {
                let denial = PolicyService::evaluate(
                    &actor("dan", role),
                    Resource::Product,
                    op,
                    Some("alice"),
                )
                .unwrap_err();
                assert_eq!(denial.reason, DENY_NOT_OWN_STORE);
            }
        }
    }

    #[test]
    fn ownership_comparison_is_case_sensitive() {
        assert!(PolicyService::evaluate(
            &actor("Alice", UserRole::Owner),
            Resource::Product,
            Operation::Update,
            Some("alice")
        )
        .is_err());
    }

    #[test]
    fn customer_cannot_create_store_others_can() {
        let denial = PolicyService::evaluate(
            &actor("carol", UserRole::Customer),
            Resource::Store,
            Operation::Create,
            None,
        )
        .unwrap_err();
        assert_eq!(denial.reason, DENY_CUSTOMER_CREATE_STORE);

        for role in [UserRole::Owner, UserRole::Manager, UserRole::Master] {
            assert!(PolicyService::evaluate(
                &actor("x", role),
                Resource::Store,
                Operation::Create,
                None
            )
            .is_ok());
        }
    }

    #[test]
    fn store_update_and_delete_follow_the_product_rule() {
        for op in [Operation::Update, Operation::Delete] {
            assert!(PolicyService::evaluate(
                &actor("alice", UserRole::Owner),
                Resource::Store,
                op,
                Some("alice")
            )
            .is_ok());

            for (name, role) in [
                ("bob", UserRole::Owner),
                ("carol", UserRole::Customer),
                ("dan", UserRole::Master),
                ("erin", UserRole::Manager),
            ] {
                let denial =
                    PolicyService::evaluate(&actor(name, role), Resource::Store, op, Some("alice"))
                        .unwrap_err();
                assert_eq!(denial.reason, DENY_NOT_OWN_STORE);
            }
        }
    }
}
