//! Permission policies: pure decision functions over the authenticated
//! subject, the HTTP method, and the target resource.
//!
//! Every function here is side-effect free. Endpoints that declare more than
//! one policy combine them with logical AND. An anonymous subject
//! (`subject == None`) is denied by every role policy and by the write branch
//! of the read-only policies.

use axum::http::Method;

use crate::models::account::{Account, AccountRole};

/// Resources whose mutating access is gated on an owning account. The first
/// owner-style reference of the entity (owner, seller, user/recipient) wins.
pub trait Owned {
    fn owner_account_id(&self) -> Option<&str>;
}

/// GET, HEAD and OPTIONS never mutate state.
pub fn is_read_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

pub fn is_admin(subject: Option<&Account>) -> bool {
    has_role(subject, AccountRole::Admin)
}

pub fn is_seller(subject: Option<&Account>) -> bool {
    has_role(subject, AccountRole::Seller)
}

pub fn is_buyer(subject: Option<&Account>) -> bool {
    has_role(subject, AccountRole::Buyer)
}

pub fn is_guest(subject: Option<&Account>) -> bool {
    has_role(subject, AccountRole::Guest)
}

fn has_role(subject: Option<&Account>, role: AccountRole) -> bool {
    matches!(subject, Some(account) if account.role == role)
}

/// Reads are open to anyone; writes require the subject to match the
/// resource's owning account.
pub fn is_owner_or_read_only(
    subject: Option<&Account>,
    method: &Method,
    resource: &impl Owned,
) -> bool {
    if is_read_method(method) {
        return true;
    }
    match (subject, resource.owner_account_id()) {
        (Some(account), Some(owner_id)) => account.id == owner_id,
        _ => false,
    }
}

/// Reads are open to anyone; writes require any authenticated subject.
pub fn is_authenticated_or_read_only(subject: Option<&Account>, method: &Method) -> bool {
    is_read_method(method) || subject.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OwnedBy(Option<String>);

    impl Owned for OwnedBy {
        fn owner_account_id(&self) -> Option<&str> {
            self.0.as_deref()
        }
    }

    fn account(role: AccountRole) -> Account {
        Account::new(
            format!("{}@example.com", role.as_str()),
            role.as_str().to_string(),
            "hash".to_string(),
            role,
            None,
        )
    }

    #[test]
    fn role_policies_match_exact_role_only() {
        let admin = account(AccountRole::Admin);
        let seller = account(AccountRole::Seller);
        let buyer = account(AccountRole::Buyer);
        let guest = account(AccountRole::Guest);

        assert!(is_admin(Some(&admin)));
        assert!(!is_admin(Some(&seller)));
        assert!(is_seller(Some(&seller)));
        assert!(!is_seller(Some(&admin)));
        assert!(is_buyer(Some(&buyer)));
        assert!(is_guest(Some(&guest)));
        assert!(!is_guest(Some(&buyer)));
    }

    #[test]
    fn role_policies_deny_anonymous() {
        assert!(!is_admin(None));
        assert!(!is_seller(None));
        assert!(!is_buyer(None));
        assert!(!is_guest(None));
    }

    #[test]
    fn owner_or_read_only_allows_reads_for_anyone() {
        let resource = OwnedBy(Some("someone-else".into()));
        let guest = account(AccountRole::Guest);

        for method in [Method::GET, Method::HEAD, Method::OPTIONS] {
            assert!(is_owner_or_read_only(None, &method, &resource));
            assert!(is_owner_or_read_only(Some(&guest), &method, &resource));
        }
    }

    #[test]
    fn owner_or_read_only_gates_writes_on_ownership() {
        let owner = account(AccountRole::Seller);
        let stranger = account(AccountRole::Seller);
        let resource = OwnedBy(Some(owner.id.clone()));

        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            assert!(is_owner_or_read_only(Some(&owner), &method, &resource));
            assert!(!is_owner_or_read_only(Some(&stranger), &method, &resource));
            assert!(!is_owner_or_read_only(None, &method, &resource));
        }
    }

    #[test]
    fn owner_or_read_only_denies_writes_to_unowned_resources() {
        let seller = account(AccountRole::Seller);
        let resource = OwnedBy(None);
        assert!(!is_owner_or_read_only(Some(&seller), &Method::PATCH, &resource));
        assert!(is_owner_or_read_only(Some(&seller), &Method::GET, &resource));
    }

    #[test]
    fn authenticated_or_read_only_table() {
        let guest = account(AccountRole::Guest);
        assert!(is_authenticated_or_read_only(None, &Method::GET));
        assert!(!is_authenticated_or_read_only(None, &Method::POST));
        assert!(is_authenticated_or_read_only(Some(&guest), &Method::POST));
        assert!(is_authenticated_or_read_only(Some(&guest), &Method::GET));
    }
}
