//! The ownership guard.

/// Verdict of the ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerDecision {
    Allow,
    Deny,
}

impl OwnerDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, OwnerDecision::Allow)
    }
}

/// Decide whether `requester` may mutate a resource owned by `owner`.
///
/// Exact match on the canonical (lower-cased) owner name; there are no
/// roles and no overrides. The resource's content plays no part in the
/// decision.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
#[must_use]
pub fn decide(requester: &str, owner: &str) -> OwnerDecision {
    if requester == owner {
        OwnerDecision::Allow
    } else {
        OwnerDecision::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_owner_is_allowed() {
        assert_eq!(decide("user1", "user1"), OwnerDecision::Allow);
        assert!(decide("user1", "user1").is_allowed());
    }

    #[test]
    fn anyone_else_is_denied() {
        assert_eq!(decide("user2", "user1"), OwnerDecision::Deny);
        assert!(!decide("user2", "user1").is_allowed());
    }

    #[test]
    fn comparison_is_exact_not_case_folded() {
        // canonicalization happens upstream, at registration and login
        assert_eq!(decide("User1", "user1"), OwnerDecision::Deny);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_name_owns_its_own_resources(name in "[a-z0-9]{3,30}") {
                prop_assert_eq!(decide(&name, &name), OwnerDecision::Allow);
            }

            #[test]
            fn distinct_names_are_always_denied(
                a in "[a-z0-9]{3,30}",
                b in "[a-z0-9]{3,30}",
            ) {
                prop_assume!(a != b);
                prop_assert_eq!(decide(&a, &b), OwnerDecision::Deny);
            }
        }
    }
}
