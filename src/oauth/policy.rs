//! Registration acceptance policies for the server-issued mode.

use std::collections::HashSet;

/// Decides whether a client name may register.
///
/// Injected into the registration service so deployments can swap the gate
/// without touching registration logic.
pub trait RegistrationPolicy: Send + Sync {
    /// Returns true when the given client name may register
    fn allows(&self, client_name: &str) -> bool;
}

/// Allow-list policy comparing names by literal equality
pub struct AllowListPolicy {
    allowed_names: HashSet<String>,
}

impl AllowListPolicy {
    /// Create a policy from the configured list of allowed names
    pub fn new<I, S>(allowed_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_names: allowed_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl RegistrationPolicy for AllowListPolicy {
    fn allows(&self, client_name: &str) -> bool {
        self.allowed_names.contains(client_name)
    }
}

/// Policy that accepts every client name
pub struct AllowAllPolicy;

impl RegistrationPolicy for AllowAllPolicy {
    fn allows(&self, _client_name: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_matches_literal_names_only() {
        let policy = AllowListPolicy::new(["nhnace-ai-search-test"]);
        assert!(policy.allows("nhnace-ai-search-test"));
        assert!(!policy.allows("other-app"));
        assert!(!policy.allows("Nhnace-AI-Search-Test"));
        assert!(!policy.allows(""));
    }

    #[test]
    fn test_allow_all_accepts_anything() {
        assert!(AllowAllPolicy.allows("whatever"));
        assert!(AllowAllPolicy.allows(""));
    }
}
