use ahash::{AHashMap, AHashSet};
use std::collections::BTreeMap;

/// Grants unconditional access to every collection.
pub const WILDCARD: &str = "*";

/// Grants read access to every labeled item, honored only while the
/// cluster-wide read-only flag is enabled.
pub const GLOBAL_READ_ONLY: &str = "global_read_only";

const WRITE_SUFFIX: &str = "_write";
const READ_SUFFIX: &str = "_read";

/// The permission tags held by a principal for the current session.
/// Computed upstream by the session layer and passed in per request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionSet(AHashSet<String>);

/// What a permission set lets a principal do with an item carrying a
/// given label value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Capability {
    #[default]
    None,
    Read,
    Write,
}

/// A typed label-value capability map, derived from a [`PermissionSet`]
/// once per request instead of re-deriving tag strings per item.
#[derive(Clone, Debug)]
pub struct Capabilities {
    by_label: AHashMap<String, Capability>,
    global_read: bool,
}

// === impl PermissionSet ===

impl PermissionSet {
    pub fn new(tags: impl IntoIterator<Item = String>) -> Self {
        Self(tags.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.0.contains(WILDCARD)
    }

    /// Derives the label-value capability map for one request.
    /// `"{label}_write"` beats `"{label}_read"` for the same label.
    pub fn capabilities(&self, global_read_only: bool) -> Capabilities {
        let mut by_label = AHashMap::new();
        for tag in &self.0 {
            if let Some(label) = tag.strip_suffix(WRITE_SUFFIX) {
                by_label.insert(label.to_string(), Capability::Write);
            } else if let Some(label) = tag.strip_suffix(READ_SUFFIX) {
                by_label.entry(label.to_string()).or_insert(Capability::Read);
            }
        }
        Capabilities {
            by_label,
            global_read: global_read_only && self.0.contains(GLOBAL_READ_ONLY),
        }
    }

    /// Whether this principal may mutate an object carrying `labels`.
    /// This is the guard the mutation surface (delete/scale/exec)
    /// checks before acting on a single object.
    pub fn allows_write(&self, labels: &BTreeMap<String, String>) -> bool {
        if self.has_wildcard() {
            return true;
        }
        labels
            .values()
            .any(|value| self.0.contains(&format!("{value}{WRITE_SUFFIX}")))
    }
}

impl FromIterator<String> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().map(String::from).collect())
    }
}

// === impl Capabilities ===

impl Capabilities {
    pub fn for_label(&self, value: &str) -> Capability {
        match self.by_label.get(value) {
            Some(capability) => *capability,
            None if self.global_read => Capability::Read,
            None => Capability::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_tag_beats_read_tag_for_the_same_label() {
        let perms: PermissionSet = ["checkout_read", "checkout_write"].into_iter().collect();
        let caps = perms.capabilities(false);
        assert_eq!(caps.for_label("checkout"), Capability::Write);
    }

    #[test]
    fn read_tag_grants_read() {
        let perms: PermissionSet = ["checkout_read"].into_iter().collect();
        let caps = perms.capabilities(false);
        assert_eq!(caps.for_label("checkout"), Capability::Read);
        assert_eq!(caps.for_label("billing"), Capability::None);
    }

    #[test]
    fn global_read_only_requires_the_cluster_flag() {
        let perms: PermissionSet = [GLOBAL_READ_ONLY].into_iter().collect();
        assert_eq!(perms.capabilities(false).for_label("anything"), Capability::None);
        assert_eq!(perms.capabilities(true).for_label("anything"), Capability::Read);
    }

    #[test]
    fn global_read_only_never_upgrades_a_write() {
        let perms: PermissionSet = [GLOBAL_READ_ONLY, "checkout_write"].into_iter().collect();
        let caps = perms.capabilities(true);
        assert_eq!(caps.for_label("checkout"), Capability::Write);
        assert_eq!(caps.for_label("billing"), Capability::Read);
    }

    #[test]
    fn allows_write_matches_label_values_not_keys() {
        let labels: BTreeMap<_, _> = [("app".to_string(), "checkout".to_string())].into();
        let can: PermissionSet = ["checkout_write"].into_iter().collect();
        let cannot: PermissionSet = ["app_write", "checkout_read"].into_iter().collect();
        assert!(can.allows_write(&labels));
        assert!(!cannot.allows_write(&labels));
    }

    #[test]
    fn wildcard_allows_write_on_anything() {
        let perms: PermissionSet = [WILDCARD].into_iter().collect();
        assert!(perms.has_wildcard());
        assert!(perms.allows_write(&BTreeMap::new()));
    }
}
