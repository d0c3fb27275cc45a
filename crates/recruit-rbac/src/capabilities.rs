//! # Capabilities
//!
//! A capability pairs an [`Action`] with a [`Subject`]. Capability sets are
//! stored as a bitset over the closed `Action × Subject` product, so lookups
//! never compare strings.

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::subjects::Subject;

/// A single `(action, subject)` grant.
///
/// # Example
///
/// ```
/// use recruit_rbac::{Action, Capability, Subject};
///
/// let cap = Capability::new(Action::Create, Subject::Job);
/// assert_eq!(cap.to_string(), "create:Job");
/// assert!(Capability::UNIVERSAL.grants(Action::Delete, Subject::User));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capability {
    /// The action allowed.
    pub action: Action,
    /// The subject the action is allowed on.
    pub subject: Subject,
}

impl Capability {
    /// `manage all`: satisfies every check.
    pub const UNIVERSAL: Capability = Capability {
        action: Action::Manage,
        subject: Subject::All,
    };

    /// Create a capability.
    pub fn new(action: Action, subject: Subject) -> Self {
        Self { action, subject }
    }

    /// Check if this capability grants `action` on `subject`.
    ///
    /// `manage` covers every action and `all` covers every subject. A request
    /// on the wildcard subject is only covered by grants on `all`.
    pub fn grants(&self, action: Action, subject: Subject) -> bool {
        self.action.implies(action) && self.subject.covers(subject)
    }

    /// Check if this is the universal capability.
    pub fn is_universal(&self) -> bool {
        *self == Self::UNIVERSAL
    }

    fn bit(&self) -> u32 {
        1 << (self.action.index() * Subject::COUNT + self.subject.index())
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.action, self.subject)
    }
}

/// Serializable rule as handed to clients (`{"action": "read", "subject": "Job"}`).
pub type Rule = Capability;

/// A set of capabilities attached to a role for one session.
///
/// # Example
///
/// ```
/// use recruit_rbac::{Action, Capability, CapabilitySet, Subject};
///
/// let mut set = CapabilitySet::new();
/// set.add(Capability::new(Action::Read, Subject::Job));
/// set.add(Capability::new(Action::Create, Subject::Job));
///
/// assert!(set.allows(Action::Read, Subject::Job));
/// assert!(!set.allows(Action::Delete, Subject::Job));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet {
    bits: u32,
}

impl CapabilitySet {
    /// Create a new empty capability set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// Create a set holding only `manage all`.
    pub fn universal() -> Self {
        let mut set = Self::new();
        set.add(Capability::UNIVERSAL);
        set
    }

    /// Add a capability to the set.
    pub fn add(&mut self, capability: Capability) {
        self.bits |= capability.bit();
    }

    /// Add multiple capabilities to the set.
    pub fn add_all<I>(&mut self, capabilities: I)
    where
        I: IntoIterator<Item = Capability>,
    {
        for cap in capabilities {
            self.add(cap);
        }
    }

    /// Remove a capability from the set.
    ///
    /// # Returns
    ///
    /// `true` if the capability was present, `false` otherwise
    pub fn remove(&mut self, capability: Capability) -> bool {
        let present = self.contains(capability);
        self.bits &= !capability.bit();
        present
    }

    /// Check for an exact grant, without implication.
    pub fn contains(&self, capability: Capability) -> bool {
        self.bits & capability.bit() != 0
    }

    /// Check if `action` on `subject` is allowed.
    ///
    /// This checks for:
    /// 1. The universal `manage all` grant
    /// 2. An exact `(action, subject)` grant
    /// 3. `manage` on the subject, or the action on `all`
    pub fn allows(&self, action: Action, subject: Subject) -> bool {
        if self.is_universal() {
            return true;
        }
        self.iter().any(|cap| cap.grants(action, subject))
    }

    /// Check if the set holds the universal capability.
    pub fn is_universal(&self) -> bool {
        self.contains(Capability::UNIVERSAL)
    }

    /// Iterate over the capabilities in a stable order (action, then subject).
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Action::all().into_iter().flat_map(move |action| {
            Subject::all()
                .into_iter()
                .map(move |subject| Capability::new(action, subject))
                .filter(move |cap| self.contains(*cap))
        })
    }

    /// Merge another capability set into this one.
    pub fn merge(&mut self, other: &CapabilitySet) {
        self.bits |= other.bits;
    }

    /// Get the rules in this set, ready to serialize for a client.
    pub fn rules(&self) -> Vec<Rule> {
        self.iter().collect()
    }

    /// Get the count of capabilities.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        let mut set = CapabilitySet::new();
        set.add_all(iter);
        set
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for CapabilitySet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rules = Vec::<Capability>::deserialize(deserializer)?;
        Ok(rules.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_bits_are_distinct() {
        let mut seen = 0u32;
        for action in Action::all() {
            for subject in Subject::all() {
                let bit = Capability::new(action, subject).bit();
                assert_eq!(bit.count_ones(), 1);
                assert_eq!(seen & bit, 0);
                seen |= bit;
            }
        }
        assert_eq!(seen.count_ones() as usize, Action::COUNT * Subject::COUNT);
    }

    #[test]
    fn test_capability_set_add_remove() {
        let mut set = CapabilitySet::new();
        assert!(set.is_empty());

        set.add(Capability::new(Action::Read, Subject::Job));
        set.add(Capability::new(Action::Read, Subject::Job));
        assert_eq!(set.len(), 1);

        assert!(set.remove(Capability::new(Action::Read, Subject::Job)));
        assert!(!set.remove(Capability::new(Action::Read, Subject::Job)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_universal_allows_everything() {
        let set = CapabilitySet::universal();
        assert!(set.is_universal());
        assert_eq!(set.len(), 1);
        for action in Action::all() {
            for subject in Subject::all() {
                assert!(set.allows(action, subject));
            }
        }
    }

    #[test]
    fn test_manage_on_subject_implies_actions_on_that_subject() {
        let set: CapabilitySet = [Capability::new(Action::Manage, Subject::Job)]
            .into_iter()
            .collect();

        assert!(set.allows(Action::Delete, Subject::Job));
        assert!(set.allows(Action::Approve, Subject::Job));
        assert!(!set.allows(Action::Read, Subject::Application));
        assert!(!set.allows(Action::Read, Subject::All));
    }

    #[test]
    fn test_wildcard_request_needs_grant_on_all() {
        let set: CapabilitySet = [
            Capability::new(Action::Read, Subject::Job),
            Capability::new(Action::Read, Subject::Dashboard),
        ]
        .into_iter()
        .collect();
        assert!(!set.allows(Action::Read, Subject::All));

        let set: CapabilitySet = [Capability::new(Action::Read, Subject::All)]
            .into_iter()
            .collect();
        assert!(set.allows(Action::Read, Subject::All));
        assert!(set.allows(Action::Read, Subject::User));
        assert!(!set.allows(Action::Update, Subject::User));
    }

    #[test]
    fn test_iter_order_is_stable() {
        let a: CapabilitySet = [
            Capability::new(Action::Update, Subject::Job),
            Capability::new(Action::Read, Subject::Dashboard),
        ]
        .into_iter()
        .collect();
        let b: CapabilitySet = [
            Capability::new(Action::Read, Subject::Dashboard),
            Capability::new(Action::Update, Subject::Job),
        ]
        .into_iter()
        .collect();

        assert_eq!(a, b);
        assert_eq!(
            a.rules(),
            vec![
                Capability::new(Action::Read, Subject::Dashboard),
                Capability::new(Action::Update, Subject::Job),
            ]
        );
    }

    #[test]
    fn test_merge() {
        let mut a: CapabilitySet = [Capability::new(Action::Read, Subject::Job)].into_iter().collect();
        let b: CapabilitySet = [Capability::new(Action::Create, Subject::Job)].into_iter().collect();
        a.merge(&b);
        assert_eq!(a.len(), 2);
        assert!(a.contains(Capability::new(Action::Create, Subject::Job)));
    }

    #[test]
    fn test_rules_serialize_as_action_subject_pairs() {
        let set: CapabilitySet = [Capability::new(Action::Approve, Subject::Application)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "action": "approve", "subject": "Application" }])
        );

        let back: CapabilitySet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
