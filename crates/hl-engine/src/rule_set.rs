//! An ordered, id-indexed collection of holiday rules.
//!
//! Every mutation draws a fresh version stamp from a process-wide counter.
//! The [`Fingerprint`] hashes the active rule ids together with that stamp,
//! so cached results keyed by fingerprint can never be served for a rule set
//! that changed after they were computed.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use fxhash::{FxHashMap, FxHasher};
use hl_core::errors::{Error, Result};

use crate::rule::HolidayRule;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a rule set's current contents, used as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Raw hash value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Holiday rules in registration order, with unique ids.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<HolidayRule>,
    index: FxHashMap<String, usize>,
    version: u64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            index: FxHashMap::default(),
            version: next_version(),
        }
    }

    /// Build a rule set, validating and registering each rule in order.
    pub fn from_rules(rules: impl IntoIterator<Item = HolidayRule>) -> Result<Self> {
        let mut set = Self::new();
        for rule in rules {
            set.add(rule)?;
        }
        Ok(set)
    }

    /// Validate and append a rule.
    ///
    /// # Errors
    /// [`Error::InvalidRule`] if the rule is malformed or its id is taken.
    pub fn add(&mut self, rule: HolidayRule) -> Result<()> {
        rule.validate()?;
        if self.index.contains_key(rule.id()) {
            return Err(Error::invalid_rule(rule.id(), "duplicate rule id"));
        }
        self.index.insert(rule.id().to_owned(), self.rules.len());
        self.rules.push(rule);
        self.version = next_version();
        Ok(())
    }

    /// Builder form of [`RuleSet::add`].
    pub fn with_rule(mut self, rule: HolidayRule) -> Result<Self> {
        self.add(rule)?;
        Ok(self)
    }

    /// Remove a rule by id and return it.
    pub fn remove(&mut self, id: &str) -> Result<HolidayRule> {
        let pos = self.position(id)?;
        let rule = self.rules.remove(pos);
        self.index.remove(id);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        self.version = next_version();
        Ok(rule)
    }

    /// Activate or deactivate a rule without unregistering it.
    pub fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        let pos = self.position(id)?;
        self.rules[pos].set_active(active);
        self.version = next_version();
        Ok(())
    }

    /// Look up a rule by id.
    pub fn get(&self, id: &str) -> Option<&HolidayRule> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    /// Whether a rule with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All rules, active or not, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &HolidayRule> {
        self.rules.iter()
    }

    /// Active rules in registration order.
    pub fn active_rules(&self) -> impl Iterator<Item = &HolidayRule> {
        self.rules.iter().filter(|r| r.is_active())
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Version stamp of the last mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Hash of the active ids and the version stamp.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = FxHasher::default();
        for rule in self.active_rules() {
            rule.id().hash(&mut hasher);
        }
        self.version.hash(&mut hasher);
        Fingerprint(hasher.finish())
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownRule(id.to_owned()))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a HolidayRule;
    type IntoIter = std::slice::Iter<'a, HolidayRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
