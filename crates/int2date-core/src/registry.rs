//! Per-language hover activation state.
//!
//! Each language identifier ("kind tag") moves through
//! `unregistered -> active <-> inactive`. An entry is created on the first
//! activation and only toggled afterwards, so the host-side hover provider
//! for a tag is registered at most once per registry lifetime.
//! [`HoverRegistry::teardown`] forgets every tag.

use std::fmt;

/// Hover preview activation for a single kind tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverActivation {
    kind_tag: String,
    active: bool,
}

impl HoverActivation {
    pub fn kind_tag(&self) -> &str {
        &self.kind_tag
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// What an activation request changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// First activation of the tag. The host provider must be registered.
    Registered,
    /// An inactive entry was switched back on.
    Reactivated,
    /// Nothing changed.
    AlreadyActive,
}

/// Result of [`HoverRegistry::activate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    pub kind_tag: String,
    pub outcome: ActivationOutcome,
}

impl ActivationReport {
    /// Whether the caller must register a hover provider with the host.
    pub fn needs_host_registration(&self) -> bool {
        self.outcome == ActivationOutcome::Registered
    }
}

impl fmt::Display for ActivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            ActivationOutcome::AlreadyActive => {
                write!(f, "Hover for '{}' is already activated", self.kind_tag)
            }
            ActivationOutcome::Registered | ActivationOutcome::Reactivated => {
                write!(f, "Hover activated for '{}'", self.kind_tag)
            }
        }
    }
}

/// Result of [`HoverRegistry::deactivate_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeactivationReport {
    /// Tags switched off by this call, in creation order.
    Deactivated(Vec<String>),
    NoneActivated,
}

impl fmt::Display for DeactivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deactivated(tags) => write!(f, "Hover deactivated for: {}", tags.join(", ")),
            Self::NoneActivated => f.write_str("No hover was activated"),
        }
    }
}

/// Result of [`HoverRegistry::list_active`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveHovers {
    Active(Vec<String>),
    NoneActive,
}

impl fmt::Display for ActiveHovers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active(tags) => write!(f, "Active hovers: {}", tags.join(", ")),
            Self::NoneActive => f.write_str("No hover is active"),
        }
    }
}

/// Collection of hover activations, at most one per kind tag.
///
/// The registry does no locking. Owners that share it between handlers wrap
/// it in a lock.
///
/// # Examples
///
/// ```
/// use int2date_core::{ActivationOutcome, HoverRegistry};
///
/// let mut registry = HoverRegistry::new();
/// assert_eq!(registry.activate("xml").outcome, ActivationOutcome::Registered);
/// assert_eq!(registry.activate("xml").outcome, ActivationOutcome::AlreadyActive);
/// assert!(registry.is_active("xml"));
///
/// registry.deactivate_all();
/// assert_eq!(registry.activate("xml").outcome, ActivationOutcome::Reactivated);
/// ```
#[derive(Debug, Default)]
pub struct HoverRegistry {
    entries: Vec<HoverActivation>,
}

impl HoverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, kind_tag: &str) -> Option<&mut HoverActivation> {
        self.entries.iter_mut().find(|e| e.kind_tag == kind_tag)
    }

    /// Looks up the entry for `kind_tag`.
    pub fn get(&self, kind_tag: &str) -> Option<&HoverActivation> {
        self.entries.iter().find(|e| e.kind_tag == kind_tag)
    }

    /// Returns `true` if hover preview is enabled for `kind_tag`.
    pub fn is_active(&self, kind_tag: &str) -> bool {
        self.get(kind_tag).is_some_and(HoverActivation::is_active)
    }

    /// Enables hover preview for `kind_tag`, creating its entry on first use.
    pub fn activate(&mut self, kind_tag: &str) -> ActivationReport {
        let outcome = match self.entry_mut(kind_tag) {
            Some(entry) if entry.active => ActivationOutcome::AlreadyActive,
            Some(entry) => {
                entry.active = true;
                ActivationOutcome::Reactivated
            }
            None => {
                self.entries.push(HoverActivation {
                    kind_tag: kind_tag.to_string(),
                    active: true,
                });
                ActivationOutcome::Registered
            }
        };

        tracing::debug!(kind_tag, ?outcome, "hover activation");

        ActivationReport {
            kind_tag: kind_tag.to_string(),
            outcome,
        }
    }

    /// Disables every active entry and reports which tags were switched off.
    pub fn deactivate_all(&mut self) -> DeactivationReport {
        let deactivated: Vec<String> = self
            .entries
            .iter_mut()
            .filter(|e| e.active)
            .map(|e| {
                e.active = false;
                e.kind_tag.clone()
            })
            .collect();

        tracing::debug!(count = deactivated.len(), "hover deactivation");

        if deactivated.is_empty() {
            DeactivationReport::NoneActivated
        } else {
            DeactivationReport::Deactivated(deactivated)
        }
    }

    /// Tags with hover preview currently enabled.
    pub fn list_active(&self) -> ActiveHovers {
        let active: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.kind_tag.clone())
            .collect();

        if active.is_empty() {
            ActiveHovers::NoneActive
        } else {
            ActiveHovers::Active(active)
        }
    }

    /// Removes the entry for `kind_tag`, returning whether one existed.
    ///
    /// Used to roll back a first activation whose host registration failed,
    /// so the next activation registers again.
    pub fn forget(&mut self, kind_tag: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind_tag != kind_tag);
        let removed = self.entries.len() != before;
        tracing::debug!(kind_tag, removed, "hover entry forgotten");
        removed
    }

    /// Deactivates and forgets every entry.
    pub fn teardown(&mut self) {
        for entry in &mut self.entries {
            entry.active = false;
        }
        self.entries.clear();
        tracing::debug!("hover registry torn down");
    }

    /// Entries in creation order.
    pub fn entries(&self) -> impl Iterator<Item = &HoverActivation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
