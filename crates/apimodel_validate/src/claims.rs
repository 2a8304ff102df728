//! Synthetic class name claims.

use std::collections::HashMap;

use apimodel_foundation::NodeRef;

/// The synthetic class names claimed so far, each with its claimant.
///
/// One set is scoped to one build; pass a fresh one to every validation run.
#[derive(Clone, Debug, Default)]
pub struct ClaimedNames {
    claims: HashMap<String, NodeRef>,
}

impl ClaimedNames {
    /// Creates an empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a name for a node.
    ///
    /// Succeeds if the name is free or already held by the same node.
    ///
    /// # Errors
    ///
    /// Returns the earlier claimant when another node holds the name.
    pub fn claim(&mut self, name: &str, claimant: &NodeRef) -> Result<(), NodeRef> {
        match self.claims.get(name) {
            Some(existing) if existing == claimant => Ok(()),
            Some(existing) => Err(existing.clone()),
            None => {
                self.claims.insert(name.to_string(), claimant.clone());
                Ok(())
            }
        }
    }

    /// Returns the node holding a name, if any.
    #[must_use]
    pub fn claimant(&self, name: &str) -> Option<&NodeRef> {
        self.claims.get(name)
    }

    /// Returns the number of claimed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Returns true if nothing has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
