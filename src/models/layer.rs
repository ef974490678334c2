//! Remap layer data structures.

use std::fmt;

/// A single `trigger = action` line of a keyd section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Key that fires the rule (left-hand side)
    pub trigger: String,
    /// Key the rule produces (right-hand side)
    pub action: String,
}

impl Binding {
    /// Creates a new binding.
    pub fn new(trigger: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.trigger, self.action)
    }
}

/// Ordered list of bindings emitted together inside a keyd section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    /// Bindings in output order
    pub bindings: Vec<Binding>,
}

impl Layer {
    /// Creates an empty layer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Appends a binding.
    pub fn push(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if the layer has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Finds the action bound to `trigger`, if any.
    #[must_use]
    pub fn action_for(&self, trigger: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| binding.trigger == trigger)
            .map(|binding| binding.action.as_str())
    }
}

impl FromIterator<Binding> for Layer {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Layer {
    /// One `trigger = action` line per binding, each newline-terminated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for binding in &self.bindings {
            writeln!(f, "{binding}")?;
        }
        Ok(())
    }
}
