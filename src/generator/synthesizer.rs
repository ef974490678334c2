//! Layer synthesis.
//!
//! Every function row key is emitted four times: addressed by its function key
//! label and by its vivaldi name, once for each modifier state. Hardware may
//! report either identity depending on firmware mode, so keyd needs a rule for
//! both.

use crate::keycode_db::vivaldi_alias;
use crate::models::{Binding, FunctionRow, Layer, RowKey};

/// Names of the lock/sleep key as reported by the keyboard.
const LOCK_TRIGGERS: [&str; 2] = ["f13", "sleep"];

/// Which of a key's names goes on one side of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyName {
    /// Positional label, `f{i}`
    FunctionKey,
    /// The vivaldi name, unaliased
    Semantic,
    /// The vivaldi name as presented on output (`zoom` becomes `f11`)
    Display,
}

impl KeyName {
    fn resolve(self, key: &RowKey) -> String {
        match self {
            Self::FunctionKey => key.function_key(),
            Self::Semantic => key.semantic.clone(),
            Self::Display => vivaldi_alias(&key.semantic).to_string(),
        }
    }
}

/// Trigger and action naming for one layer.
///
/// | held | semantic trigger | line              |
/// |------|------------------|-------------------|
/// | yes  | yes              | `semantic = f{i}` |
/// | yes  | no               | `f{i} = f{i}`     |
/// | no   | yes              | `semantic = display` |
/// | no   | no               | `f{i} = display`  |
const fn rule(effective_modifier_held: bool, use_semantic_names: bool) -> (KeyName, KeyName) {
    match (effective_modifier_held, use_semantic_names) {
        (true, true) => (KeyName::Semantic, KeyName::FunctionKey),
        (true, false) => (KeyName::FunctionKey, KeyName::FunctionKey),
        (false, true) => (KeyName::Semantic, KeyName::Display),
        (false, false) => (KeyName::FunctionKey, KeyName::Display),
    }
}

/// Inversion swaps which modifier state gets the function key behaviour.
const fn effective_modifier_held(modifier_held: bool, inverted: bool) -> bool {
    modifier_held ^ inverted
}

/// Synthesizes one layer's bindings for the whole function row.
///
/// `use_semantic_names` selects whether rules are triggered by the vivaldi
/// name or by the `f{i}` label. With `inverted` unset, the layer for
/// `modifier_held == false` makes keys produce their vivaldi action and the
/// held layer makes them produce function keys; `inverted` swaps the two.
pub fn synthesize_layer(
    row: &FunctionRow,
    use_semantic_names: bool,
    modifier_held: bool,
    inverted: bool,
) -> Layer {
    let (trigger, action) = rule(
        effective_modifier_held(modifier_held, inverted),
        use_semantic_names,
    );

    row.keys()
        .iter()
        .map(|key| Binding::new(trigger.resolve(key), action.resolve(key)))
        .collect()
}

/// Bindings for the lock key, which sits outside the function row.
///
/// It wakes the screen lock (`coffee`) in the vivaldi state and acts as a
/// function key in the other.
pub fn lock_bindings(modifier_held: bool, inverted: bool) -> Layer {
    let [lock, sleep] = LOCK_TRIGGERS;
    if effective_modifier_held(modifier_held, inverted) {
        [Binding::new(lock, "f13"), Binding::new(sleep, "f12")]
            .into_iter()
            .collect()
    } else {
        [Binding::new(lock, "coffee"), Binding::new(sleep, "coffee")]
            .into_iter()
            .collect()
    }
}
