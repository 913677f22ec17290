//! Named bindings: user-facing names mapped to controls.
//!
//! [`Bindings`] turns a config table such as `{"save": "ControlLeft+KeyS"}`
//! into [`ControlId`]s, registers the combos it needs with a [`Controls`]
//! registry, and reports which names changed state on the latest frame.

use std::collections::{BTreeMap, HashMap};

use crate::combo::ComboOrder;
use crate::error::BindingError;
use crate::id::ControlId;
use crate::registry::Controls;
use crate::state::State;

/// A control shared by more than one binding name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The shared control.
    pub control: ControlId,
    /// Names bound to it, sorted.
    pub names: Vec<String>,
}

/// Ordered map from binding name to control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: BTreeMap<String, ControlId>,
}

impl Bindings {
    /// Creates an empty binding table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every `name -> control text` pair.
    ///
    /// # Errors
    /// Returns the first entry (by name) whose control text does not parse.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, BindingError> {
        let sorted: BTreeMap<&String, &String> = map.iter().collect();
        let mut bindings = Self::new();
        for (name, text) in sorted {
            let id = text.parse::<ControlId>().map_err(|source| BindingError {
                name: name.clone(),
                source,
            })?;
            bindings.set(name.clone(), id);
        }
        Ok(bindings)
    }

    /// Binds `name` to `control`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, control: impl Into<ControlId>) {
        self.entries.insert(name.into(), control.into());
    }

    /// Removes a binding. Returns the control it was bound to.
    pub fn remove(&mut self, name: &str) -> Option<ControlId> {
        self.entries.remove(name)
    }

    /// The control bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ControlId> {
        self.entries.get(name)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ControlId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), id))
    }

    /// Creates every combo these bindings refer to, so they are tracked from
    /// the next advance on rather than from their first query.
    pub fn register(&self, controls: &mut Controls) {
        for id in self.entries.values() {
            controls.ensure(id);
        }
    }

    /// State of the control bound to `name`, if both exist.
    #[must_use]
    pub fn state(&self, name: &str, controls: &Controls) -> Option<State> {
        self.entries.get(name).and_then(|id| controls.peek(id))
    }

    /// Names whose control just activated or just deactivated, with that state.
    #[must_use]
    pub fn transitions<'a>(&'a self, controls: &Controls) -> Vec<(&'a str, State)> {
        self.entries
            .iter()
            .filter_map(|(name, id)| {
                controls
                    .peek(id)
                    .filter(|s| s.is_edge())
                    .map(|s| (name.as_str(), s))
            })
            .collect()
    }

    /// Controls bound under more than one name.
    ///
    /// Combos are compared after applying `order`, so with
    /// [`ComboOrder::Canonical`] `KeyA+KeyB` and `KeyB+KeyA` conflict.
    #[must_use]
    pub fn detect_conflicts(&self, order: ComboOrder) -> Vec<Conflict> {
        let mut seen: BTreeMap<String, (ControlId, Vec<String>)> = BTreeMap::new();
        for (name, id) in &self.entries {
            let id = match id {
                ControlId::Combo(combo) => ControlId::Combo(combo.clone().arranged(order)),
                other => other.clone(),
            };
            seen.entry(id.to_string())
                .or_insert_with(|| (id, Vec::new()))
                .1
                .push(name.clone());
        }

        seen.into_values()
            .filter(|(_, names)| names.len() > 1)
            .map(|(control, names)| Conflict { control, names })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PressedSet;
    use crate::combo::Combo;
    use crate::error::ParseControlError;
    use crate::key::{Key, MouseButton};

    fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_map_parses_all_kinds() {
        let b = Bindings::from_map(&table(&[
            ("jump", "Space"),
            ("fire", "MouseLeft"),
            ("save", "ControlLeft+KeyS"),
        ]))
        .unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(b.get("jump"), Some(&ControlId::Key(Key::Space)));
        assert_eq!(b.get("fire"), Some(&ControlId::Button(MouseButton::Left)));
        assert_eq!(
            b.get("save"),
            Some(&ControlId::Combo(Combo::from([Key::ControlLeft, Key::KeyS])))
        );
    }

    #[test]
    fn test_from_map_reports_bad_entry() {
        let err = Bindings::from_map(&table(&[("jump", "Space"), ("dash", "ShiftLeft+Nope")]))
            .unwrap_err();
        assert_eq!(err.name, "dash");
        assert_eq!(err.source, ParseControlError::UnknownKey("Nope".to_string()));
    }

    #[test]
    fn test_register_creates_combos() {
        let b = Bindings::from_map(&table(&[("save", "ControlLeft+KeyS"), ("jump", "Space")]))
            .unwrap();
        let mut controls = Controls::new();
        b.register(&mut controls);
        assert_eq!(controls.combo_count(), 1);
        assert_eq!(b.state("save", &controls), Some(State::StillInactive));
    }

    #[test]
    fn test_transitions_report_edges_only() {
        let mut b = Bindings::new();
        b.set("jump", Key::Space);
        b.set("crouch", Key::KeyC);
        let mut controls = Controls::new();
        let mut input = PressedSet::new();

        input.press(Key::Space).press(Key::KeyC);
        controls.advance(&input);
        assert_eq!(
            b.transitions(&controls),
            vec![("crouch", State::JustActivated), ("jump", State::JustActivated)]
        );

        input.release(Key::Space);
        controls.advance(&input);
        assert_eq!(b.transitions(&controls), vec![("jump", State::JustDeactivated)]);
    }

    #[test]
    fn test_unregistered_combo_binding_has_no_state() {
        let mut b = Bindings::new();
        b.set("save", Combo::from([Key::ControlLeft, Key::KeyS]));
        let controls = Controls::new();
        assert_eq!(b.state("save", &controls), None);
        assert!(b.transitions(&controls).is_empty());
    }

    #[test]
    fn test_detect_conflicts() {
        let mut b = Bindings::new();
        b.set("jump", Key::Space);
        b.set("confirm", Key::Space);
        b.set("copy", Combo::from([Key::ControlLeft, Key::KeyC]));
        b.set("copy2", Combo::from([Key::KeyC, Key::ControlLeft]));

        let ordered = b.detect_conflicts(ComboOrder::Ordered);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].control, ControlId::Key(Key::Space));
        assert_eq!(ordered[0].names, vec!["confirm", "jump"]);

        let canonical = b.detect_conflicts(ComboOrder::Canonical);
        assert_eq!(canonical.len(), 2);
    }

    #[test]
    fn test_remove_binding() {
        let mut b = Bindings::new();
        b.set("jump", Key::Space);
        assert_eq!(b.remove("jump"), Some(ControlId::Key(Key::Space)));
        assert!(b.is_empty());
    }
}
