use std::fmt;

use crate::models::{EntityId, Participant};

/// One entry of the participant multi-select widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: EntityId,
    pub label: String,
}

impl fmt::Display for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

pub fn to_options(participants: &[Participant]) -> Vec<SelectOption> {
    participants
        .iter()
        .map(|p| SelectOption {
            value: p.id,
            label: p.name.clone(),
        })
        .collect()
}

/// Options whose value is in `selected`, in `all_options` order.
pub fn selected_options(selected: &[EntityId], all_options: &[SelectOption]) -> Vec<SelectOption> {
    all_options
        .iter()
        .filter(|option| selected.contains(&option.value))
        .cloned()
        .collect()
}

/// Positions of the selected options, for pre-checking widget entries.
pub fn default_indices(selected: &[EntityId], all_options: &[SelectOption]) -> Vec<usize> {
    all_options
        .iter()
        .enumerate()
        .filter(|(_, option)| selected.contains(&option.value))
        .map(|(idx, _)| idx)
        .collect()
}

/// A cleared widget reports `None`; both that and an empty selection mean "no participants".
pub fn on_selection_change(selected: Option<&[SelectOption]>) -> Vec<EntityId> {
    selected
        .map(|options| options.iter().map(|option| option.value).collect())
        .unwrap_or_default()
}
