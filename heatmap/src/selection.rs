use regions::GovernorateName;
use std::collections::HashMap;

/// At most one governorate is focused at a time. Selection is only changed
/// by the user and survives data refreshes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(GovernorateName),
}

impl SelectionState {
    /// Last click wins.
    pub fn select(self, name: GovernorateName) -> Self {
        SelectionState::Selected(name)
    }

    pub fn clear(self) -> Self {
        SelectionState::Unselected
    }

    pub fn selected(&self) -> Option<&GovernorateName> {
        match self {
            SelectionState::Selected(name) => Some(name),
            SelectionState::Unselected => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    Click,
    HoverEnter,
    HoverExit,
}

/// Everything user input on the map can change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub selection: SelectionState,
    pub hovered: Option<GovernorateName>,
}

pub type InteractionHandler = fn(&GovernorateName, InteractionState) -> InteractionState;

fn on_click(name: &GovernorateName, state: InteractionState) -> InteractionState {
    InteractionState {
        selection: state.selection.select(name.clone()),
        ..state
    }
}

fn on_hover_enter(name: &GovernorateName, state: InteractionState) -> InteractionState {
    InteractionState {
        hovered: Some(name.clone()),
        ..state
    }
}

fn on_hover_exit(name: &GovernorateName, state: InteractionState) -> InteractionState {
    // Leaving a region we no longer track as hovered changes nothing.
    if state.hovered.as_ref() == Some(name) {
        InteractionState {
            hovered: None,
            ..state
        }
    } else {
        state
    }
}

/// Maps each kind of map interaction to the transition it triggers.
#[derive(Clone)]
pub struct DispatchTable {
    handlers: HashMap<Interaction, InteractionHandler>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchTable {
    pub fn new() -> Self {
        let handlers = HashMap::from([
            (Interaction::Click, on_click as InteractionHandler),
            (Interaction::HoverEnter, on_hover_enter as InteractionHandler),
            (Interaction::HoverExit, on_hover_exit as InteractionHandler),
        ]);
        Self { handlers }
    }

    pub fn dispatch(
        &self,
        interaction: Interaction,
        name: &GovernorateName,
        state: InteractionState,
    ) -> InteractionState {
        match self.handlers.get(&interaction) {
            Some(handler) => handler(name, state),
            None => state,
        }
    }
}
