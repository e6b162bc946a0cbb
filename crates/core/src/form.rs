// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Selection state of the reference-data form.
//!
//! The form has one active kind (province, district, ward, department or
//! position), the values being typed, and optionally the item being edited.
//! The rules here decide which parent is preselected as the operator moves
//! between tabs.

use crate::command::{CategoryInput, CategoryKind, Command};
use crate::state::State;
use hrm_domain::hierarchy::find_by_id;

/// The in-progress reference-data form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    /// The active tab.
    pub kind: CategoryKind,
    /// Values typed so far.
    pub input: CategoryInput,
    /// The item being edited, if any.
    pub editing_id: Option<String>,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self::new(CategoryKind::Province)
    }
}

impl CategoryForm {
    /// Creates an empty form on the given tab.
    #[must_use]
    pub fn new(kind: CategoryKind) -> Self {
        Self {
            kind,
            input: CategoryInput::default(),
            editing_id: None,
        }
    }

    /// Returns true while an existing item is being edited.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Switches to another tab and refreshes the default parent.
    ///
    /// Switching abandons any edit in progress.
    pub fn switch_to(&mut self, kind: CategoryKind, state: &State) {
        if self.kind != kind {
            self.reset();
            self.kind = kind;
        }
        self.select_default_parent(state);
    }

    /// Preselects a sensible parent for the active location tab.
    ///
    /// - province: no parent
    /// - district: the first province, unless a valid province is already selected
    /// - ward: the first district, unless a valid district is already selected
    ///
    /// Does nothing while editing, so an item's own parent is never replaced.
    pub fn select_default_parent(&mut self, state: &State) {
        if self.is_editing() {
            return;
        }
        let selected: Option<&str> = self.input.parent_id.as_deref();
        match self.kind {
            CategoryKind::Province => self.input.parent_id = None,
            CategoryKind::District => {
                let valid: bool = selected.is_some_and(|id| find_by_id(&state.provinces, id).is_some());
                if !valid {
                    self.input.parent_id = state.provinces.first().map(|p| p.id.clone());
                }
            }
            CategoryKind::Ward => {
                let valid: bool = selected.is_some_and(|id| find_by_id(&state.districts, id).is_some());
                if !valid {
                    self.input.parent_id = state.districts.first().map(|d| d.id.clone());
                }
            }
            CategoryKind::Department | CategoryKind::Position => {}
        }
    }

    /// Loads an existing item of the active kind into the form.
    ///
    /// Returns false (and leaves the form unchanged) if no such item exists.
    pub fn begin_edit(&mut self, id: &str, state: &State) -> bool {
        let loaded: Option<CategoryInput> = match self.kind {
            CategoryKind::Province => find_by_id(&state.provinces, id).map(|p| CategoryInput {
                name: p.name.clone(),
                code: String::new(),
                parent_id: None,
            }),
            CategoryKind::District => find_by_id(&state.districts, id).map(|d| CategoryInput {
                name: d.name.clone(),
                code: String::new(),
                // A district without a parent keeps the current selection.
                parent_id: d.parent_id.clone().or_else(|| self.input.parent_id.clone()),
            }),
            CategoryKind::Ward => find_by_id(&state.wards, id).map(|w| CategoryInput {
                name: w.name.clone(),
                code: String::new(),
                parent_id: w.parent_id.clone().or_else(|| self.input.parent_id.clone()),
            }),
            CategoryKind::Department => {
                find_by_id(&state.departments, id).map(|d| CategoryInput {
                    name: d.name.clone(),
                    code: String::new(),
                    parent_id: d.parent_id.clone(),
                })
            }
            CategoryKind::Position => state
                .positions
                .iter()
                .find(|p| p.id == id)
                .map(|p| CategoryInput {
                    name: p.name.clone(),
                    code: p.code.clone(),
                    parent_id: None,
                }),
        };
        match loaded {
            Some(input) => {
                self.input = input;
                self.editing_id = Some(id.to_string());
                true
            }
            None => false,
        }
    }

    /// Clears the typed values and leaves edit mode.
    ///
    /// The location parent selection survives so the next item lands
    /// under the same parent.
    pub fn reset(&mut self) {
        let keep_parent: bool = matches!(self.kind, CategoryKind::District | CategoryKind::Ward);
        let parent: Option<String> = self.input.parent_id.take();
        self.input = CategoryInput::default();
        if keep_parent {
            self.input.parent_id = parent;
        }
        self.editing_id = None;
    }

    /// Builds the save command for the current form values.
    #[must_use]
    pub fn to_save_command(&self) -> Command {
        Command::SaveCategory {
            kind: self.kind,
            input: self.input.clone(),
            editing_id: self.editing_id.clone(),
        }
    }

    /// Updates the form after an item was deleted: deleting the item being
    /// edited resets the form.
    pub fn after_delete(&mut self, deleted_id: &str) {
        if self.editing_id.as_deref() == Some(deleted_id) {
            self.reset();
        }
    }
}
