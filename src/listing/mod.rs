//! Listing view state: search, selection and confirmed deletes over one
//! entity collection.

mod columns;

pub use columns::{columns_for, Column};

use crate::client::{ApiError, ContentApi};
use crate::content_store::{EntityKind, StoredEntity};
use crate::form::{Notice, Notifier};
use std::collections::BTreeSet;
use tracing::{error, info};

/// How the filtered items are laid out. Both share filter and selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Presentation {
    #[default]
    Table,
    Cards,
}

/// Header checkbox state, relative to the filtered items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    None,
    /// Indeterminate.
    Some,
    All,
}

/// A delete waiting for the user to confirm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub ids: Vec<String>,
}

impl DeleteConfirmation {
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn prompt(&self, kind: EntityKind) -> String {
        if self.ids.len() == 1 {
            format!("Delete this item from {}? This cannot be undone.", kind)
        } else {
            format!(
                "Delete {} items from {}? This cannot be undone.",
                self.ids.len(),
                kind
            )
        }
    }
}

/// Case-insensitive substring match on display name and slug.
pub fn matches_query(item: &StoredEntity, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.display_name().to_lowercase().contains(&needle)
        || item.slug().to_lowercase().contains(&needle)
}

pub struct ListingView {
    kind: EntityKind,
    items: Vec<StoredEntity>,
    query: String,
    selected: BTreeSet<String>,
    presentation: Presentation,
    pending_delete: Option<DeleteConfirmation>,
    loading: bool,
}

impl ListingView {
    pub fn new(kind: EntityKind) -> Self {
        ListingView {
            kind,
            items: Vec::new(),
            query: String::new(),
            selected: BTreeSet::new(),
            presentation: Presentation::default(),
            pending_delete: None,
            loading: false,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn items(&self) -> &[StoredEntity] {
        &self.items
    }

    /// Replaces the source collection. Selected ids that no longer exist
    /// are dropped.
    pub fn set_items(&mut self, items: Vec<StoredEntity>) {
        self.selected
            .retain(|id| items.iter().any(|item| &item.id == id));
        self.items = items;
    }

    pub async fn refresh(&mut self, api: &dyn ContentApi) -> Result<(), ApiError> {
        self.loading = true;
        let result = api.list(self.kind).await;
        self.loading = false;
        self.set_items(result?);
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn set_presentation(&mut self, presentation: Presentation) {
        self.presentation = presentation;
    }

    pub fn columns(&self) -> Vec<Column> {
        columns_for(self.kind)
    }

    /// Items matching the current query, in source order.
    pub fn filtered(&self) -> Vec<&StoredEntity> {
        self.items
            .iter()
            .filter(|item| matches_query(item, &self.query))
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn selection_state(&self) -> SelectionState {
        let filtered = self.filtered();
        let selected = filtered
            .iter()
            .filter(|item| self.selected.contains(&item.id))
            .count();
        if selected == 0 {
            SelectionState::None
        } else if selected == filtered.len() {
            SelectionState::All
        } else {
            SelectionState::Some
        }
    }

    /// Header checkbox: selects every filtered item, or deselects them all
    /// when they are already all selected. Items hidden by the query keep
    /// their selection.
    pub fn toggle_select_all(&mut self) {
        let ids: Vec<String> = self.filtered().iter().map(|item| item.id.clone()).collect();
        if self.selection_state() == SelectionState::All {
            for id in &ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(ids);
        }
    }

    /// Row-level delete.
    pub fn request_delete(&mut self, id: &str) -> &DeleteConfirmation {
        self.pending_delete.insert(DeleteConfirmation {
            ids: vec![id.to_string()],
        })
    }

    /// Bulk delete of the current selection. Returns None if nothing is
    /// selected.
    pub fn request_bulk_delete(&mut self) -> Option<&DeleteConfirmation> {
        if self.selected.is_empty() {
            return None;
        }
        let ids = self.selected_ids();
        Some(self.pending_delete.insert(DeleteConfirmation { ids }))
    }

    pub fn pending_delete(&self) -> Option<&DeleteConfirmation> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issues the pending delete, then re-fetches the collection.
    /// Returns the number of records the server removed.
    pub async fn confirm_delete(
        &mut self,
        api: &dyn ContentApi,
        notifier: &dyn Notifier,
    ) -> Result<usize, ApiError> {
        let Some(confirmation) = self.pending_delete.take() else {
            return Ok(0);
        };

        let deleted = match api.delete(self.kind, &confirmation.ids).await {
            Ok(deleted) => deleted,
            Err(err) => {
                error!("Deleting {} {} failed: {}", confirmation.count(), self.kind, err);
                notifier.alert(&Notice::Error(err.to_string()));
                return Err(err);
            }
        };
        info!("Deleted {} {}", deleted, self.kind);

        for id in &confirmation.ids {
            self.selected.remove(id);
        }
        notifier.alert(&Notice::Success(format!("Deleted {} item(s)", deleted)));

        if let Err(err) = self.refresh(api).await {
            notifier.alert(&Notice::Error(err.to_string()));
            return Err(err);
        }
        Ok(deleted)
    }
}
