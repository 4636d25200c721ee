//! Form actions and the reducer applying them.

use super::items::{remove_string, set_string, ItemField, ListMut};
use super::records::FormRecord;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Field {field:?} does not exist on this item")]
    UnknownItemField { field: ItemField },

    #[error("Expected a list of strings")]
    NotAStringList,

    #[error("Expected a list of structured items")]
    NotAnItemList,

    #[error("Item has no nested list")]
    NoNestedList,

    #[error("Image slot {0} is not available on this record")]
    UnsupportedImageSlot(&'static str),
}

/// Addresses a list inside a record: one of its top-level lists, or the
/// string list nested in item `index` of a structured list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListPath<L> {
    List(L),
    Nested { list: L, index: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormAction<R: FormRecord> {
    SetField {
        field: R::Field,
        value: String,
    },
    /// Appends a blank entry.
    AddItem {
        path: ListPath<R::List>,
    },
    RemoveItem {
        path: ListPath<R::List>,
        index: usize,
    },
    /// Replaces entry `index` of a string list.
    SetString {
        path: ListPath<R::List>,
        index: usize,
        value: String,
    },
    /// Sets one field of entry `index` of a structured list.
    SetItemField {
        list: R::List,
        index: usize,
        field: ItemField,
        value: String,
    },
    Load(R),
    Reset,
}

fn resolve<R: FormRecord>(record: &mut R, path: ListPath<R::List>) -> Result<ListMut<'_>, FormError> {
    match path {
        ListPath::List(list) => Ok(record.list_mut(list)),
        ListPath::Nested { list, index } => match record.list_mut(list) {
            ListMut::Items(items) => Ok(ListMut::Strings(items.nested_at(index)?)),
            ListMut::Strings(_) => Err(FormError::NotAnItemList),
        },
    }
}

/// Produces the record that follows `state` under `action`.
///
/// `state` is never modified; a rejected action returns an error and the
/// caller keeps its previous record.
pub fn reduce<R: FormRecord>(state: &R, action: FormAction<R>) -> Result<R, FormError> {
    let mut next = state.clone();
    match action {
        FormAction::SetField { field, value } => {
            *next.field_mut(field) = value;
        }
        FormAction::AddItem { path } => match resolve(&mut next, path)? {
            ListMut::Strings(list) => list.push(String::new()),
            ListMut::Items(items) => items.push_blank(),
        },
        FormAction::RemoveItem { path, index } => match resolve(&mut next, path)? {
            ListMut::Strings(list) => remove_string(list, index)?,
            ListMut::Items(items) => items.remove_at(index)?,
        },
        FormAction::SetString { path, index, value } => match resolve(&mut next, path)? {
            ListMut::Strings(list) => set_string(list, index, value)?,
            ListMut::Items(_) => return Err(FormError::NotAStringList),
        },
        FormAction::SetItemField {
            list,
            index,
            field,
            value,
        } => match next.list_mut(list) {
            ListMut::Items(items) => items.set_field(index, field, value)?,
            ListMut::Strings(_) => return Err(FormError::NotAnItemList),
        },
        FormAction::Load(record) => next = record,
        FormAction::Reset => next = R::default(),
    }
    Ok(next)
}
