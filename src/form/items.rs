//! Editable sub-record collections.
//!
//! Each structured list inside a record is a `Vec<T>` of some sub-record
//! type. The reducer reaches them through `ItemList`, so one set of
//! add/remove/update operations serves every list at every depth.

use super::FormError;
use crate::content_store::*;

/// String fields found on sub-records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemField {
    Question,
    Answer,
    Title,
    Year,
    Description,
    Album,
    Link,
    Artist,
    Project,
    Venue,
    Location,
    Heading,
    Body,
    Icon,
    Duration,
    Level,
    Label,
    Value,
}

/// A structured sub-record the form can edit field by field.
pub trait FormItem: SubRecord + Default + Clone + Send + Sync {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String>;

    /// The string list nested inside this item, if it has one.
    fn nested_mut(&mut self) -> Option<&mut Vec<String>> {
        None
    }
}

impl FormItem for Faq {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Question => Some(&mut self.question),
            ItemField::Answer => Some(&mut self.answer),
            _ => None,
        }
    }
}

impl FormItem for Album {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Title => Some(&mut self.title),
            ItemField::Year => Some(&mut self.year),
            ItemField::Description => Some(&mut self.description),
            _ => None,
        }
    }
}

impl FormItem for Song {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Title => Some(&mut self.title),
            ItemField::Album => Some(&mut self.album),
            ItemField::Year => Some(&mut self.year),
            ItemField::Link => Some(&mut self.link),
            _ => None,
        }
    }
}

impl FormItem for Award {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Title => Some(&mut self.title),
            ItemField::Year => Some(&mut self.year),
            ItemField::Description => Some(&mut self.description),
            _ => None,
        }
    }
}

impl FormItem for Milestone {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Year => Some(&mut self.year),
            ItemField::Title => Some(&mut self.title),
            ItemField::Description => Some(&mut self.description),
            _ => None,
        }
    }
}

impl FormItem for Collaboration {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Artist => Some(&mut self.artist),
            ItemField::Project => Some(&mut self.project),
            ItemField::Year => Some(&mut self.year),
            _ => None,
        }
    }
}

impl FormItem for Performance {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Venue => Some(&mut self.venue),
            ItemField::Location => Some(&mut self.location),
            ItemField::Year => Some(&mut self.year),
            ItemField::Description => Some(&mut self.description),
            _ => None,
        }
    }
}

impl FormItem for Section {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Heading => Some(&mut self.heading),
            ItemField::Body => Some(&mut self.body),
            _ => None,
        }
    }
}

impl FormItem for Feature {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Title => Some(&mut self.title),
            ItemField::Description => Some(&mut self.description),
            ItemField::Icon => Some(&mut self.icon),
            _ => None,
        }
    }
}

impl FormItem for CurriculumItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Title => Some(&mut self.title),
            ItemField::Description => Some(&mut self.description),
            ItemField::Duration => Some(&mut self.duration),
            _ => None,
        }
    }
}

impl FormItem for LearningPath {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Level => Some(&mut self.level),
            ItemField::Title => Some(&mut self.title),
            ItemField::Description => Some(&mut self.description),
            _ => None,
        }
    }

    fn nested_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.skills)
    }
}

impl FormItem for Stat {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Label => Some(&mut self.label),
            ItemField::Value => Some(&mut self.value),
            _ => None,
        }
    }
}

/// Object-safe view over a `Vec` of structured sub-records.
pub trait ItemList {
    fn len(&self) -> usize;

    fn push_blank(&mut self);

    fn remove_at(&mut self, index: usize) -> Result<(), FormError>;

    fn set_field(&mut self, index: usize, field: ItemField, value: String)
        -> Result<(), FormError>;

    fn nested_at(&mut self, index: usize) -> Result<&mut Vec<String>, FormError>;
}

fn check_index(index: usize, len: usize) -> Result<(), FormError> {
    if index < len {
        Ok(())
    } else {
        Err(FormError::IndexOutOfRange { index, len })
    }
}

impl<T: FormItem> ItemList for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn push_blank(&mut self) {
        self.push(T::default());
    }

    fn remove_at(&mut self, index: usize) -> Result<(), FormError> {
        check_index(index, Vec::len(self))?;
        self.remove(index);
        Ok(())
    }

    fn set_field(
        &mut self,
        index: usize,
        field: ItemField,
        value: String,
    ) -> Result<(), FormError> {
        check_index(index, Vec::len(self))?;
        let slot = self[index]
            .field_mut(field)
            .ok_or(FormError::UnknownItemField { field })?;
        *slot = value;
        Ok(())
    }

    fn nested_at(&mut self, index: usize) -> Result<&mut Vec<String>, FormError> {
        check_index(index, Vec::len(self))?;
        self[index].nested_mut().ok_or(FormError::NoNestedList)
    }
}

/// Mutable handle on one of a record's lists.
pub enum ListMut<'a> {
    Strings(&'a mut Vec<String>),
    Items(&'a mut dyn ItemList),
}

/// Index-checked string list operations, shared by flat and nested lists.
pub(super) fn remove_string(list: &mut Vec<String>, index: usize) -> Result<(), FormError> {
    check_index(index, list.len())?;
    list.remove(index);
    Ok(())
}

pub(super) fn set_string(list: &mut [String], index: usize, value: String) -> Result<(), FormError> {
    check_index(index, list.len())?;
    list[index] = value;
    Ok(())
}
