//! Listing columns per entity kind.

use crate::content_store::{EntityKind, StoredEntity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Select,
    Name,
    Slug,
    Date,
    Author,
    Type,
    Instrument,
    Actions,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Select => "",
            Column::Name => "Name",
            Column::Slug => "Slug",
            Column::Date => "Date",
            Column::Author => "Author",
            Column::Type => "Type",
            Column::Instrument => "Instrument",
            Column::Actions => "Actions",
        }
    }

    /// Text shown in this column for `item`. Select and Actions hold
    /// controls, not text.
    pub fn cell(&self, item: &StoredEntity) -> String {
        match self {
            Column::Select | Column::Actions => String::new(),
            Column::Name => item.display_name().to_string(),
            Column::Slug => item.slug().to_string(),
            Column::Date => match item.field_str("publishedAt") {
                "" => item.created_at.format("%Y-%m-%d").to_string(),
                date => date.to_string(),
            },
            Column::Author => item.field_str("author").to_string(),
            Column::Type => item.field_str("classType").to_string(),
            Column::Instrument => item.field_str("instrument").to_string(),
        }
    }
}

/// Base columns plus the kind-specific ones, in display order.
pub fn columns_for(kind: EntityKind) -> Vec<Column> {
    let extra: &[Column] = match kind {
        EntityKind::Blog => &[Column::Date, Column::Author],
        EntityKind::Class => &[Column::Type, Column::Instrument],
        EntityKind::Singer | EntityKind::Qawwal => &[],
    };

    let mut columns = vec![Column::Select, Column::Name, Column::Slug];
    columns.extend_from_slice(extra);
    columns.push(Column::Actions);
    columns
}
