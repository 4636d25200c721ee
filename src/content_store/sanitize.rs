//! Blank sub-record filtering.
//!
//! Forms routinely submit placeholder rows the editor added but never filled
//! in. A sub-record whose every string field is empty or whitespace carries no
//! content and must not be persisted as a stub.

use super::models::*;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// A structured item living inside one of an entity's ordered collections.
pub trait SubRecord {
    /// True when no string field carries content.
    fn is_blank(&self) -> bool;

    /// Drops blank entries from lists nested inside this item.
    fn prune_nested(&mut self) {}
}

impl SubRecord for String {
    fn is_blank(&self) -> bool {
        blank(self)
    }
}

impl SubRecord for Faq {
    fn is_blank(&self) -> bool {
        blank(&self.question) && blank(&self.answer)
    }
}

impl SubRecord for Album {
    fn is_blank(&self) -> bool {
        blank(&self.title) && blank(&self.year) && blank(&self.description)
    }
}

impl SubRecord for Song {
    fn is_blank(&self) -> bool {
        blank(&self.title) && blank(&self.album) && blank(&self.year) && blank(&self.link)
    }
}

impl SubRecord for Award {
    fn is_blank(&self) -> bool {
        blank(&self.title) && blank(&self.year) && blank(&self.description)
    }
}

impl SubRecord for Milestone {
    fn is_blank(&self) -> bool {
        blank(&self.year) && blank(&self.title) && blank(&self.description)
    }
}

impl SubRecord for Collaboration {
    fn is_blank(&self) -> bool {
        blank(&self.artist) && blank(&self.project) && blank(&self.year)
    }
}

impl SubRecord for Performance {
    fn is_blank(&self) -> bool {
        blank(&self.venue) && blank(&self.location) && blank(&self.year) && blank(&self.description)
    }
}

impl SubRecord for Section {
    fn is_blank(&self) -> bool {
        blank(&self.heading) && blank(&self.body)
    }
}

impl SubRecord for Feature {
    fn is_blank(&self) -> bool {
        blank(&self.title) && blank(&self.description) && blank(&self.icon)
    }
}

impl SubRecord for CurriculumItem {
    fn is_blank(&self) -> bool {
        blank(&self.title) && blank(&self.description) && blank(&self.duration)
    }
}

impl SubRecord for LearningPath {
    fn is_blank(&self) -> bool {
        blank(&self.level)
            && blank(&self.title)
            && blank(&self.description)
            && self.skills.iter().all(|s| blank(s))
    }

    fn prune_nested(&mut self) {
        retain_meaningful(&mut self.skills);
    }
}

impl SubRecord for Stat {
    fn is_blank(&self) -> bool {
        blank(&self.label) && blank(&self.value)
    }
}

/// Removes blank items, keeping the order of the rest.
pub fn retain_meaningful<T: SubRecord>(items: &mut Vec<T>) {
    items.retain(|item| !item.is_blank());
    for item in items.iter_mut() {
        item.prune_nested();
    }
}

pub(super) fn sanitize_seo(seo: &mut Seo) {
    retain_meaningful(&mut seo.faqs);
    retain_meaningful(&mut seo.structured_data.knows_about);
}
