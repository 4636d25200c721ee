//! `ContentEntity` implementations for each record kind.

use super::models::*;
use super::sanitize::{retain_meaningful, sanitize_seo};

impl ContentEntity for Singer {
    const KIND: EntityKind = EntityKind::Singer;
    const IMAGE_SLOTS: &'static [ImageSlot] = &[ImageSlot::Main, ImageSlot::Gallery];

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn sanitize(&mut self) {
        sanitize_seo(&mut self.seo);
        retain_meaningful(&mut self.images.gallery);
        retain_meaningful(&mut self.albums);
        retain_meaningful(&mut self.songs);
        retain_meaningful(&mut self.awards);
        retain_meaningful(&mut self.milestones);
        retain_meaningful(&mut self.collaborations);
    }

    fn apply_image(&mut self, slot: ImageSlot, path: String) -> bool {
        match slot {
            ImageSlot::Main => self.images.main = path,
            ImageSlot::Gallery => self.images.gallery.push(path),
            _ => return false,
        }
        true
    }
}

impl ContentEntity for Qawwal {
    const KIND: EntityKind = EntityKind::Qawwal;
    const IMAGE_SLOTS: &'static [ImageSlot] = &[ImageSlot::Main, ImageSlot::Gallery];

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn sanitize(&mut self) {
        sanitize_seo(&mut self.seo);
        retain_meaningful(&mut self.images.gallery);
        retain_meaningful(&mut self.performances);
        retain_meaningful(&mut self.albums);
        retain_meaningful(&mut self.awards);
        retain_meaningful(&mut self.milestones);
    }

    fn apply_image(&mut self, slot: ImageSlot, path: String) -> bool {
        match slot {
            ImageSlot::Main => self.images.main = path,
            ImageSlot::Gallery => self.images.gallery.push(path),
            _ => return false,
        }
        true
    }
}

impl ContentEntity for BlogPost {
    const KIND: EntityKind = EntityKind::Blog;
    const IMAGE_SLOTS: &'static [ImageSlot] = &[ImageSlot::Main, ImageSlot::Gallery];

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn sanitize(&mut self) {
        sanitize_seo(&mut self.seo);
        retain_meaningful(&mut self.images.gallery);
        retain_meaningful(&mut self.tags);
        retain_meaningful(&mut self.sections);
    }

    fn apply_image(&mut self, slot: ImageSlot, path: String) -> bool {
        match slot {
            ImageSlot::Main => self.images.main = path,
            ImageSlot::Gallery => self.images.gallery.push(path),
            _ => return false,
        }
        true
    }
}

impl ContentEntity for MusicClass {
    const KIND: EntityKind = EntityKind::Class;
    const IMAGE_SLOTS: &'static [ImageSlot] =
        &[ImageSlot::Hero, ImageSlot::Curriculum, ImageSlot::Teaching];

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn sanitize(&mut self) {
        sanitize_seo(&mut self.seo);
        retain_meaningful(&mut self.features);
        retain_meaningful(&mut self.curriculum);
        retain_meaningful(&mut self.learning_paths);
        retain_meaningful(&mut self.practice_tips.routine_tips);
        retain_meaningful(&mut self.practice_tips.mistakes);
        retain_meaningful(&mut self.stats);
    }

    fn apply_image(&mut self, slot: ImageSlot, path: String) -> bool {
        match slot {
            ImageSlot::Hero => self.hero.image = path,
            ImageSlot::Curriculum => self.curriculum_image = path,
            ImageSlot::Teaching => self.teaching_image = path,
            _ => return false,
        }
        true
    }
}
