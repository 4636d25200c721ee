//! Typed field and list paths for each editable record kind.

use super::items::ListMut;
use crate::content_store::*;

/// SEO metadata fields, shared by every record kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaField {
    Title,
    Description,
    Keywords,
    OgTitle,
    OgDescription,
    OgImage,
}

fn meta_mut(metadata: &mut SeoMetadata, field: MetaField) -> &mut String {
    match field {
        MetaField::Title => &mut metadata.title,
        MetaField::Description => &mut metadata.description,
        MetaField::Keywords => &mut metadata.keywords,
        MetaField::OgTitle => &mut metadata.og_title,
        MetaField::OgDescription => &mut metadata.og_description,
        MetaField::OgImage => &mut metadata.og_image,
    }
}

/// A record the form controller can edit.
pub trait FormRecord: ContentEntity {
    /// Scalar string fields, flat or one level deep.
    type Field: Copy + std::fmt::Debug + PartialEq + Send + Sync;
    /// Ordered collections.
    type List: Copy + std::fmt::Debug + PartialEq + Send + Sync;

    fn field_mut(&mut self, field: Self::Field) -> &mut String;

    fn list_mut(&mut self, list: Self::List) -> ListMut<'_>;

    /// Image paths already stored on the record.
    fn image_paths(&self) -> Vec<(ImageSlot, String)>;
}

fn gallery_paths(images: &Images) -> Vec<(ImageSlot, String)> {
    let mut paths = Vec::new();
    if !images.main.is_empty() {
        paths.push((ImageSlot::Main, images.main.clone()));
    }
    for path in &images.gallery {
        paths.push((ImageSlot::Gallery, path.clone()));
    }
    paths
}

// =============================================================================
// Singer
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SingerField {
    Slug,
    Name,
    Tagline,
    Bio,
    Genre,
    MainImage,
    Meta(MetaField),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SingerList {
    Gallery,
    Albums,
    Songs,
    Awards,
    Milestones,
    Collaborations,
    Faqs,
    KnowsAbout,
}

impl FormRecord for Singer {
    type Field = SingerField;
    type List = SingerList;

    fn field_mut(&mut self, field: SingerField) -> &mut String {
        match field {
            SingerField::Slug => &mut self.slug,
            SingerField::Name => &mut self.name,
            SingerField::Tagline => &mut self.tagline,
            SingerField::Bio => &mut self.bio,
            SingerField::Genre => &mut self.genre,
            SingerField::MainImage => &mut self.images.main,
            SingerField::Meta(meta) => meta_mut(&mut self.metadata, meta),
        }
    }

    fn list_mut(&mut self, list: SingerList) -> ListMut<'_> {
        match list {
            SingerList::Gallery => ListMut::Strings(&mut self.images.gallery),
            SingerList::Albums => ListMut::Items(&mut self.albums),
            SingerList::Songs => ListMut::Items(&mut self.songs),
            SingerList::Awards => ListMut::Items(&mut self.awards),
            SingerList::Milestones => ListMut::Items(&mut self.milestones),
            SingerList::Collaborations => ListMut::Items(&mut self.collaborations),
            SingerList::Faqs => ListMut::Items(&mut self.seo.faqs),
            SingerList::KnowsAbout => {
                ListMut::Strings(&mut self.seo.structured_data.knows_about)
            }
        }
    }

    fn image_paths(&self) -> Vec<(ImageSlot, String)> {
        gallery_paths(&self.images)
    }
}

// =============================================================================
// Qawwal
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QawwalField {
    Slug,
    Name,
    Tagline,
    Bio,
    Gharana,
    MainImage,
    Meta(MetaField),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QawwalList {
    Gallery,
    Performances,
    Albums,
    Awards,
    Milestones,
    Faqs,
    KnowsAbout,
}

impl FormRecord for Qawwal {
    type Field = QawwalField;
    type List = QawwalList;

    fn field_mut(&mut self, field: QawwalField) -> &mut String {
        match field {
            QawwalField::Slug => &mut self.slug,
            QawwalField::Name => &mut self.name,
            QawwalField::Tagline => &mut self.tagline,
            QawwalField::Bio => &mut self.bio,
            QawwalField::Gharana => &mut self.gharana,
            QawwalField::MainImage => &mut self.images.main,
            QawwalField::Meta(meta) => meta_mut(&mut self.metadata, meta),
        }
    }

    fn list_mut(&mut self, list: QawwalList) -> ListMut<'_> {
        match list {
            QawwalList::Gallery => ListMut::Strings(&mut self.images.gallery),
            QawwalList::Performances => ListMut::Items(&mut self.performances),
            QawwalList::Albums => ListMut::Items(&mut self.albums),
            QawwalList::Awards => ListMut::Items(&mut self.awards),
            QawwalList::Milestones => ListMut::Items(&mut self.milestones),
            QawwalList::Faqs => ListMut::Items(&mut self.seo.faqs),
            QawwalList::KnowsAbout => {
                ListMut::Strings(&mut self.seo.structured_data.knows_about)
            }
        }
    }

    fn image_paths(&self) -> Vec<(ImageSlot, String)> {
        gallery_paths(&self.images)
    }
}

// =============================================================================
// Blog post
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlogField {
    Slug,
    Title,
    Excerpt,
    Content,
    Author,
    PublishedAt,
    MainImage,
    Meta(MetaField),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlogList {
    Gallery,
    Tags,
    Sections,
    Faqs,
    KnowsAbout,
}

impl FormRecord for BlogPost {
    type Field = BlogField;
    type List = BlogList;

    fn field_mut(&mut self, field: BlogField) -> &mut String {
        match field {
            BlogField::Slug => &mut self.slug,
            BlogField::Title => &mut self.title,
            BlogField::Excerpt => &mut self.excerpt,
            BlogField::Content => &mut self.content,
            BlogField::Author => &mut self.author,
            BlogField::PublishedAt => &mut self.published_at,
            BlogField::MainImage => &mut self.images.main,
            BlogField::Meta(meta) => meta_mut(&mut self.metadata, meta),
        }
    }

    fn list_mut(&mut self, list: BlogList) -> ListMut<'_> {
        match list {
            BlogList::Gallery => ListMut::Strings(&mut self.images.gallery),
            BlogList::Tags => ListMut::Strings(&mut self.tags),
            BlogList::Sections => ListMut::Items(&mut self.sections),
            BlogList::Faqs => ListMut::Items(&mut self.seo.faqs),
            BlogList::KnowsAbout => ListMut::Strings(&mut self.seo.structured_data.knows_about),
        }
    }

    fn image_paths(&self) -> Vec<(ImageSlot, String)> {
        gallery_paths(&self.images)
    }
}

// =============================================================================
// Music class
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassField {
    Slug,
    Title,
    ClassType,
    Instrument,
    Description,
    HeroTitle,
    HeroSubtitle,
    HeroImage,
    CurriculumImage,
    TeachingImage,
    Meta(MetaField),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassList {
    Features,
    Curriculum,
    /// Items carry a nested `skills` list.
    LearningPaths,
    RoutineTips,
    Mistakes,
    Stats,
    Faqs,
    KnowsAbout,
}

impl FormRecord for MusicClass {
    type Field = ClassField;
    type List = ClassList;

    fn field_mut(&mut self, field: ClassField) -> &mut String {
        match field {
            ClassField::Slug => &mut self.slug,
            ClassField::Title => &mut self.title,
            ClassField::ClassType => &mut self.class_type,
            ClassField::Instrument => &mut self.instrument,
            ClassField::Description => &mut self.description,
            ClassField::HeroTitle => &mut self.hero.title,
            ClassField::HeroSubtitle => &mut self.hero.subtitle,
            ClassField::HeroImage => &mut self.hero.image,
            ClassField::CurriculumImage => &mut self.curriculum_image,
            ClassField::TeachingImage => &mut self.teaching_image,
            ClassField::Meta(meta) => meta_mut(&mut self.metadata, meta),
        }
    }

    fn list_mut(&mut self, list: ClassList) -> ListMut<'_> {
        match list {
            ClassList::Features => ListMut::Items(&mut self.features),
            ClassList::Curriculum => ListMut::Items(&mut self.curriculum),
            ClassList::LearningPaths => ListMut::Items(&mut self.learning_paths),
            ClassList::RoutineTips => ListMut::Strings(&mut self.practice_tips.routine_tips),
            ClassList::Mistakes => ListMut::Strings(&mut self.practice_tips.mistakes),
            ClassList::Stats => ListMut::Items(&mut self.stats),
            ClassList::Faqs => ListMut::Items(&mut self.seo.faqs),
            ClassList::KnowsAbout => ListMut::Strings(&mut self.seo.structured_data.knows_about),
        }
    }

    fn image_paths(&self) -> Vec<(ImageSlot, String)> {
        [
            (ImageSlot::Hero, &self.hero.image),
            (ImageSlot::Curriculum, &self.curriculum_image),
            (ImageSlot::Teaching, &self.teaching_image),
        ]
        .into_iter()
        .filter(|(_, path)| !path.is_empty())
        .map(|(slot, path)| (slot, path.clone()))
        .collect()
    }
}
