//! Content entity models.
//!
//! Each managed entity kind (singer, qawwal, blog post, music class) is a
//! typed record that serializes to the camelCase JSON document stored in the
//! database and exchanged with the dashboard. Every field defaults, so partial
//! documents coming from forms deserialize cleanly.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Enumerations
// =============================================================================

/// The kinds of content managed through the dashboard.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "singers")]
    Singer,
    #[serde(rename = "qawwals")]
    Qawwal,
    #[serde(rename = "blogs")]
    Blog,
    #[serde(rename = "classes")]
    Class,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Singer,
        EntityKind::Qawwal,
        EntityKind::Blog,
        EntityKind::Class,
    ];

    /// Path segment used under `/api`.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Singer => "singers",
            EntityKind::Qawwal => "qawwals",
            EntityKind::Blog => "blogs",
            EntityKind::Class => "classes",
        }
    }

    pub fn from_collection(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.collection() == s)
    }

    /// Convert from database string representation
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "SINGER" => Some(EntityKind::Singer),
            "QAWWAL" => Some(EntityKind::Qawwal),
            "BLOG" => Some(EntityKind::Blog),
            "CLASS" => Some(EntityKind::Class),
            _ => None,
        }
    }

    /// Convert to database string representation
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntityKind::Singer => "SINGER",
            EntityKind::Qawwal => "QAWWAL",
            EntityKind::Blog => "BLOG",
            EntityKind::Class => "CLASS",
        }
    }

    /// Document key holding the display label.
    pub fn display_field(&self) -> &'static str {
        match self {
            EntityKind::Singer | EntityKind::Qawwal => "name",
            EntityKind::Blog | EntityKind::Class => "title",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection())
    }
}

/// Where an uploaded image lands inside a record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ImageSlot {
    Main,
    Gallery,
    Hero,
    Curriculum,
    Teaching,
}

impl ImageSlot {
    /// Maps a multipart field name to its slot.
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "mainImage" => Some(ImageSlot::Main),
            "gallery" | "gallery[]" => Some(ImageSlot::Gallery),
            "heroImage" => Some(ImageSlot::Hero),
            "curriculumImage" => Some(ImageSlot::Curriculum),
            "teachingImage" => Some(ImageSlot::Teaching),
            _ => None,
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            ImageSlot::Main => "mainImage",
            ImageSlot::Gallery => "gallery[]",
            ImageSlot::Hero => "heroImage",
            ImageSlot::Curriculum => "curriculumImage",
            ImageSlot::Teaching => "teachingImage",
        }
    }
}

// =============================================================================
// Shared building blocks
// =============================================================================

/// SEO metadata, passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredData {
    pub knows_about: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seo {
    pub faqs: Vec<Faq>,
    pub structured_data: StructuredData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    pub main: String,
    pub gallery: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub image: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub title: String,
    pub year: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    pub title: String,
    pub album: String,
    pub year: String,
    pub link: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Award {
    pub title: String,
    pub year: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub year: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collaboration {
    pub artist: String,
    pub project: String,
    pub year: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Performance {
    pub venue: String,
    pub location: String,
    pub year: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurriculumItem {
    pub title: String,
    pub description: String,
    pub duration: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningPath {
    pub level: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PracticeTips {
    pub routine_tips: Vec<String>,
    pub mistakes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

// =============================================================================
// Entity records
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Singer {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub bio: String,
    pub genre: String,
    pub metadata: SeoMetadata,
    pub seo: Seo,
    pub images: Images,
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
    pub awards: Vec<Award>,
    pub milestones: Vec<Milestone>,
    pub collaborations: Vec<Collaboration>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Qawwal {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub bio: String,
    pub gharana: String,
    pub metadata: SeoMetadata,
    pub seo: Seo,
    pub images: Images,
    pub performances: Vec<Performance>,
    pub albums: Vec<Album>,
    pub awards: Vec<Award>,
    pub milestones: Vec<Milestone>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub published_at: String,
    pub metadata: SeoMetadata,
    pub seo: Seo,
    pub images: Images,
    pub tags: Vec<String>,
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MusicClass {
    pub slug: String,
    pub title: String,
    pub class_type: String,
    pub instrument: String,
    pub description: String,
    pub metadata: SeoMetadata,
    pub seo: Seo,
    pub hero: Hero,
    pub features: Vec<Feature>,
    pub curriculum: Vec<CurriculumItem>,
    pub curriculum_image: String,
    pub teaching_image: String,
    pub learning_paths: Vec<LearningPath>,
    pub practice_tips: PracticeTips,
    pub stats: Vec<Stat>,
}

/// Behaviour shared by every managed entity record.
pub trait ContentEntity:
    Serialize + DeserializeOwned + Clone + Default + PartialEq + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Image slots this kind accepts uploads for.
    const IMAGE_SLOTS: &'static [ImageSlot];

    fn slug(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Drops blank sub-records and blank list strings from every collection.
    fn sanitize(&mut self);

    /// Points `slot` at `path`. Returns false if this kind has no such slot.
    fn apply_image(&mut self, slot: ImageSlot, path: String) -> bool;
}

// =============================================================================
// Stored envelope
// =============================================================================

/// A persisted entity: the JSON document plus store-assigned fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntity {
    pub id: String,
    pub kind: EntityKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub document: Value,
}

impl StoredEntity {
    pub fn field_str(&self, key: &str) -> &str {
        self.document
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn slug(&self) -> &str {
        self.field_str("slug")
    }

    pub fn display_name(&self) -> &str {
        self.field_str(self.kind.display_field())
    }

    /// Decodes the document into its typed record.
    pub fn record<R: ContentEntity>(&self) -> serde_json::Result<R> {
        serde_json::from_value(self.document.clone())
    }
}

/// A record ready to be written: natural key and label pulled out of the
/// typed record, plus its serialized document.
#[derive(Clone, Debug, PartialEq)]
pub struct NewEntity {
    pub kind: EntityKind,
    pub slug: String,
    pub name: String,
    pub document: Value,
}

impl NewEntity {
    pub fn from_record<R: ContentEntity>(record: &R) -> serde_json::Result<Self> {
        Ok(NewEntity {
            kind: R::KIND,
            slug: record.slug().to_string(),
            name: record.display_name().to_string(),
            document: serde_json::to_value(record)?,
        })
    }
}
