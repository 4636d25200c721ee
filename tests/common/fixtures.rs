//! Records used across end-to-end tests.

#![allow(dead_code)]

use super::constants::*;
use sangeet_content_server::content_store::{
    Album, BlogPost, Faq, MusicClass, Qawwal, Singer,
};
use sangeet_content_server::form::{Notice, Notifier};
use std::sync::Mutex;

pub fn singer() -> Singer {
    let mut singer = Singer {
        slug: SINGER_SLUG.to_string(),
        name: SINGER_NAME.to_string(),
        genre: "Sufi".to_string(),
        ..Default::default()
    };
    singer.albums.push(Album {
        title: "Raqs-e-Bismil".to_string(),
        year: "2000".to_string(),
        description: String::new(),
    });
    singer.seo.faqs.push(Faq {
        question: "Where is she from?".to_string(),
        answer: "Larkana".to_string(),
    });
    singer
}

pub fn qawwal() -> Qawwal {
    Qawwal {
        slug: QAWWAL_SLUG.to_string(),
        name: QAWWAL_NAME.to_string(),
        gharana: "Qawwal Bachon".to_string(),
        ..Default::default()
    }
}

pub fn blog_post() -> BlogPost {
    BlogPost {
        slug: BLOG_SLUG.to_string(),
        title: BLOG_TITLE.to_string(),
        author: "Ustad".to_string(),
        tags: vec!["practice".to_string()],
        ..Default::default()
    }
}

pub fn music_class() -> MusicClass {
    MusicClass {
        slug: CLASS_SLUG.to_string(),
        title: CLASS_TITLE.to_string(),
        class_type: "instrument".to_string(),
        instrument: "Sitar".to_string(),
        ..Default::default()
    }
}

/// Notifier that remembers every notice it was shown.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
