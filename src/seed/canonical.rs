//! Canonical music class records inserted by the seed migration.

use crate::content_store::{
    CurriculumItem, Faq, Feature, Hero, LearningPath, MusicClass, PracticeTips, Seo, SeoMetadata,
    Stat, StructuredData,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn feature(title: &str, description: &str, icon: &str) -> Feature {
    Feature {
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

fn lesson(title: &str, description: &str, duration: &str) -> CurriculumItem {
    CurriculumItem {
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
    }
}

fn path(level: &str, title: &str, description: &str, skills: &[&str]) -> LearningPath {
    LearningPath {
        level: level.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        skills: strings(skills),
    }
}

fn faq(question: &str, answer: &str) -> Faq {
    Faq {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

fn stat(label: &str, value: &str) -> Stat {
    Stat {
        label: label.to_string(),
        value: value.to_string(),
    }
}

/// Fields every class page shares, derived from the instrument name.
fn base_class(slug: &str, instrument: &str, class_type: &str, description: &str) -> MusicClass {
    let title = format!("{} Classes in Lahore", instrument);
    MusicClass {
        slug: slug.to_string(),
        title: title.clone(),
        class_type: class_type.to_string(),
        instrument: instrument.to_string(),
        description: description.to_string(),
        metadata: SeoMetadata {
            title: format!("{} | Learn {} in Lahore", title, instrument),
            description: description.to_string(),
            keywords: format!(
                "{} classes lahore, learn {} lahore, {} teacher",
                instrument.to_lowercase(),
                instrument.to_lowercase(),
                instrument.to_lowercase()
            ),
            og_title: title.clone(),
            og_description: description.to_string(),
            og_image: format!("/images/classes/{}.jpg", slug),
        },
        hero: Hero {
            title,
            subtitle: format!("One-on-one {} lessons for every level", instrument.to_lowercase()),
            image: format!("/images/classes/{}-hero.jpg", slug),
        },
        curriculum_image: format!("/images/classes/{}-curriculum.jpg", slug),
        teaching_image: format!("/images/classes/{}-teaching.jpg", slug),
        stats: vec![
            stat("Students Taught", "500+"),
            stat("Years Teaching", "15+"),
            stat("Lesson Length", "60 min"),
        ],
        ..Default::default()
    }
}

fn piano() -> MusicClass {
    MusicClass {
        features: vec![
            feature("Classical & Pop", "Western classical pieces alongside film songs", "piano"),
            feature("Music Theory", "Scales, chords and reading notation", "book"),
            feature("Flexible Timings", "Weekday and weekend slots", "clock"),
        ],
        curriculum: vec![
            lesson("Keyboard Geography", "Posture, finger numbers and the white keys", "2 weeks"),
            lesson("Major Scales", "Hand-over-hand scales in all twelve keys", "4 weeks"),
            lesson("Chord Progressions", "Accompanying songs with triads", "6 weeks"),
        ],
        learning_paths: vec![
            path(
                "Beginner",
                "First Steps",
                "Build hand independence and simple melodies",
                &["Posture", "C major scale", "Reading treble clef"],
            ),
            path(
                "Intermediate",
                "Harmony",
                "Play and voice chords with both hands",
                &["Inversions", "Arpeggios", "Sight reading"],
            ),
        ],
        practice_tips: PracticeTips {
            routine_tips: strings(&[
                "Warm up with five minutes of scales",
                "Practice hands separately before together",
            ]),
            mistakes: strings(&["Collapsing the wrist", "Rushing difficult passages"]),
        },
        seo: Seo {
            faqs: vec![
                faq(
                    "Do I need my own piano?",
                    "A 61-key keyboard is enough for the first months.",
                ),
                faq("What age can students start?", "We teach students from seven years up."),
            ],
            structured_data: StructuredData {
                knows_about: strings(&["Piano", "Music Theory", "Western Classical"]),
            },
        },
        ..base_class(
            "piano-classes-in-lahore",
            "Piano",
            "Instrumental",
            "Piano lessons in Lahore covering technique, theory and repertoire.",
        )
    }
}

fn guitar() -> MusicClass {
    MusicClass {
        features: vec![
            feature("Acoustic & Electric", "Lessons on both instruments", "guitar"),
            feature("Song-Based Learning", "Learn the songs you love from day one", "music"),
        ],
        curriculum: vec![
            lesson("Open Chords", "The first eight chords and clean changes", "3 weeks"),
            lesson("Strumming Patterns", "Rhythm in 4/4 and 6/8", "3 weeks"),
            lesson("Barre Chords", "Moveable shapes across the neck", "5 weeks"),
        ],
        learning_paths: vec![
            path(
                "Beginner",
                "Chords & Rhythm",
                "Accompany simple songs confidently",
                &["Open chords", "Down-up strumming", "Tuning"],
            ),
            path(
                "Advanced",
                "Lead Guitar",
                "Solo over backing tracks",
                &["Pentatonic scales", "Bends", "Vibrato"],
            ),
        ],
        practice_tips: PracticeTips {
            routine_tips: strings(&["Practice chord changes with a metronome"]),
            mistakes: strings(&["Pressing too hard on the strings"]),
        },
        seo: Seo {
            faqs: vec![faq(
                "Acoustic or electric first?",
                "Either works; we recommend acoustic for building finger strength.",
            )],
            structured_data: StructuredData {
                knows_about: strings(&["Guitar", "Acoustic Guitar", "Electric Guitar"]),
            },
        },
        ..base_class(
            "guitar-classes-in-lahore",
            "Guitar",
            "Instrumental",
            "Guitar lessons in Lahore for acoustic and electric players.",
        )
    }
}

fn vocal() -> MusicClass {
    MusicClass {
        features: vec![
            feature("Riyaz Guidance", "Daily practice routines for the voice", "mic"),
            feature("Raag Foundations", "Sargam, alankars and common raags", "book"),
        ],
        curriculum: vec![
            lesson("Breath & Posture", "Diaphragmatic breathing and voice placement", "2 weeks"),
            lesson("Sargam & Alankar", "Pitch accuracy through patterns", "6 weeks"),
            lesson("Raag Yaman", "Aroh, avroh and a first bandish", "6 weeks"),
        ],
        learning_paths: vec![path(
            "Beginner",
            "Sur Sadhana",
            "Sing in tune with the tanpura",
            &["Sa sadhana", "Alankars", "Breath control"],
        )],
        practice_tips: PracticeTips {
            routine_tips: strings(&["Practice kharaj in the morning", "Record and listen back"]),
            mistakes: strings(&["Singing from the throat", "Skipping warm ups"]),
        },
        seo: Seo {
            faqs: vec![faq(
                "Can anyone learn to sing?",
                "Yes. Pitch and tone improve with regular riyaz.",
            )],
            structured_data: StructuredData {
                knows_about: strings(&["Vocals", "Hindustani Classical", "Ghazal"]),
            },
        },
        ..base_class(
            "vocal-classes-in-lahore",
            "Vocal",
            "Vocal",
            "Singing lessons in Lahore rooted in Hindustani classical training.",
        )
    }
}

fn harmonium() -> MusicClass {
    MusicClass {
        features: vec![
            feature("Accompaniment", "Support vocalists in qawwali and ghazal", "music"),
            feature("Bellows Technique", "Even air flow for a steady tone", "wind"),
        ],
        curriculum: vec![
            lesson("Bellows & Keys", "Coordinating both hands", "2 weeks"),
            lesson("Thaat System", "The ten parent scales", "4 weeks"),
        ],
        learning_paths: vec![path(
            "Beginner",
            "Steady Sur",
            "Hold notes and play simple sargam",
            &["Bellows control", "Bilawal thaat"],
        )],
        practice_tips: PracticeTips {
            routine_tips: strings(&["Sing along while you play"]),
            mistakes: strings(&["Pumping the bellows unevenly"]),
        },
        seo: Seo {
            faqs: vec![faq(
                "Is harmonium good for beginners?",
                "It is one of the easiest instruments to start on.",
            )],
            structured_data: StructuredData {
                knows_about: strings(&["Harmonium", "Qawwali", "Ghazal"]),
            },
        },
        ..base_class(
            "harmonium-classes-in-lahore",
            "Harmonium",
            "Instrumental",
            "Harmonium lessons in Lahore for solo playing and vocal accompaniment.",
        )
    }
}

fn tabla() -> MusicClass {
    MusicClass {
        features: vec![
            feature("Taal Training", "Teentaal, Keharwa, Dadra and more", "drum"),
            feature("Bol Recitation", "Speak it before you play it", "mic"),
        ],
        curriculum: vec![
            lesson("Basic Strokes", "Na, Tin, Ge and Ke on the dayan and bayan", "3 weeks"),
            lesson("Theka", "Keharwa and Dadra thekas", "4 weeks"),
            lesson("Kaida", "Theme and variations in Teentaal", "8 weeks"),
        ],
        learning_paths: vec![path(
            "Beginner",
            "Foundations",
            "Clean strokes and steady laya",
            &["Na", "Dha", "Keharwa theka"],
        )],
        practice_tips: PracticeTips {
            routine_tips: strings(&["Recite bols with a metronome before playing"]),
            mistakes: strings(&["Striking with a flat palm"]),
        },
        seo: Seo {
            faqs: vec![faq(
                "Do I need to buy a tabla set?",
                "Practice sets are available at the academy for the first month.",
            )],
            structured_data: StructuredData {
                knows_about: strings(&["Tabla", "Taal", "Indian Percussion"]),
            },
        },
        ..base_class(
            "tabla-classes-in-lahore",
            "Tabla",
            "Percussion",
            "Tabla lessons in Lahore from basic strokes to kaida and rela.",
        )
    }
}

/// The class pages the site ships with, in seed order.
pub fn canonical_classes() -> Vec<MusicClass> {
    vec![piano(), guitar(), vocal(), harmonium(), tabla()]
}
