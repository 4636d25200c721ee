//! Form controller: editable record state plus submission.

use super::action::{reduce, FormAction, FormError};
use super::records::FormRecord;
use crate::client::{ApiError, Attachment, ContentApi, Submission};
use crate::content_store::validation::{validate_identifier, ValidationError};
use crate::content_store::{ImageSlot, StoredEntity};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};

/// A message the user has to acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(message) | Notice::Error(message) => f.write_str(message),
        }
    }
}

/// Surfaces notices to the user. `alert` returns once the user has
/// acknowledged the notice.
pub trait Notifier: Send + Sync {
    fn alert(&self, notice: &Notice);
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Rejected before any request was made.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid response from server (status {status}): {detail}")]
    Transport { status: u16, detail: String },

    #[error("{0}")]
    Application(String),

    #[error("Error submitting form: {0}")]
    Network(String),

    #[error("A submission is already in progress")]
    Busy,

    #[error("Failed to encode record: {0}")]
    Encoding(String),
}

impl From<ApiError> for SubmitError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport { status, detail } => SubmitError::Transport { status, detail },
            ApiError::Application { message, .. } => SubmitError::Application(message),
            ApiError::Network(message) => SubmitError::Network(message),
            ApiError::Encoding(message) => SubmitError::Encoding(message),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

type SavedCallback = Box<dyn FnMut(&StoredEntity) + Send>;

pub struct FormController<R: FormRecord> {
    mode: FormMode,
    record: R,
    /// Paths already stored on the record being edited, shown next to the
    /// file pickers. New selections live in `attachments`.
    existing_images: Vec<(ImageSlot, String)>,
    attachments: Vec<Attachment>,
    loading: bool,
    on_saved: Option<SavedCallback>,
}

impl<R: FormRecord> FormController<R> {
    pub fn new_create() -> Self {
        FormController {
            mode: FormMode::Create,
            record: R::default(),
            existing_images: Vec::new(),
            attachments: Vec::new(),
            loading: false,
            on_saved: None,
        }
    }

    pub fn new_edit(id: impl Into<String>, record: R) -> Self {
        FormController {
            mode: FormMode::Edit { id: id.into() },
            existing_images: record.image_paths(),
            record,
            attachments: Vec::new(),
            loading: false,
            on_saved: None,
        }
    }

    /// Edit-mode controller for a record fetched from the API.
    pub fn from_stored(stored: &StoredEntity) -> serde_json::Result<Self> {
        Ok(Self::new_edit(stored.id.clone(), stored.record::<R>()?))
    }

    /// Called after a successful edit-mode submission.
    pub fn on_saved(mut self, callback: impl FnMut(&StoredEntity) + Send + 'static) -> Self {
        self.on_saved = Some(Box::new(callback));
        self
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn existing_images(&self) -> &[(ImageSlot, String)] {
        &self.existing_images
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dispatch(&mut self, action: FormAction<R>) -> Result<(), FormError> {
        self.record = reduce(&self.record, action)?;
        Ok(())
    }

    /// Selects a file for `slot`. Single-image slots keep only the latest
    /// selection; gallery selections accumulate.
    pub fn attach(
        &mut self,
        slot: ImageSlot,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), FormError> {
        if !R::IMAGE_SLOTS.contains(&slot) {
            return Err(FormError::UnsupportedImageSlot(slot.field_name()));
        }
        if slot != ImageSlot::Gallery {
            self.attachments.retain(|a| a.slot != slot);
        }
        self.attachments.push(Attachment {
            slot,
            file_name: file_name.into(),
            bytes,
        });
        Ok(())
    }

    pub fn clear_attachments(&mut self) {
        self.attachments.clear();
    }

    /// Builds the transport envelope: identifier check in edit mode, then
    /// blank sub-records dropped from every collection.
    pub fn prepare_submission(&self) -> Result<Submission, SubmitError> {
        if let FormMode::Edit { id } = &self.mode {
            validate_identifier(id)?;
        }
        let mut record = self.record.clone();
        record.sanitize();
        let data =
            serde_json::to_value(&record).map_err(|e| SubmitError::Encoding(e.to_string()))?;
        Ok(Submission {
            data,
            attachments: self.attachments.clone(),
        })
    }

    /// Marks the form as loading and returns what to send.
    /// Fails while a previous submission is still pending.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        if self.loading {
            return Err(SubmitError::Busy);
        }
        let submission = self.prepare_submission()?;
        self.loading = true;
        Ok(submission)
    }

    /// Applies the server's answer to a submission started with
    /// `begin_submit`.
    pub fn finish_submit(
        &mut self,
        result: Result<StoredEntity, ApiError>,
    ) -> Result<StoredEntity, SubmitError> {
        self.loading = false;
        let saved = result?;
        match self.mode {
            FormMode::Create => self.reset(),
            FormMode::Edit { .. } => {
                if let Some(callback) = self.on_saved.as_mut() {
                    callback(&saved);
                }
            }
        }
        Ok(saved)
    }

    /// Validates, sends and reports the outcome through `notifier`.
    pub async fn submit(
        &mut self,
        api: &dyn ContentApi,
        notifier: &dyn Notifier,
    ) -> Result<StoredEntity, SubmitError> {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(SubmitError::Busy) => return Err(SubmitError::Busy),
            Err(err) => {
                notifier.alert(&Notice::Error(err.to_string()));
                return Err(err);
            }
        };

        let kind = R::KIND;
        let result = match &self.mode {
            FormMode::Create => api.create(kind, submission).await,
            FormMode::Edit { id } => api.update(kind, id, submission).await,
        };

        let created = self.mode == FormMode::Create;
        match self.finish_submit(result) {
            Ok(saved) => {
                debug!("Saved {} {}", kind, saved.id);
                let verb = if created { "created" } else { "updated" };
                notifier.alert(&Notice::Success(format!(
                    "{} '{}' {} successfully",
                    kind,
                    saved.display_name(),
                    verb
                )));
                Ok(saved)
            }
            Err(err) => {
                error!("Submitting {} failed: {}", kind, err);
                notifier.alert(&Notice::Error(err.to_string()));
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.record = R::default();
        self.attachments.clear();
        self.existing_images.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockContentApi;
    use crate::content_store::{
        EntityKind, Faq, Feature, LearningPath, MusicClass, PracticeTips, Seo, Singer,
    };
    use crate::form::action::ListPath;
    use crate::form::records::{ClassField, ClassList, SingerField};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const VALID_ID: &str = "65e1a2b3c4d5e6f708192a3b";

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    fn filled_class() -> MusicClass {
        MusicClass {
            slug: "piano-classes-in-lahore".to_string(),
            title: "Piano Classes in Lahore".to_string(),
            features: vec![
                Feature {
                    title: "Theory".to_string(),
                    ..Default::default()
                },
                Feature {
                    title: "  ".to_string(),
                    description: "".to_string(),
                    icon: "\t".to_string(),
                },
            ],
            learning_paths: vec![
                LearningPath {
                    title: "Beginner".to_string(),
                    skills: vec!["Scales".to_string(), "".to_string()],
                    ..Default::default()
                },
                LearningPath {
                    skills: vec![" ".to_string()],
                    ..Default::default()
                },
            ],
            practice_tips: PracticeTips {
                routine_tips: vec!["".to_string(), "Warm up".to_string()],
                mistakes: vec!["   ".to_string()],
            },
            seo: Seo {
                faqs: vec![Faq::default()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn stored_class(id: &str, record: &MusicClass) -> crate::content_store::StoredEntity {
        let now = Utc::now();
        crate::content_store::StoredEntity {
            id: id.to_string(),
            kind: EntityKind::Class,
            created_at: now,
            updated_at: now,
            document: serde_json::to_value(record).unwrap(),
        }
    }

    #[tokio::test]
    async fn malformed_id_fails_before_any_request() {
        let api = MockContentApi::new();
        let notifier = RecordingNotifier::default();
        let mut form = FormController::new_edit("abc123", filled_class());

        let err = form.submit(&api, &notifier).await.unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::InvalidIdentifier { .. })
        ));
        assert_eq!(api.total_calls(), 0);
        assert!(!form.is_loading());
        match &notifier.notices()[..] {
            [Notice::Error(message)] => assert!(message.contains("Invalid ID format")),
            other => panic!("unexpected notices {:?}", other),
        }
    }

    #[test]
    fn identifier_format_checked_in_edit_mode_only() {
        for bad in ["", "abc123", "65e1a2b3c4d5e6f708192a3b00", "zze1a2b3c4d5e6f708192a3b"] {
            let form = FormController::new_edit(bad, filled_class());
            assert!(form.prepare_submission().is_err(), "{:?} accepted", bad);
        }
        let form = FormController::new_edit(VALID_ID, filled_class());
        assert!(form.prepare_submission().is_ok());

        let mut form = FormController::<MusicClass>::new_create();
        form.dispatch(FormAction::Load(filled_class())).unwrap();
        assert!(form.prepare_submission().is_ok());
    }

    #[test]
    fn blank_sub_records_are_not_submitted() {
        let form = FormController::new_edit(VALID_ID, filled_class());
        let data = form.prepare_submission().unwrap().data;

        assert_eq!(data["features"].as_array().unwrap().len(), 1);
        assert_eq!(data["features"][0]["title"], "Theory");
        assert_eq!(data["learningPaths"].as_array().unwrap().len(), 1);
        assert_eq!(data["learningPaths"][0]["skills"], serde_json::json!(["Scales"]));
        assert_eq!(data["practiceTips"]["routineTips"], serde_json::json!(["Warm up"]));
        assert_eq!(data["practiceTips"]["mistakes"], serde_json::json!([]));
        assert_eq!(data["seo"]["faqs"], serde_json::json!([]));

        // Local state still holds the blank rows the editor added.
        assert_eq!(form.record().features.len(), 2);
    }

    #[tokio::test]
    async fn create_resets_state_on_success() {
        let api = MockContentApi::new();
        let notifier = RecordingNotifier::default();
        let mut form = FormController::<MusicClass>::new_create();
        form.dispatch(FormAction::Load(filled_class())).unwrap();
        form.attach(ImageSlot::Hero, "hero.png", vec![0x89, b'P', b'N', b'G'])
            .unwrap();

        let saved = form.submit(&api, &notifier).await.unwrap();

        assert_eq!(saved.slug(), "piano-classes-in-lahore");
        assert_eq!(api.get_call_count("create"), 1);
        assert_eq!(api.last_submission().unwrap().attachments.len(), 1);
        assert_eq!(form.record(), &MusicClass::default());
        assert!(form.attachments().is_empty());
        assert!(matches!(notifier.notices().as_slice(), [Notice::Success(_)]));
    }

    #[tokio::test]
    async fn edit_keeps_state_and_calls_back() {
        let api = MockContentApi::new();
        let record = filled_class();
        api.add_entity(stored_class(VALID_ID, &record));
        let notifier = RecordingNotifier::default();

        let saved_count = Arc::new(AtomicUsize::new(0));
        let counter = saved_count.clone();
        let mut form = FormController::new_edit(VALID_ID, record).on_saved(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        form.dispatch(FormAction::SetField {
            field: ClassField::Title,
            value: "Piano Lessons".to_string(),
        })
        .unwrap();

        let saved = form.submit(&api, &notifier).await.unwrap();

        assert_eq!(api.get_call_count("update"), 1);
        assert_eq!(saved.display_name(), "Piano Lessons");
        assert_eq!(form.record().title, "Piano Lessons");
        assert_eq!(saved_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn application_error_is_alerted_verbatim() {
        let api = MockContentApi::new();
        api.fail_next(ApiError::Application {
            status: 409,
            message: "classes with slug 'piano-classes-in-lahore' already exists".to_string(),
        });
        let notifier = RecordingNotifier::default();
        let mut form = FormController::<MusicClass>::new_create();
        form.dispatch(FormAction::Load(filled_class())).unwrap();

        let err = form.submit(&api, &notifier).await.unwrap_err();

        assert!(matches!(err, SubmitError::Application(_)));
        assert_eq!(
            notifier.notices(),
            vec![Notice::Error(
                "classes with slug 'piano-classes-in-lahore' already exists".to_string()
            )]
        );
        // Failed create keeps what the user typed.
        assert_eq!(form.record().slug, "piano-classes-in-lahore");
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn transport_and_network_errors_are_distinct() {
        let api = MockContentApi::new();
        let notifier = RecordingNotifier::default();
        let mut form = FormController::<MusicClass>::new_create();

        api.fail_next(ApiError::Transport {
            status: 502,
            detail: "<html>".to_string(),
        });
        let err = form.submit(&api, &notifier).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Transport {
                status: 502,
                detail: "<html>".to_string()
            }
        );
        assert!(err.to_string().contains("status 502"));

        api.fail_next(ApiError::Network("connection refused".to_string()));
        let err = form.submit(&api, &notifier).await.unwrap_err();
        assert_eq!(err, SubmitError::Network("connection refused".to_string()));
    }

    #[test]
    fn encoding_failures_are_not_network_errors() {
        let err = SubmitError::from(ApiError::Encoding("attachment: bad mime".to_string()));
        assert_eq!(err, SubmitError::Encoding("attachment: bad mime".to_string()));
        assert_eq!(err.to_string(), "Failed to encode record: attachment: bad mime");
    }

    #[test]
    fn second_submission_is_refused_while_loading() {
        let mut form = FormController::<MusicClass>::new_create();
        form.begin_submit().unwrap();
        assert!(form.is_loading());
        assert_eq!(form.begin_submit().unwrap_err(), SubmitError::Busy);

        form.finish_submit(Err(ApiError::Network("timeout".to_string())))
            .unwrap_err();
        assert!(!form.is_loading());
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn edit_mode_exposes_existing_images() {
        let singer = Singer {
            slug: "abida".to_string(),
            name: "Abida".to_string(),
            images: crate::content_store::Images {
                main: "/media/uploads/singers/a.jpg".to_string(),
                gallery: vec!["/media/uploads/singers/b.jpg".to_string()],
            },
            ..Default::default()
        };
        let mut form = FormController::new_edit(VALID_ID, singer);
        assert_eq!(form.existing_images().len(), 2);

        // No new upload: the stored path travels with the record.
        let data = form.prepare_submission().unwrap().data;
        assert_eq!(data["images"]["main"], "/media/uploads/singers/a.jpg");

        form.dispatch(FormAction::SetField {
            field: SingerField::Name,
            value: "Abida Parveen".to_string(),
        })
        .unwrap();
        assert_eq!(form.existing_images().len(), 2);
    }

    #[test]
    fn attach_checks_slots_and_replaces_single_images() {
        let mut form = FormController::<MusicClass>::new_create();
        assert_eq!(
            form.attach(ImageSlot::Main, "x.png", vec![]).unwrap_err(),
            FormError::UnsupportedImageSlot("mainImage")
        );

        form.attach(ImageSlot::Hero, "a.png", vec![1]).unwrap();
        form.attach(ImageSlot::Hero, "b.png", vec![2]).unwrap();
        assert_eq!(form.attachments().len(), 1);
        assert_eq!(form.attachments()[0].file_name, "b.png");

        let mut singer_form = FormController::<Singer>::new_create();
        singer_form.attach(ImageSlot::Gallery, "1.png", vec![1]).unwrap();
        singer_form.attach(ImageSlot::Gallery, "2.png", vec![2]).unwrap();
        assert_eq!(singer_form.attachments().len(), 2);
    }

    #[test]
    fn rejected_action_keeps_previous_record() {
        let mut form = FormController::new_edit(VALID_ID, filled_class());
        let before = form.record().clone();
        assert!(form
            .dispatch(FormAction::RemoveItem {
                path: ListPath::List(ClassList::Stats),
                index: 0,
            })
            .is_err());
        assert_eq!(form.record(), &before);
    }
}
