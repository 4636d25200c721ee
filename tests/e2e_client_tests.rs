//! End-to-end tests driving the form and listing controllers through the
//! reqwest content client against a live server.

mod common;

use common::{
    music_class, qawwal, singer, RecordingNotifier, TestServer, CLASS_SLUG, MALFORMED_ID,
    PNG_BYTES, QAWWAL_SLUG, SINGER_SLUG,
};
use sangeet_content_server::client::{ContentApi, HttpContentClient};
use sangeet_content_server::content_store::{EntityKind, ImageSlot, MusicClass, Qawwal, Singer};
use sangeet_content_server::form::{
    ClassList, FormAction, FormController, ItemField, ListPath, Notice, QawwalField, SingerField,
    SingerList, SubmitError,
};
use sangeet_content_server::listing::{ListingView, SelectionState};
use std::sync::{Arc, Mutex};

fn api(server: &TestServer) -> HttpContentClient {
    HttpContentClient::new(&server.base_url, 10).unwrap()
}

#[tokio::test]
async fn test_create_form_submits_and_resets() {
    let server = TestServer::spawn().await;
    let api = api(&server);
    let notifier = RecordingNotifier::default();

    let mut form: FormController<Singer> = FormController::new_create();
    form.dispatch(FormAction::Load(singer())).unwrap();
    // A blank album row the user added but never filled in.
    form.dispatch(FormAction::AddItem {
        path: ListPath::List(SingerList::Albums),
    })
    .unwrap();
    form.attach(ImageSlot::Main, "portrait.png", PNG_BYTES.to_vec())
        .unwrap();

    let saved = form.submit(&api, &notifier).await.unwrap();

    assert_eq!(saved.slug(), SINGER_SLUG);
    assert_eq!(saved.record::<Singer>().unwrap().albums.len(), 1);
    assert!(saved
        .record::<Singer>()
        .unwrap()
        .images
        .main
        .starts_with("/media/uploads/singers/"));
    assert!(matches!(notifier.last(), Some(Notice::Success(_))));

    // Create mode starts over after a successful save.
    assert_eq!(form.record(), &Singer::default());
    assert!(form.attachments().is_empty());
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_edit_form_updates_and_calls_back() {
    let server = TestServer::spawn().await;
    let api = api(&server);
    let notifier = RecordingNotifier::default();

    let mut create: FormController<Qawwal> = FormController::new_create();
    create.dispatch(FormAction::Load(qawwal())).unwrap();
    let created = create.submit(&api, &notifier).await.unwrap();

    let fetched = api.get(EntityKind::Qawwal, &created.id).await.unwrap();
    let saved_ids = Arc::new(Mutex::new(Vec::new()));
    let saved_ids_clone = saved_ids.clone();
    let mut edit = FormController::<Qawwal>::from_stored(&fetched)
        .unwrap()
        .on_saved(move |entity| saved_ids_clone.lock().unwrap().push(entity.id.clone()));

    edit.dispatch(FormAction::SetField {
        field: QawwalField::Tagline,
        value: "Shahenshah-e-Qawwali".to_string(),
    })
    .unwrap();
    let updated = edit.submit(&api, &notifier).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.field_str("tagline"), "Shahenshah-e-Qawwali");
    assert_eq!(*saved_ids.lock().unwrap(), vec![created.id.clone()]);
    // Edit mode keeps the form populated.
    assert_eq!(edit.record().tagline, "Shahenshah-e-Qawwali");
}

#[tokio::test]
async fn test_nested_lists_survive_round_trip() {
    let server = TestServer::spawn().await;
    let api = api(&server);
    let notifier = RecordingNotifier::default();

    let mut form: FormController<MusicClass> = FormController::new_create();
    form.dispatch(FormAction::Load(music_class())).unwrap();
    form.dispatch(FormAction::AddItem {
        path: ListPath::List(ClassList::LearningPaths),
    })
    .unwrap();
    form.dispatch(FormAction::SetItemField {
        list: ClassList::LearningPaths,
        index: 0,
        field: ItemField::Level,
        value: "Beginner".to_string(),
    })
    .unwrap();
    let skills = ListPath::Nested {
        list: ClassList::LearningPaths,
        index: 0,
    };
    form.dispatch(FormAction::AddItem { path: skills }).unwrap();
    form.dispatch(FormAction::SetString {
        path: skills,
        index: 0,
        value: "Basic strokes".to_string(),
    })
    .unwrap();
    form.dispatch(FormAction::AddItem { path: skills }).unwrap();

    let saved = form.submit(&api, &notifier).await.unwrap();
    let class = saved.record::<MusicClass>().unwrap();

    assert_eq!(saved.slug(), CLASS_SLUG);
    assert_eq!(class.learning_paths.len(), 1);
    assert_eq!(class.learning_paths[0].skills, vec!["Basic strokes"]);
}

#[tokio::test]
async fn test_duplicate_create_surfaces_server_message() {
    let server = TestServer::spawn().await;
    let api = api(&server);
    let notifier = RecordingNotifier::default();

    for _ in 0..2 {
        let mut form: FormController<Qawwal> = FormController::new_create();
        form.dispatch(FormAction::Load(qawwal())).unwrap();
        let _ = form.submit(&api, &notifier).await;
    }

    match notifier.last() {
        Some(Notice::Error(message)) => assert!(message.contains(QAWWAL_SLUG)),
        other => panic!("Expected an error notice, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_id_is_rejected_before_sending() {
    let server = TestServer::spawn().await;
    let api = api(&server);
    let notifier = RecordingNotifier::default();

    let mut form = FormController::new_edit(MALFORMED_ID, singer());
    form.dispatch(FormAction::SetField {
        field: SingerField::Bio,
        value: "never sent".to_string(),
    })
    .unwrap();

    let result = form.submit(&api, &notifier).await;

    assert!(matches!(result, Err(SubmitError::Validation(_))));
    assert_eq!(notifier.notices().len(), 1);
    assert!(api.list(EntityKind::Singer).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_filters_and_bulk_deletes() {
    let server = TestServer::spawn().await;
    let api = api(&server);
    let notifier = RecordingNotifier::default();
    let response = reqwest::Client::new()
        .post(format!("{}/api/classes/migrate", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let mut view = ListingView::new(EntityKind::Class);
    view.refresh(&api).await.unwrap();
    assert_eq!(view.items().len(), 5);

    view.set_query("GUITAR");
    assert_eq!(view.filtered().len(), 1);
    view.toggle_select_all();
    assert_eq!(view.selection_state(), SelectionState::All);

    view.set_query("");
    assert_eq!(view.selection_state(), SelectionState::Some);

    let confirmation = view.request_bulk_delete().unwrap();
    assert_eq!(confirmation.count(), 1);

    let deleted = view.confirm_delete(&api, &notifier).await.unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(view.items().len(), 4);
    assert_eq!(view.selection_state(), SelectionState::None);
    assert!(view
        .items()
        .iter()
        .all(|item| !item.slug().contains("guitar")));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    // Bind and drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let api = HttpContentClient::new(&format!("http://127.0.0.1:{}", port), 2).unwrap();
    let notifier = RecordingNotifier::default();

    let mut form: FormController<Singer> = FormController::new_create();
    form.dispatch(FormAction::Load(singer())).unwrap();
    let result = form.submit(&api, &notifier).await;

    assert!(matches!(result, Err(SubmitError::Network(_))));
    assert!(!form.is_loading());
    // The record stays so the user can retry.
    assert_eq!(form.record().slug, SINGER_SLUG);
}
