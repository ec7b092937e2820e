
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use test_utils::*;

use orphanage_intake::api::{MockOrphanageApi, OrphanageApi};
use orphanage_intake::entities::draft::GeoPosition;
use orphanage_intake::errors::IntakeError;
use orphanage_intake::navigation::MockNavigator;
use orphanage_intake::notify::MockNotifier;
use orphanage_intake::notices::NoticeLog;
use orphanage_intake::routing::RouteHistory;
use orphanage_intake::use_cases::intake::{IntakeForm, MapClick, SubmitState};
use orphanage_intake::use_cases::submission::SubmissionPayload;

type TestForm = IntakeForm<MockOrphanageApi, RouteHistory, NoticeLog>;

fn form_with_api(api: MockOrphanageApi) -> TestForm {
    IntakeForm::new(
        api,
        RouteHistory::new(),
        NoticeLog::new(),
        test_map_settings(),
    )
}

fn editing_form() -> TestForm {
    form_with_api(MockOrphanageApi::new())
}

#[test]
fn map_click_last_write_wins() {
    let mut form = editing_form();

    form.handle_map_click(MapClick {
        latitude: -22.9,
        longitude: -43.3,
    });
    form.handle_map_click(MapClick {
        latitude: 10.0,
        longitude: 20.0,
    });
    form.handle_map_click(MapClick {
        latitude: -23.01,
        longitude: -43.2,
    });

    assert_eq!(form.draft().position(), GeoPosition::new(-23.01, -43.2));
}

#[test]
fn marker_hidden_until_a_location_is_picked() {
    let mut form = editing_form();

    assert_eq!(form.draft().position(), GeoPosition::UNSET);
    assert!(!form.marker_visible());

    form.handle_map_click(MapClick {
        latitude: -22.97,
        longitude: -43.37,
    });
    assert!(form.marker_visible());
}

#[test]
fn selecting_images_keeps_previews_index_aligned() {
    let mut form = editing_form();

    form.handle_select_images(Some(vec![
        png_fixture("a.png"),
        jpeg_fixture("b.jpg"),
        opaque_fixture("c.bin"),
    ]));

    let urls = form.preview_urls();
    assert_eq!(form.draft().images().len(), 3);
    assert_eq!(urls.len(), 3);

    let registry = form.preview_registry();
    for (image, url) in form.draft().images().iter().zip(&urls) {
        assert_eq!(registry.resolve(url).as_deref(), Some(image.bytes()));
    }
}

#[test]
fn new_selection_replaces_batch_and_releases_old_previews() {
    let mut form = editing_form();
    let registry = form.preview_registry();

    form.handle_select_images(Some(vec![
        png_fixture("a.png"),
        png_fixture("b.png"),
        png_fixture("c.png"),
    ]));
    let old_urls: Vec<String> = form.preview_urls().iter().map(|u| u.to_string()).collect();
    assert_eq!(registry.len(), 3);

    form.handle_select_images(Some(vec![jpeg_fixture("d.jpg"), jpeg_fixture("e.jpg")]));

    assert_eq!(form.draft().images().len(), 2);
    assert_eq!(form.preview_urls().len(), 2);
    assert_eq!(registry.len(), 2);
    for url in old_urls {
        assert!(registry.resolve(&url).is_none());
    }
}

#[test]
fn dismissed_picker_is_a_noop() {
    let mut form = editing_form();

    form.handle_select_images(Some(vec![png_fixture("a.png")]));
    let url_before = form.preview_urls()[0].to_string();

    form.handle_select_images(None);

    assert_eq!(form.draft().images().len(), 1);
    assert_eq!(form.preview_urls(), vec![url_before.as_str()]);
}

#[test]
fn empty_selection_clears_the_batch() {
    let mut form = editing_form();
    let registry = form.preview_registry();

    form.handle_select_images(Some(vec![png_fixture("a.png")]));
    form.handle_select_images(Some(vec![]));

    assert!(form.draft().images().is_empty());
    assert!(form.preview_urls().is_empty());
    assert!(registry.is_empty());
}

#[test]
fn previews_released_on_teardown() {
    let registry;
    {
        let mut form = editing_form();
        registry = form.preview_registry();
        form.handle_select_images(Some(vec![png_fixture("a.png"), jpeg_fixture("b.jpg")]));
        assert_eq!(registry.len(), 2);
    }
    assert!(registry.is_empty());
}

#[test]
fn about_is_soft_capped_at_300_chars() {
    let mut form = editing_form();

    form.draft_mut().set_about("x".repeat(400));
    assert_eq!(form.draft().about().chars().count(), 300);

    form.draft_mut().set_about("Casa de acolhimento");
    assert_eq!(form.draft().about(), "Casa de acolhimento");
}

#[test]
fn weekend_toggle_is_a_plain_flip_defaulting_to_true() {
    let mut form = editing_form();

    assert!(form.draft().open_on_weekends());
    form.draft_mut().set_open_on_weekends(false);
    assert!(!form.draft().open_on_weekends());
    form.draft_mut().set_open_on_weekends(true);
    assert!(form.draft().open_on_weekends());
}

#[test]
fn payload_fields_are_ordered_and_stringified() {
    let mut form = editing_form();
    form.draft_mut().set_name("Lar Feliz");
    form.draft_mut().set_about("Casa de acolhimento");
    form.draft_mut().set_opening_hours("08:00-18:00");
    form.handle_map_click(MapClick {
        latitude: -23.01,
        longitude: -43.20,
    });
    form.handle_select_images(Some(vec![png_fixture("a.png"), jpeg_fixture("b.jpg")]));

    let payload = SubmissionPayload::from_draft(form.draft());

    let names: Vec<&str> = payload.fields.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        vec![
            "name",
            "latitude",
            "longitude",
            "about",
            "instructions",
            "opening_hours",
            "open_on_weekends",
        ]
    );
    assert_eq!(payload.field("name"), Some("Lar Feliz"));
    assert_eq!(payload.field("latitude"), Some("-23.01"));
    assert_eq!(payload.field("longitude"), Some("-43.2"));
    assert_eq!(payload.field("about"), Some("Casa de acolhimento"));
    assert_eq!(payload.field("instructions"), Some(""));
    assert_eq!(payload.field("opening_hours"), Some("08:00-18:00"));
    assert_eq!(payload.field("open_on_weekends"), Some("true"));

    assert_eq!(payload.images.len(), 2);
    assert_eq!(payload.images[0].file_name, "a.png");
    assert_eq!(payload.images[0].mime_type, "image/png");
    assert_eq!(payload.images[1].file_name, "b.jpg");
    assert_eq!(payload.images[1].mime_type, "image/jpeg");
}

#[test]
fn sentinel_position_is_submitted_as_zero_strings() {
    let form = editing_form();

    let payload = SubmissionPayload::from_draft(form.draft());

    assert_eq!(payload.field("latitude"), Some("0"));
    assert_eq!(payload.field("longitude"), Some("0"));
    assert!(!form.marker_visible());
}

#[tokio::test]
async fn successful_submit_notifies_then_navigates() {
    let mut api = MockOrphanageApi::new();
    api.expect_create_orphanage()
        .times(1)
        .returning(|_| Ok(()));

    let history = RouteHistory::new();
    let notices = NoticeLog::new();
    let mut form = IntakeForm::new(api, history.clone(), notices.clone(), test_map_settings());
    form.draft_mut().set_name("Lar Feliz");

    form.handle_submit().await.expect("submit should succeed");

    assert_eq!(notices.last().as_deref(), Some("Cadastro realizado com sucesso!"));
    assert_eq!(history.current().as_deref(), Some("/app"));
    assert_eq!(form.state(), SubmitState::Editing);
}

#[tokio::test]
async fn empty_draft_still_submits() {
    let mut api = MockOrphanageApi::new();
    api.expect_create_orphanage()
        .withf(|payload| {
            payload.field("name") == Some("") && payload.images.is_empty()
        })
        .times(1)
        .returning(|_| Ok(()));

    let form = form_with_api(api);

    form.handle_submit().await.expect("submit should succeed");
}

#[tokio::test]
async fn failed_submit_keeps_draft_and_allows_retry() {
    let mut api = MockOrphanageApi::new();
    api.expect_create_orphanage()
        .times(1)
        .returning(|_| Err(IntakeError::Network("connection refused".into())));
    api.expect_create_orphanage()
        .times(1)
        .returning(|_| Ok(()));

    let mut navigator = MockNavigator::new();
    navigator
        .expect_navigate()
        .withf(|route| route == "/app")
        .times(1)
        .returning(|_| ());
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .times(1)
        .withf(|message| message == "Cadastro realizado com sucesso!")
        .returning(|_| ());

    let mut form = IntakeForm::new(api, navigator, notifier, test_map_settings());
    form.draft_mut().set_name("Lar Feliz");

    let err = form.handle_submit().await.unwrap_err();
    assert!(matches!(err, IntakeError::Network(_)));
    // No notice, no navigation; the draft survives for a retry
    assert_eq!(form.draft().name(), "Lar Feliz");
    assert_eq!(form.state(), SubmitState::Editing);

    form.handle_submit().await.expect("retry should succeed");
}

/// API double that parks until the test opens the gate, keeping a
/// submission in flight for as long as the test needs.
#[derive(Clone, Default)]
struct GatedApi {
    inner: Arc<GateInner>,
}

#[derive(Default)]
struct GateInner {
    gate: tokio::sync::Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl OrphanageApi for GatedApi {
    async fn create_orphanage(
        &self,
        _payload: SubmissionPayload,
    ) -> Result<(), IntakeError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.gate.notified().await;
        Ok(())
    }
}

#[tokio::test]
async fn second_submit_while_pending_is_rejected_without_a_request() {
    let api = GatedApi::default();
    let form = IntakeForm::new(
        api.clone(),
        RouteHistory::new(),
        NoticeLog::new(),
        test_map_settings(),
    );

    let (first, second, ()) = tokio::join!(
        form.handle_submit(),
        async {
            tokio::task::yield_now().await;
            assert_eq!(form.state(), SubmitState::Submitting);
            form.handle_submit().await
        },
        async {
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            api.inner.gate.notify_one();
        },
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(IntakeError::SubmissionInFlight)));
    assert!(second.unwrap_err().is_duplicate_submit());
    assert_eq!(api.inner.calls.load(Ordering::SeqCst), 1);
    assert_eq!(form.state(), SubmitState::Editing);
}

#[test]
fn tile_urls_come_from_the_injected_settings() {
    let form = editing_form();
    let tiles = form.tiles();

    assert_eq!(
        tiles.url_template(),
        "https://api.mapbox.com/styles/v1/mapbox/outdoors-v11/tiles/256/{z}/{x}/{y}@2x?access_token=pk.test-token"
    );
    assert_eq!(
        tiles.tile_url(14, 3, 7),
        "https://api.mapbox.com/styles/v1/mapbox/outdoors-v11/tiles/256/14/3/7@2x?access_token=pk.test-token"
    );
    assert_eq!(tiles.initial_zoom(), 14);
}
