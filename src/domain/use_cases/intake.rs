use std::sync::atomic::{AtomicBool, Ordering};

use validator::Validate;

use crate::constants::{POST_SUBMIT_ROUTE, SUBMIT_SUCCESS_NOTICE};
use crate::entities::draft::{FormDraft, GeoPosition};
use crate::entities::image::ImageAttachment;
use crate::errors::IntakeError;
use crate::infrastructure::map::TileProvider;
use crate::infrastructure::preview::{ObjectUrlRegistry, PreviewHandle};
use crate::interfaces::api::OrphanageApi;
use crate::interfaces::navigation::Navigator;
use crate::interfaces::notify::Notifier;
use crate::settings::MapSettings;
use crate::use_cases::submission::SubmissionPayload;

/// A map interaction exposing the clicked coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    pub latitude: f64,
    pub longitude: f64,
}

/// The two observable modes of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Editing,
    Submitting,
}

/// The "create orphanage" view model.
///
/// Owns the [`FormDraft`] and drives the three interactions a renderer binds
/// to: map clicks, image selection, and submission. The backend API, the
/// navigation target, and the user-notice surface are injected seams so the
/// view stays testable without a network or a UI toolkit.
pub struct IntakeForm<A, N, T>
where
    A: OrphanageApi,
    N: Navigator,
    T: Notifier,
{
    api: A,
    navigator: N,
    notifier: T,
    tiles: TileProvider,
    previews: ObjectUrlRegistry,
    preview_handles: Vec<PreviewHandle>,
    draft: FormDraft,
    in_flight: AtomicBool,
}

impl<A, N, T> IntakeForm<A, N, T>
where
    A: OrphanageApi,
    N: Navigator,
    T: Notifier,
{
    pub fn new(api: A, navigator: N, notifier: T, map: MapSettings) -> Self {
        IntakeForm {
            api,
            navigator,
            notifier,
            tiles: TileProvider::new(map),
            previews: ObjectUrlRegistry::default(),
            preview_handles: Vec::new(),
            draft: FormDraft::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Text inputs and the weekend toggle bind straight to the draft.
    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    pub fn tiles(&self) -> &TileProvider {
        &self.tiles
    }

    /// Registry the renderer resolves `preview://` URLs against.
    pub fn preview_registry(&self) -> ObjectUrlRegistry {
        self.previews.clone()
    }

    pub fn state(&self) -> SubmitState {
        if self.in_flight.load(Ordering::Acquire) {
            SubmitState::Submitting
        } else {
            SubmitState::Editing
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmitState::Submitting
    }

    /// The marker is only drawn once a location has been picked.
    pub fn marker_visible(&self) -> bool {
        self.draft.position().is_set()
    }

    /// Overwrites the draft position with the clicked coordinate. No bounds
    /// check, no accumulation: the most recent click wins.
    pub fn handle_map_click(&mut self, click: MapClick) {
        self.draft
            .set_position(GeoPosition::new(click.latitude, click.longitude));
    }

    /// `None` means the picker was dismissed without a file list; that is a
    /// no-op. Any actual selection (including an empty one) replaces the
    /// previous batch wholesale, and the previews of the replaced batch are
    /// released as their handles drop.
    pub fn handle_select_images(&mut self, selection: Option<Vec<ImageAttachment>>) {
        let Some(files) = selection else {
            return;
        };

        let handles = files
            .iter()
            .map(|file| self.previews.create(file))
            .collect();

        self.preview_handles = handles;
        self.draft.replace_images(files);
    }

    /// Preview URLs, index-aligned with `draft().images()`.
    pub fn preview_urls(&self) -> Vec<&str> {
        self.preview_handles
            .iter()
            .map(|handle| handle.url())
            .collect()
    }

    /// Submits the current draft as one multipart POST.
    ///
    /// At most one submission is in flight at a time: a second call while
    /// the first is pending returns [`IntakeError::SubmissionInFlight`]
    /// without issuing a request. On success the user is notified and the
    /// view navigates away; on failure the draft is kept intact and the
    /// error is returned so the caller can surface it and retry.
    pub async fn handle_submit(&self) -> Result<(), IntakeError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("submit ignored: a submission is already in flight");
            return Err(IntakeError::SubmissionInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        if let Err(report) = self.draft.validate() {
            tracing::warn!(%report, "submitting draft with advisory validation findings");
        }

        let payload = SubmissionPayload::from_draft(&self.draft);
        let image_count = payload.images.len();

        match self.api.create_orphanage(payload).await {
            Ok(()) => {
                tracing::info!(image_count, "orphanage registration accepted");
                self.notifier.notify(SUBMIT_SUCCESS_NOTICE);
                self.navigator.navigate(POST_SUBMIT_ROUTE);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "orphanage registration failed, draft kept for retry");
                Err(err)
            }
        }
    }
}

/// Clears the in-flight flag when the submission future completes or is
/// dropped mid-await, so an abandoned request can never wedge the form.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
