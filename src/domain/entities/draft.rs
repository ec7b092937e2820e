use serde::Serialize;
use validator::Validate;

use crate::constants::ABOUT_MAX_CHARS;
use crate::entities::image::ImageAttachment;

/// A geographic coordinate picked on the map.
///
/// `(0, 0)` is the sentinel for "no location chosen yet"; the map marker is
/// only rendered once the latitude moves off zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub const UNSET: GeoPosition = GeoPosition {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPosition {
            latitude,
            longitude,
        }
    }

    /// Marker visibility predicate.
    pub fn is_set(&self) -> bool {
        self.latitude != 0.0
    }
}

/// The transient state of one not-yet-submitted registration.
///
/// Created with defaults when the view mounts, mutated field-by-field by the
/// bound controls, and discarded once a submission succeeds. Validation here
/// is advisory only: the backend accepts empty drafts, so nothing blocks a
/// submission client-side.
#[derive(Debug, Validate)]
pub struct FormDraft {
    #[validate(length(min = 1, message = "name is empty"))]
    name: String,

    #[validate(length(max = 300, message = "about exceeds 300 characters"))]
    about: String,

    instructions: String,

    opening_hours: String,

    open_on_weekends: bool,

    position: GeoPosition,

    images: Vec<ImageAttachment>,
}

impl Default for FormDraft {
    fn default() -> Self {
        FormDraft {
            name: String::new(),
            about: String::new(),
            instructions: String::new(),
            opening_hours: String::new(),
            open_on_weekends: true,
            position: GeoPosition::UNSET,
            images: Vec::new(),
        }
    }
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    /// Soft cap mirroring the input control's 300-character limit.
    pub fn set_about(&mut self, about: impl Into<String>) {
        self.about = about.into().chars().take(ABOUT_MAX_CHARS).collect();
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.instructions = instructions.into();
    }

    pub fn opening_hours(&self) -> &str {
        &self.opening_hours
    }

    pub fn set_opening_hours(&mut self, opening_hours: impl Into<String>) {
        self.opening_hours = opening_hours.into();
    }

    pub fn open_on_weekends(&self) -> bool {
        self.open_on_weekends
    }

    pub fn set_open_on_weekends(&mut self, open: bool) {
        self.open_on_weekends = open;
    }

    pub fn position(&self) -> GeoPosition {
        self.position
    }

    /// Last write wins; a new click simply overwrites the previous one.
    pub fn set_position(&mut self, position: GeoPosition) {
        self.position = position;
    }

    pub fn images(&self) -> &[ImageAttachment] {
        &self.images
    }

    /// A new picker selection replaces the whole batch, order preserved.
    pub fn replace_images(&mut self, images: Vec<ImageAttachment>) {
        self.images = images;
    }
}
