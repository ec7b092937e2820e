/// Default map viewport, centered on the west zone of Rio de Janeiro.
pub const MAP_CENTER_LATITUDE: f64 = -22.9752102;
pub const MAP_CENTER_LONGITUDE: f64 = -43.3746088;
pub const MAP_DEFAULT_ZOOM: u8 = 14;

/// Upper bound enforced by the "about" input control.
pub const ABOUT_MAX_CHARS: usize = 300;

/// Resource path the registration is posted to, relative to the API base.
pub const ORPHANAGES_PATH: &str = "orphanages";

/// Multipart field name carrying each image binary.
pub const IMAGES_FIELD: &str = "images";

/// Route the view navigates to once a registration is accepted.
pub const POST_SUBMIT_ROUTE: &str = "/app";

/// User-facing confirmation notice (single locale, pt-BR).
pub const SUBMIT_SUCCESS_NOTICE: &str = "Cadastro realizado com sucesso!";
