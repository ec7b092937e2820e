use crate::entities::draft::FormDraft;

/// One image binary destined for an `images` multipart part, in selection
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// The wire shape of one registration: ordered text fields followed by the
/// image parts. Building this is pure, so the exact encoding the API sees
/// can be asserted without a socket.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub fields: Vec<(&'static str, String)>,
    pub images: Vec<ImagePart>,
}

impl SubmissionPayload {
    /// Snapshot of the draft at the moment of submission. Field names and
    /// order match what the backend's multipart parser expects; numbers and
    /// booleans are stringified (`0.0` becomes `"0"`, `true` becomes
    /// `"true"`).
    pub fn from_draft(draft: &FormDraft) -> Self {
        let position = draft.position();

        let fields = vec![
            ("name", draft.name().to_owned()),
            ("latitude", position.latitude.to_string()),
            ("longitude", position.longitude.to_string()),
            ("about", draft.about().to_owned()),
            ("instructions", draft.instructions().to_owned()),
            ("opening_hours", draft.opening_hours().to_owned()),
            ("open_on_weekends", draft.open_on_weekends().to_string()),
        ];

        let images = draft
            .images()
            .iter()
            .map(|image| ImagePart {
                file_name: image.file_name().to_owned(),
                mime_type: image.mime_type().to_owned(),
                bytes: image.bytes().to_vec(),
            })
            .collect();

        SubmissionPayload { fields, images }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}
