use std::fmt;

/// One binary file handle picked from the host's file dialog.
///
/// The content is treated as an opaque blob; malformed files are accepted
/// and carried through to the API unchanged.
#[derive(Clone, PartialEq)]
pub struct ImageAttachment {
    file_name: String,
    bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageAttachment {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Sniffed from the content, never from the file name. Unknown content
    /// falls back to a generic binary type rather than being rejected.
    pub fn mime_type(&self) -> &'static str {
        infer::get(&self.bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream")
    }
}

impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type())
            .finish()
    }
}
