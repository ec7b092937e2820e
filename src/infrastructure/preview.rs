use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::entities::image::ImageAttachment;

const PREVIEW_SCHEME: &str = "preview://";

/// In-process stand-in for the browser's object-URL table: hands out
/// locally-resolvable `preview://<uuid>` references for image blobs.
///
/// Each reference lives exactly as long as its [`PreviewHandle`]; dropping
/// the handle removes the blob from the registry, so replacing a selection
/// or tearing the view down releases every preview it owned.
#[derive(Clone, Default)]
pub struct ObjectUrlRegistry {
    blobs: Arc<Mutex<HashMap<Uuid, Vec<u8>>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, image: &ImageAttachment) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.blobs.lock().insert(id, image.bytes().to_vec());

        PreviewHandle {
            id,
            url: format!("{PREVIEW_SCHEME}{id}"),
            registry: self.clone(),
        }
    }

    /// Resolves a live preview URL back to its bytes. Released or foreign
    /// URLs resolve to nothing.
    pub fn resolve(&self, url: &str) -> Option<Vec<u8>> {
        let id = url.strip_prefix(PREVIEW_SCHEME)?;
        let id = Uuid::parse_str(id).ok()?;
        self.blobs.lock().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.lock().is_empty()
    }

    fn release(&self, id: &Uuid) {
        if self.blobs.lock().remove(id).is_some() {
            tracing::debug!(%id, "released preview url");
        }
    }
}

/// Owning reference to one preview URL.
pub struct PreviewHandle {
    id: Uuid,
    url: String,
    registry: ObjectUrlRegistry,
}

impl PreviewHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(&self.id);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("id", &self.id)
            .field("url", &self.url)
            .finish()
    }
}
