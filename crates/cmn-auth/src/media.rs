/// External image-store collaborator. Only registration and profile-picture
/// changes call it; an upload failure is fatal to the calling operation and
/// nothing is persisted when one occurs.
#[async_trait::async_trait]
pub trait Images: Send + Sync {
    /// Stores the image bytes and returns a serving URL.
    async fn upload(&self, bytes: &[u8]) -> anyhow::Result<String>;
}

/// Local-disk image hosting. Content lands under the media root with a
/// fresh uuid name and is addressed as `/media/<name>`.
pub struct Disk {
    root: std::path::PathBuf,
}

impl Disk {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
    /// Reads `MEDIA_DIR`, defaulting to `media/` in the working directory.
    pub fn from_env() -> Self {
        Self::new(std::env::var("MEDIA_DIR").unwrap_or_else(|_| "media".to_string()))
    }
}

#[async_trait::async_trait]
impl Images for Disk {
    async fn upload(&self, bytes: &[u8]) -> anyhow::Result<String> {
        let name = uuid::Uuid::now_v7().to_string();
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.root.join(&name), bytes)?;
        log::debug!("stored media {} ({} bytes)", name, bytes.len());
        Ok(format!("/media/{}", name))
    }
}
