use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lf_core::models::ImageUpload;
use lf_core::traits::ImageEncoder;

/// Inlines uploads as `data:<mime>;base64,<bytes>`.
///
/// The bytes are not decoded; the declared media type is trusted as long as
/// it is `image/*`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlEncoder;

impl DataUrlEncoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageEncoder for DataUrlEncoder {
    async fn encode(&self, upload: &ImageUpload) -> anyhow::Result<String> {
        if !upload.is_image() {
            anyhow::bail!("{:?} is not an image media type", upload.content_type);
        }
        let mime = upload
            .essence()
            .ok_or_else(|| anyhow::anyhow!("missing media type"))?;
        if upload.data.is_empty() {
            anyhow::bail!("empty upload");
        }

        // Large photos take a while to encode; keep that off the event loop.
        let data = upload.data.clone();
        let encoded = tokio::task::spawn_blocking(move || STANDARD.encode(data)).await?;
        Ok(format!("data:{mime};base64,{encoded}"))
    }
}
