use async_trait::async_trait;
use image::DynamicImage;
use tracing::debug;
use url::Url;

use crate::fetcher::Fetcher;
use crate::models::UserRecord;
use crate::outcome::Outcome;
use crate::stage::Stage;

/// An avatar decoded into memory, in whatever pixel layout the source file used.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage(DynamicImage);

impl DecodedImage {
    /// Decodes PNG, JPEG, GIF or WebP bytes, sniffing the format from the data.
    pub fn decode(bytes: &[u8]) -> Outcome<Self> {
        Ok(Self(image::load_from_memory(bytes)?))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Raw RGBA pixels plus dimensions, ready for a UI pixel buffer.
    pub fn to_rgba8(&self) -> (Vec<u8>, u32, u32) {
        let rgba = self.0.to_rgba8();
        let (w, h) = rgba.dimensions();
        (rgba.into_raw(), w, h)
    }
}

/// Downloads an avatar and decodes it into a [`DecodedImage`].
#[derive(Debug, Clone)]
pub struct AvatarLoader<F> {
    fetcher: F,
    size: Option<u32>,
}

impl<F: Fetcher> AvatarLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher, size: None }
    }

    /// Asks the avatar host for a `size`x`size` rendition via the `s` query parameter.
    pub fn with_size(mut self, size: Option<u32>) -> Self {
        self.size = size;
        self
    }

    pub async fn load_avatar(&self, url: &Url) -> Outcome<DecodedImage> {
        let url = self.sized(url);
        let bytes = self.fetcher.fetch(&url).await?;
        let image = DecodedImage::decode(&bytes)?;
        debug!(%url, width = image.width(), height = image.height(), "decoded avatar");
        Ok(image)
    }

    /// Replaces any `s` the avatar URL already carries.
    fn sized(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(size) = self.size {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| key != "s")
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .append_pair("s", &size.to_string());
        }
        url
    }
}

#[async_trait]
impl<F: Fetcher> Stage<UserRecord> for AvatarLoader<F> {
    type Out = DecodedImage;

    async fn run(&self, user: UserRecord) -> Outcome<DecodedImage> {
        self.load_avatar(user.avatar_location()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Failure;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::Mutex;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    /// Records requested URLs and answers with a fixed body.
    struct Recorder {
        body: Vec<u8>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Fetcher for Recorder {
        async fn fetch(&self, url: &Url) -> Outcome<Vec<u8>> {
            self.seen.lock().unwrap().push(url.to_string());
            if self.body.is_empty() {
                return Err(Failure::other("no body"));
            }
            Ok(self.body.clone())
        }
    }

    fn recorder(body: Vec<u8>) -> Recorder {
        Recorder { body, seen: Mutex::new(Vec::new()) }
    }

    #[test]
    fn decodes_png() {
        let image = DecodedImage::decode(&png(3, 2)).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        let (pixels, w, h) = image.to_rgba8();
        assert_eq!((w, h), (3, 2));
        assert_eq!(&pixels[..4], &[200, 10, 10, 255]);
    }

    #[test]
    fn rejects_non_images() {
        assert!(DecodedImage::decode(b"{\"message\":\"Not Found\"}").is_err());
        assert!(DecodedImage::decode(&png(2, 2)[..20]).is_err());
    }

    #[tokio::test]
    async fn fetches_url_verbatim_by_default() {
        let fetcher = recorder(png(1, 1));
        let url = Url::parse("https://avatars.example.com/u/1?v=4").unwrap();
        AvatarLoader::new(&fetcher).load_avatar(&url).await.unwrap();
        assert_eq!(*fetcher.seen.lock().unwrap(), ["https://avatars.example.com/u/1?v=4"]);
    }

    #[tokio::test]
    async fn appends_size_when_requested() {
        let fetcher = recorder(png(1, 1));
        let url = Url::parse("https://avatars.example.com/u/1?v=4").unwrap();
        AvatarLoader::new(&fetcher)
            .with_size(Some(80))
            .load_avatar(&url)
            .await
            .unwrap();
        assert_eq!(*fetcher.seen.lock().unwrap(), ["https://avatars.example.com/u/1?v=4&s=80"]);
    }

    #[tokio::test]
    async fn replaces_existing_size() {
        let fetcher = recorder(png(1, 1));
        let url = Url::parse("https://avatars.example.com/u/1?s=460&v=4").unwrap();
        AvatarLoader::new(&fetcher)
            .with_size(Some(80))
            .load_avatar(&url)
            .await
            .unwrap();
        assert_eq!(*fetcher.seen.lock().unwrap(), ["https://avatars.example.com/u/1?v=4&s=80"]);
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let fetcher = recorder(Vec::new());
        let url = Url::parse("https://avatars.example.com/u/1").unwrap();
        assert!(AvatarLoader::new(&fetcher).load_avatar(&url).await.is_err());
    }
}
