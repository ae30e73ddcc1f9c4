//! Local image storage
//!
//! Images are saved under `<base_dir>/<product slug>/<file name>`. A file
//! that already exists is never fetched again, so reruns only download what
//! is missing.

use crate::crawler::PageFetcher;
use crate::storage::{StorageError, StorageResult};
use crate::url::{image_file_name, last_path_segment, slugify};
use std::path::{Path, PathBuf};
use url::Url;

/// Folder used when neither the product name nor its URL yield a slug
const FALLBACK_FOLDER: &str = "product";

/// Outcome of saving one product's images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedImages {
    /// Local references, relative to the directory containing `base_dir`
    pub references: Vec<String>,

    /// Images fetched during this run
    pub downloaded: usize,

    /// Images already present on disk
    pub reused: usize,

    /// Images that could not be fetched or written
    pub failed: usize,
}

/// Stores product images on the local filesystem
#[derive(Debug, Clone)]
pub struct ImageStore {
    base_dir: PathBuf,
}

impl ImageStore {
    /// Creates a store rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Folder name for a product: slug of its name, else of its URL's last
    /// path segment, else a generic name
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_harvest::storage::ImageStore;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://shop.example.com/produto/lona-440g/").unwrap();
    /// assert_eq!(ImageStore::folder_name("Lona Front 440g", &url), "lona-front-440g");
    /// assert_eq!(ImageStore::folder_name("", &url), "lona-440g");
    /// ```
    pub fn folder_name(product_name: &str, product_url: &Url) -> String {
        let source = if product_name.trim().is_empty() {
            last_path_segment(product_url).unwrap_or_default()
        } else {
            product_name.to_string()
        };

        let slug = slugify(&source);
        if slug.is_empty() {
            FALLBACK_FOLDER.to_string()
        } else {
            slug
        }
    }

    /// Saves the given images into the product's folder
    ///
    /// Failing to create the folder fails the whole call; a single image
    /// that cannot be fetched or written is logged and skipped.
    pub async fn save_product_images<F>(
        &self,
        fetcher: &mut F,
        image_urls: &[String],
        product_name: &str,
        product_url: &Url,
    ) -> StorageResult<SavedImages>
    where
        F: PageFetcher + ?Sized,
    {
        let mut saved = SavedImages::default();
        if image_urls.is_empty() {
            return Ok(saved);
        }

        let folder = Self::folder_name(product_name, product_url);
        let product_dir = self.base_dir.join(&folder);
        tokio::fs::create_dir_all(&product_dir).await?;

        for (index, image_url) in image_urls.iter().enumerate() {
            let image_url = match Url::parse(image_url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping image with invalid URL {}: {}", image_url, e);
                    saved.failed += 1;
                    continue;
                }
            };

            let file_name = image_file_name(&image_url, index + 1);
            let file_path = product_dir.join(&file_name);

            if tokio::fs::try_exists(&file_path).await.unwrap_or(false) {
                tracing::debug!("Image already stored: {}", file_path.display());
                saved.reused += 1;
            } else {
                match self.download(fetcher, &image_url, &file_path).await {
                    Ok(()) => saved.downloaded += 1,
                    Err(e) => {
                        tracing::warn!("Failed to save image {}: {}", image_url, e);
                        saved.failed += 1;
                        continue;
                    }
                }
            }

            saved.references.push(self.reference(&folder, &file_name));
        }

        Ok(saved)
    }

    /// Fetches one image and writes it to `file_path`
    async fn download<F>(&self, fetcher: &mut F, image_url: &Url, file_path: &Path) -> StorageResult<()>
    where
        F: PageFetcher + ?Sized,
    {
        let bytes = fetcher
            .fetch_bytes(image_url)
            .await
            .ok_or_else(|| StorageError::Download {
                url: image_url.to_string(),
                message: "no content".to_string(),
            })?;

        tokio::fs::write(file_path, bytes).await?;
        tracing::debug!("Saved image {}", file_path.display());
        Ok(())
    }

    /// Local reference `<base dir name>/<folder>/<file>`
    fn reference(&self, folder: &str, file_name: &str) -> String {
        let base_name = self
            .base_dir
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.base_dir.clone());

        base_name
            .join(folder)
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }
}
