use std::path::Path;

use reqwest::{redirect, Client};
use tokio::{fs::File, io::AsyncWriteExt, task::spawn_blocking};

use crate::document::Document;
use crate::{Error, Result};

/// Connection to the source site. Created once per run and dropped when the run ends.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(redirect::Policy::limited(10))
            // One fresh connection per request, no idle pool kept between chapters.
            .pool_max_idle_per_host(0)
            .build()
            .map_err(Error::transport("<client setup>"))?;
        Ok(Self { client })
    }

    /// Requests a page and returns its body. Non-success statuses count as transport failures.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(Error::transport(url))?;
        let body = res.bytes().await.map_err(Error::transport(url))?;
        Ok(body.to_vec())
    }

    /// Fetches and parses a page, then runs `extract` on the parsed tree.
    ///
    /// Parsing happens on the blocking pool and the tree never leaves it; it is dropped there
    /// on every path, only the extracted value comes back.
    pub async fn fetch_document<T, F>(&self, url: &str, extract: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Document) -> Result<T> + Send + 'static,
    {
        let body = self.fetch_bytes(url).await?;
        let url = url.to_string();
        spawn_blocking(move || {
            let doc = Document::parse(&url, &body)?;
            extract(&doc)
        })
        .await?
    }

    /// Streams the response for `url` into a new file at `path`.
    /// A file left incomplete by a failed transfer is removed.
    pub async fn download_to_file(&self, url: &str, path: &Path) -> Result<()> {
        let mut res = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(Error::transport(url))?;

        let mut file = File::create(path)
            .await
            .map_err(Error::filesystem(path))?;

        let written = async {
            while let Some(chunk) = res.chunk().await.map_err(Error::transport(url))? {
                file.write_all(&chunk)
                    .await
                    .map_err(Error::filesystem(path))?;
            }
            file.flush().await.map_err(Error::filesystem(path))
        }
        .await;

        if written.is_err() {
            drop(file);
            let _ = tokio::fs::remove_file(path).await;
        }
        written
    }
}
