//! HTTP client for the book-catalog REST backend.
//!
//! Endpoints (JSON bodies with string-typed numeric fields):
//! - `GET    /livros`      - full collection
//! - `POST   /livros`      - create (body without id)
//! - `PUT    /livros/{id}` - update (full body)
//! - `DELETE /livros/{id}` - delete
//!
//! Blocking requests; always called from a worker thread, never the UI
//! thread. No timeouts are configured - the backend is slow to cold-start
//! and the UI stays responsive regardless.

use anyhow::{Context, bail};

use crate::entities::{Book, BookDraft};

pub struct CatalogClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/livros", self.base_url)
    }

    fn record_url(&self, id: u64) -> String {
        format!("{}/livros/{}", self.base_url, id)
    }

    /// Fetch the full collection.
    pub fn list_books(&self) -> anyhow::Result<Vec<Book>> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .context("GET /livros failed")?;

        if !response.status().is_success() {
            bail!("GET /livros returned {}", response.status());
        }

        response.json().context("Failed to decode book list")
    }

    /// Create a record from a draft (id omitted while empty).
    pub fn create_book(&self, draft: &BookDraft) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .context("POST /livros failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            bail!("POST /livros returned {}: {}", status, body);
        }

        Ok(())
    }

    /// Replace the record `id` with the full draft body.
    pub fn update_book(&self, id: u64, draft: &BookDraft) -> anyhow::Result<()> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(draft)
            .send()
            .with_context(|| format!("PUT /livros/{} failed", id))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            bail!("PUT /livros/{} returned {}: {}", id, status, body);
        }

        Ok(())
    }

    /// Delete the record `id`.
    pub fn delete_book(&self, id: u64) -> anyhow::Result<()> {
        let response = self
            .client
            .delete(self.record_url(id))
            .send()
            .with_context(|| format!("DELETE /livros/{} failed", id))?;

        if !response.status().is_success() {
            bail!("DELETE /livros/{} returned {}", id, response.status());
        }

        Ok(())
    }
}
