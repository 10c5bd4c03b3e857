//! Typed client for the mailbox HTTP surface.
//!
//! [`MailApi`] is the seam the synchronization engine programs against;
//! [`HttpMailApi`] is the production implementation over `reqwest`, pointed
//! at the gateway (or directly at the backend, whose surface is identical).

use std::future::Future;

use reqwest::Url;

use crate::email::{Email, EmailId, EmailList, EmailPatch, NewEmail, Tab};
use crate::error::{Error, Result};

/// Operations the mailbox engine needs from the backend.
///
/// All calls are pass-through reads/writes with no client-side caching;
/// every list call forces a fresh read.
pub trait MailApi: Clone + Send + Sync + 'static {
    /// Fetches the email list for a `(tab, query)` pair.
    ///
    /// `query` is included only when non-empty after trimming; an absent
    /// filter matches everything.
    fn list_emails(
        &self,
        tab: Tab,
        query: Option<String>,
    ) -> impl Future<Output = Result<Vec<Email>>> + Send;

    /// Fetches a single email by id. A missing id surfaces as the backend's
    /// not-found status, not a synthesized one.
    fn get_email(&self, id: EmailId) -> impl Future<Output = Result<Email>> + Send;

    /// Applies a partial update and returns the resulting full record.
    fn update_email(
        &self,
        id: EmailId,
        patch: EmailPatch,
    ) -> impl Future<Output = Result<Email>> + Send;

    /// Creates a new record and returns it with its backend-assigned id.
    fn create_email(&self, payload: NewEmail) -> impl Future<Output = Result<Email>> + Send;

    /// Deletes a record. Success carries no body, only a status.
    fn delete_email(&self, id: EmailId) -> impl Future<Output = Result<()>> + Send;
}

/// `reqwest`-backed [`MailApi`] implementation.
#[derive(Debug, Clone)]
pub struct HttpMailApi {
    http: reqwest::Client,
    base: Url,
}

impl HttpMailApi {
    /// Creates a client against a base URL such as `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self> {
        // Url::join treats a path without a trailing slash as a file.
        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized).map_err(|e| Error::BaseUrl(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::BaseUrl(e.to_string()))
    }
}

fn check_status(res: &reqwest::Response) -> Result<()> {
    let status = res.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::Status {
            code: status.as_u16(),
        })
    }
}

impl MailApi for HttpMailApi {
    async fn list_emails(&self, tab: Tab, query: Option<String>) -> Result<Vec<Email>> {
        let mut url = self.endpoint("emails")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("tab", tab.as_str());
            if let Some(q) = query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
                pairs.append_pair("q", q);
            }
        }
        let res = self.http.get(url).send().await?;
        check_status(&res)?;
        let list: EmailList = res.json().await?;
        Ok(list.emails)
    }

    async fn get_email(&self, id: EmailId) -> Result<Email> {
        let url = self.endpoint(&format!("emails/{id}"))?;
        let res = self.http.get(url).send().await?;
        check_status(&res)?;
        Ok(res.json().await?)
    }

    async fn update_email(&self, id: EmailId, patch: EmailPatch) -> Result<Email> {
        let url = self.endpoint(&format!("emails/{id}"))?;
        let res = self.http.put(url).json(&patch).send().await?;
        check_status(&res)?;
        Ok(res.json().await?)
    }

    async fn create_email(&self, payload: NewEmail) -> Result<Email> {
        let url = self.endpoint("emails")?;
        let res = self.http.post(url).json(&payload).send().await?;
        check_status(&res)?;
        Ok(res.json().await?)
    }

    async fn delete_email(&self, id: EmailId) -> Result<()> {
        let url = self.endpoint(&format!("emails/{id}"))?;
        let res = self.http.delete(url).send().await?;
        check_status(&res)
    }
}
