use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::api::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::model::{Employee, EmployeeDraft, EmployeeId};

/// Calls against the employee resource.
///
/// Each call is a single request: no retry, no cancellation, no timeout beyond
/// what the transport applies by default.
#[async_trait(?Send)]
pub trait EmployeeApi {
    async fn list_all(&self) -> ApiResult<Vec<Employee>>;

    /// Matching is up to the server; `term` is passed through untouched.
    async fn search(&self, term: &str) -> ApiResult<Vec<Employee>>;

    async fn create(&self, draft: &EmployeeDraft) -> ApiResult<Employee>;

    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> ApiResult<Employee>;

    async fn remove(&self, id: &EmployeeId) -> ApiResult<()>;
}

/// `EmployeeApi` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpEmployeeApi {
    client: Client,
    base_url: String,
}

impl HttpEmployeeApi {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, &config.api_base_url()))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/employees/", self.base_url)
    }

    fn search_url(&self) -> String {
        format!("{}/employees/search/", self.base_url)
    }

    /// `{base}/employees/{id}/` with the id percent-encoded as one path segment.
    fn member_url(&self, id: &EmployeeId) -> ApiResult<Url> {
        // Dot segments would be dropped and address the collection instead.
        if matches!(id.as_str(), "" | "." | "..") {
            return Err(ApiError::NotFound(format!("no employee with id {id:?}")));
        }
        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(id.as_str())
            .push("");
        Ok(url)
    }

    /// Turn a non-2xx response into an `ApiError`, passing 2xx through.
    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        Err(ApiError::from_status(status, body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait(?Send)]
impl EmployeeApi for HttpEmployeeApi {
    async fn list_all(&self) -> ApiResult<Vec<Employee>> {
        let url = self.collection_url();
        debug!(%url, "Listing employees");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn search(&self, term: &str) -> ApiResult<Vec<Employee>> {
        let url = self.search_url();
        debug!(%url, term, "Searching employees");
        let response = self.client.get(&url).query(&[("q", term)]).send().await?;
        Self::decode(response).await
    }

    async fn create(&self, draft: &EmployeeDraft) -> ApiResult<Employee> {
        let url = self.collection_url();
        debug!(%url, name = %draft.name, "Creating employee");
        let response = self.client.post(&url).json(draft).send().await?;
        Self::decode(response).await.inspect_err(|e| {
            error!(error = %e, "Failed to create employee");
        })
    }

    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> ApiResult<Employee> {
        let url = self.member_url(id)?;
        debug!(%url, %id, "Updating employee");
        let response = self.client.put(url).json(draft).send().await?;
        Self::decode(response).await.inspect_err(|e| {
            error!(error = %e, %id, "Failed to update employee");
        })
    }

    async fn remove(&self, id: &EmployeeId) -> ApiResult<()> {
        let url = self.member_url(id)?;
        debug!(%url, %id, "Deleting employee");
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
