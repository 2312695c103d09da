//! HTTP backend talking to the RAG and ingestion endpoints

use super::error::DispatchError;
use super::traits::PolicyBackend;
use crate::config::AppConfig;
use crate::constants::{ANSWER_PATH, INDEXED_FILES_PATH, UPLOAD_FIELD, UPLOAD_PATH};
use crate::domain::{IndexedFile, UploadFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// reqwest client bound to one backend address
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http: client,
        }
    }

    /// Build a client honouring the configured request timeout.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(config.base_url.clone(), builder.build()?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build URL from base address and path
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Check the status, then decode the body. Unreadable bodies are network
    /// failures; bodies that are not the expected JSON are protocol failures.
    async fn read_json<T>(endpoint: &str, response: Response) -> Result<T, DispatchError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::http(endpoint, status));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| DispatchError::network(endpoint, err))?;
        serde_json::from_slice(&body)
            .map_err(|err| DispatchError::protocol(endpoint, format!("malformed JSON body: {err}")))
    }
}

#[async_trait]
impl PolicyBackend for HttpBackend {
    async fn ask(&self, question: &str, api_key: Option<&str>) -> Result<String, DispatchError> {
        let url = self.build_url(ANSWER_PATH);
        info!(
            url = %url,
            question_len = question.len(),
            authorized = api_key.is_some(),
            "Sending question to answer endpoint"
        );

        let mut request = self.http.get(&url).query(&[("query", question)]);
        if let Some(key) = api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|err| DispatchError::network(ANSWER_PATH, err))?;

        let body: AnswerBody = Self::read_json(ANSWER_PATH, response).await?;
        debug!("Received response from answer endpoint");

        match (body.answer, body.error) {
            (Some(answer), _) => Ok(answer),
            (None, Some(error)) => Err(DispatchError::protocol(ANSWER_PATH, error)),
            (None, None) => Err(DispatchError::protocol(
                ANSWER_PATH,
                "response is missing the 'answer' field",
            )),
        }
    }

    async fn ingest(&self, file: &UploadFile) -> Result<String, DispatchError> {
        let url = self.build_url(UPLOAD_PATH);
        info!(
            url = %url,
            file = file.name.as_str(),
            bytes = file.size(),
            "Uploading document to ingestion endpoint"
        );

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|err| DispatchError::network(UPLOAD_PATH, err))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| DispatchError::network(UPLOAD_PATH, err))?;

        let body: UploadBody = Self::read_json(UPLOAD_PATH, response).await?;
        debug!(file = file.name.as_str(), "Ingestion endpoint accepted document");

        match (body.message, body.error) {
            (Some(message), _) => Ok(message),
            (None, Some(error)) => Err(DispatchError::protocol(UPLOAD_PATH, error)),
            (None, None) => Err(DispatchError::protocol(
                UPLOAD_PATH,
                "response is missing the 'message' field",
            )),
        }
    }

    async fn indexed_files(&self) -> Result<Vec<IndexedFile>, DispatchError> {
        let url = self.build_url(INDEXED_FILES_PATH);
        debug!(url = %url, "Listing indexed documents");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| DispatchError::network(INDEXED_FILES_PATH, err))?;

        let body: FilesBody = Self::read_json(INDEXED_FILES_PATH, response).await?;
        match (body.files, body.error) {
            (Some(files), _) => Ok(files),
            (None, Some(error)) => Err(DispatchError::protocol(INDEXED_FILES_PATH, error)),
            (None, None) => Err(DispatchError::protocol(
                INDEXED_FILES_PATH,
                "response is missing the 'files' field",
            )),
        }
    }
}

#[derive(Deserialize)]
struct AnswerBody {
    answer: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct UploadBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct FilesBody {
    files: Option<Vec<IndexedFile>>,
    error: Option<String>,
}
