//! Conversion service client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::config::ConversionConfig;

use super::types::{ConversionError, UploadFile};

/// External PDF-to-document converter
#[async_trait]
pub trait ConversionService: Send + Sync {
    /// Convert one file, returning the raw JSON document
    async fn convert(&self, file: &UploadFile) -> Result<Value, ConversionError>;
}

/// Converter reached over HTTP with a single multipart upload
pub struct HttpConversionClient {
    client: reqwest::Client,
    endpoint: String,
    field_name: String,
}

impl HttpConversionClient {
    pub fn new(config: &ConversionConfig) -> Result<Self, ConversionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            field_name: config.field_name.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ConversionService for HttpConversionClient {
    async fn convert(&self, file: &UploadFile) -> Result<Value, ConversionError> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(declared) = &file.declared_type {
            part = part.mime_str(declared)?;
        }
        let form = Form::new().part(self.field_name.clone(), part);

        tracing::debug!(
            endpoint = %self.endpoint,
            file_name = %file.file_name,
            bytes = file.bytes.len(),
            "Sending paper for conversion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Conversion service rejected upload");
            return Err(ConversionError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ConversionError::Body(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};

    async fn spawn_converter(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/upload", addr)
    }

    fn client_for(endpoint: String) -> HttpConversionClient {
        HttpConversionClient::new(&ConversionConfig {
            endpoint,
            field_name: "file".to_string(),
            accepted_type: "application/pdf".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    /// Echoes the field name, file name and size back as a one-section document
    async fn echo_upload(mut multipart: Multipart) -> Json<Value> {
        let field = multipart.next_field().await.unwrap().unwrap();
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let size = field.bytes().await.unwrap().len();

        Json(serde_json::json!({
            "title": file_name,
            "sections": [{
                "id": name,
                "title": content_type,
                "level": 1,
                "content": [{"type": "text", "value": size.to_string()}]
            }]
        }))
    }

    #[tokio::test]
    async fn test_convert_sends_multipart_file() {
        let endpoint = spawn_converter(Router::new().route("/upload", post(echo_upload))).await;
        let client = client_for(endpoint);
        let file = UploadFile::new("paper.pdf", Some("application/pdf"), b"%PDF-1.7".to_vec());

        let value = client.convert(&file).await.unwrap();

        assert_eq!(value["title"], "paper.pdf");
        assert_eq!(value["sections"][0]["id"], "file");
        assert_eq!(value["sections"][0]["title"], "application/pdf");
        assert_eq!(value["sections"][0]["content"][0]["value"], "8");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let app = Router::new().route(
            "/upload",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = client_for(spawn_converter(app).await);
        let file = UploadFile::new("paper.pdf", None, vec![1, 2, 3]);

        let err = client.convert(&file).await.unwrap_err();
        assert!(matches!(err, ConversionError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/upload", addr));
        let file = UploadFile::new("paper.pdf", None, vec![]);

        assert!(matches!(
            client.convert(&file).await,
            Err(ConversionError::Transport(_))
        ));
    }
}
