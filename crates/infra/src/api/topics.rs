//! Topic endpoints
//!
//! The admin topic routes answer without an envelope, so every call here
//! states its shape explicitly rather than relying on the route table.

use std::sync::Arc;

use courseportal_domain::{Topic, TopicDraft};
use reqwest::Method;
use serde_json::Value;
use tracing::{info, instrument};

use super::client::{ApiClient, RequestBody, RequestOptions};
use super::errors::ApiError;

pub struct TopicApi {
    client: Arc<ApiClient>,
}

impl TopicApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Every topic, for pickers and catalog filters
    pub async fn all(&self) -> Result<Vec<Topic>, ApiError> {
        self.client
            .request(Method::GET, "/topics", RequestBody::Empty, RequestOptions::raw())
            .await
    }

    /// Topics created by the calling staff member
    pub async fn mine(&self) -> Result<Vec<Topic>, ApiError> {
        self.client.get("/staff/topics").await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: &TopicDraft) -> Result<Topic, ApiError> {
        draft.validate()?;
        let topic: Topic = self
            .client
            .request(Method::POST, "/admin/topic", RequestBody::json(draft)?, RequestOptions::raw())
            .await?;

        info!(topic_id = topic.id, "topic created");
        Ok(topic)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update(&self, topic_id: i64, draft: &TopicDraft) -> Result<Topic, ApiError> {
        draft.validate()?;
        self.client
            .request(
                Method::PATCH,
                &format!("/admin/topic/{topic_id}"),
                RequestBody::json(draft)?,
                RequestOptions::raw(),
            )
            .await
    }

    /// Soft-delete; the server's acknowledgement body is discarded
    #[instrument(skip(self))]
    pub async fn delete(&self, topic_id: i64) -> Result<(), ApiError> {
        let _ack: Value = self
            .client
            .request(
                Method::PATCH,
                &format!("/admin/topic/delete/{topic_id}"),
                RequestBody::Empty,
                RequestOptions::raw(),
            )
            .await?;
        Ok(())
    }
}
