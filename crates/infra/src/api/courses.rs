//! Course catalog, enrollment and authoring endpoints

use std::sync::Arc;

use courseportal_domain::{CatalogQuery, Course, CourseDraft, CoursePage, CourseSummary, Enrollment};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::client::{ApiClient, RequestBody, RequestOptions};
use super::errors::ApiError;
use super::multipart::{attach_file, text_form};

/// Course operations for learners, staff and anonymous visitors
pub struct CourseApi {
    client: Arc<ApiClient>,
}

impl CourseApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    // === Public catalog ===

    /// One page of the public catalog
    ///
    /// The catalog answers without an envelope.
    #[instrument(skip(self), fields(page = query.page))]
    pub async fn catalog(&self, query: &CatalogQuery) -> Result<CoursePage, ApiError> {
        let options = RequestOptions::raw().query(query.to_pairs());
        let page: CoursePage =
            self.client.request(Method::GET, "/public/courses", RequestBody::Empty, options).await?;

        debug!(count = page.courses.len(), total = page.total_items, "catalog page loaded");
        Ok(page)
    }

    pub async fn latest(&self) -> Result<Vec<CourseSummary>, ApiError> {
        self.client.get("/public/courses/latest").await
    }

    #[instrument(skip(self))]
    pub async fn public_detail(&self, course_id: i64) -> Result<Course, ApiError> {
        self.client.get(&format!("/public/course/{course_id}")).await
    }

    /// Completion certificate; the payload is passed through untouched
    #[instrument(skip(self))]
    pub async fn certificate(&self, course_id: i64, user_id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/public/course/{course_id}/cert/{user_id}")).await
    }

    // === Learner ===

    /// Course with the caller's progress and watched flags
    #[instrument(skip(self))]
    pub async fn detail(&self, course_id: i64) -> Result<Course, ApiError> {
        self.client.get(&format!("/courses/detail/{course_id}")).await
    }

    #[instrument(skip(self))]
    pub async fn enroll(&self, course_id: i64) -> Result<Enrollment, ApiError> {
        self.client
            .request(
                Method::POST,
                &format!("/courses/{course_id}/enroll"),
                RequestBody::Json(json!({})),
                RequestOptions::new().accept_status(StatusCode::CREATED.as_u16()),
            )
            .await
    }

    pub async fn enrolled(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.client.get("/courses/enrolled").await
    }

    #[instrument(skip(self))]
    pub async fn mark_video_watched(&self, video_id: i64, watched: bool) -> Result<(), ApiError> {
        let options = RequestOptions::new().query([("watched", watched.to_string())]);
        self.client
            .request(
                Method::POST,
                &format!("/courses/videos/watched/{video_id}"),
                RequestBody::Empty,
                options,
            )
            .await
    }

    // === Staff authoring ===

    /// Courses authored by the caller
    pub async fn my_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.client.get("/courses/my").await
    }

    /// Same list through the staff area
    pub async fn created_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.client.get("/staff/courses").await
    }

    pub async fn staff_course(&self, course_id: i64) -> Result<Course, ApiError> {
        self.client.get(&format!("/staff/course/{course_id}")).await
    }

    /// Create a course from a complete draft
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] before any request if the draft is
    /// incomplete.
    #[instrument(skip(self, draft), fields(modules = draft.modules.len()))]
    pub async fn create(&self, draft: &CourseDraft) -> Result<Course, ApiError> {
        draft.validate_for_create()?;
        let form = Self::draft_form(draft)?;

        self.client
            .request(
                Method::POST,
                "/courses",
                RequestBody::Multipart(form),
                RequestOptions::new().accept_status(StatusCode::CREATED.as_u16()),
            )
            .await
    }

    /// Patch a course; unset draft fields are left unchanged
    #[instrument(skip(self, draft), fields(modules = draft.modules.len()))]
    pub async fn update(&self, course_id: i64, draft: &CourseDraft) -> Result<Course, ApiError> {
        draft.validate_for_update()?;
        let form = Self::draft_form(draft)?;

        self.client.patch_multipart(&format!("/courses/{course_id}"), form).await
    }

    /// Soft-delete a course
    #[instrument(skip(self))]
    pub async fn delete(&self, course_id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/courses/{course_id}")).await
    }

    fn draft_form(draft: &CourseDraft) -> Result<reqwest::multipart::Form, ApiError> {
        let form = text_form(draft.text_fields()?);
        match &draft.cover_image {
            Some(cover) => attach_file(form, "coverImage", cover),
            None => Ok(form),
        }
    }
}
