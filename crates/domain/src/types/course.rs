//! Course, module, video and enrollment types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::UploadFile;
use crate::errors::{PortalError, Result};
use crate::impl_wire_enum_conversions;

/// Where the signed-in user stands with a course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[default]
    NotEnrolled,
    InProgress,
    Completed,
}

impl_wire_enum_conversions!(EnrollmentStatus {
    NotEnrolled => "NOT_ENROLLED",
    InProgress => "IN_PROGRESS",
    Completed => "COMPLETED",
});

impl EnrollmentStatus {
    /// Enrolled users may open the course content and track progress
    pub const fn is_enrolled(self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }
}

/// Catalog card shown in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub topic_name: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseVideo {
    pub id: i64,
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub watched: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub videos: Vec<CourseVideo>,
    #[serde(default)]
    pub order_index: Option<i32>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Full course as returned to authors and enrolled learners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Rich-text body, passed through untouched
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    #[serde(default)]
    pub enrollment_count: Option<u64>,
    #[serde(default, alias = "status")]
    pub enrollment_status: EnrollmentStatus,
    #[serde(default)]
    pub progress: f64,
}

impl Course {
    pub fn video_count(&self) -> usize {
        self.modules.iter().map(|module| module.videos.len()).sum()
    }

    /// Progress to display; completed courses always show 100
    pub fn display_progress(&self) -> f64 {
        if self.enrollment_status == EnrollmentStatus::Completed {
            100.0
        } else {
            self.progress.clamp(0.0, 100.0)
        }
    }
}

/// One page of the public catalog search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePage {
    pub courses: Vec<CourseSummary>,
    pub current_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl CoursePage {
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// A learner's enrollment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub course_id: i64,
    pub course_title: String,
    pub username: String,
    /// `dd/MM/yyyy HH:mm:ss` as formatted by the server
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl_wire_enum_conversions!(SortDirection {
    Asc => "asc",
    Desc => "desc",
});

/// Public catalog search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub keyword: String,
    pub topic_id: Option<i64>,
    /// 1-based page number
    pub page: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            topic_id: None,
            page: 1,
            sort_by: "createdAt".into(),
            sort_dir: SortDirection::Desc,
        }
    }
}

impl CatalogQuery {
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self.page = 1;
        self
    }

    #[must_use]
    pub fn topic(mut self, topic_id: i64) -> Self {
        self.topic_id = Some(topic_id);
        self.page = 1;
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    #[must_use]
    pub fn sort_dir(mut self, dir: SortDirection) -> Self {
        self.sort_dir = dir;
        self
    }

    /// Query-string pairs in the order the catalog page sends them
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("keyword", self.keyword.trim().to_string()),
            ("page", self.page.max(1).to_string()),
            ("sortBy", self.sort_by.clone()),
            ("sortDir", self.sort_dir.to_string()),
        ];
        if let Some(topic_id) = self.topic_id {
            pairs.push(("topicId", topic_id.to_string()));
        }
        pairs
    }
}

/// A video inside a module draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub video_url: String,
}

/// A module being authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub order_index: i32,
    #[serde(default)]
    pub videos: Vec<VideoDraft>,
}

/// Course create/update form
///
/// Sent as multipart form data; `modules` travels as one JSON string field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: Option<String>,
    pub topic_id: Option<i64>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub duration: Option<u32>,
    pub cover_image: Option<UploadFile>,
    pub modules: Vec<ModuleDraft>,
}

impl CourseDraft {
    /// Checks the authoring form applies before creating a course
    ///
    /// # Errors
    /// Returns `PortalError::InvalidInput` describing the first problem.
    pub fn validate_for_create(&self) -> Result<()> {
        for (name, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("content", &self.content),
        ] {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                return Err(PortalError::InvalidInput(format!("{name} is required")));
            }
        }
        if self.topic_id.is_none() {
            return Err(PortalError::InvalidInput("topicId is required".into()));
        }
        self.validate_for_update()
    }

    /// Checks that apply to partial updates as well
    ///
    /// # Errors
    /// Returns `PortalError::InvalidInput` describing the first problem.
    pub fn validate_for_update(&self) -> Result<()> {
        if self.duration == Some(0) {
            return Err(PortalError::InvalidInput("duration must be greater than 0".into()));
        }
        for (index, module) in self.modules.iter().enumerate() {
            if module.title.trim().is_empty() {
                return Err(PortalError::InvalidInput(format!(
                    "module {} needs a title",
                    index + 1
                )));
            }
            for video in &module.videos {
                if video.title.trim().is_empty() || video.video_url.trim().is_empty() {
                    return Err(PortalError::InvalidInput(format!(
                        "every video in module '{}' needs a title and a URL",
                        module.title
                    )));
                }
            }
        }
        Ok(())
    }

    /// Text fields that are set, in submission order
    ///
    /// # Errors
    /// Returns `PortalError::Serialization` if the module list cannot be
    /// encoded.
    pub fn text_fields(&self) -> Result<Vec<(&'static str, String)>> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title", title.clone()));
        }
        if let Some(topic_id) = self.topic_id {
            fields.push(("topicId", topic_id.to_string()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(content) = &self.content {
            fields.push(("content", content.clone()));
        }
        if let Some(duration) = self.duration {
            fields.push(("duration", duration.to_string()));
        }
        fields.push(("modules", serde_json::to_string(&self.modules)?));
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> CourseDraft {
        CourseDraft {
            title: Some("Rust for web developers".into()),
            topic_id: Some(4),
            description: Some("From JS to Rust".into()),
            content: Some("<p>Welcome</p>".into()),
            duration: Some(12),
            cover_image: None,
            modules: vec![ModuleDraft {
                id: None,
                title: "Ownership".into(),
                order_index: 0,
                videos: vec![VideoDraft {
                    id: None,
                    title: "Moves".into(),
                    video_url: "https://videos.example/moves".into(),
                }],
            }],
        }
    }

    #[test]
    fn public_detail_status_alias_maps_to_enrollment_status() {
        let course: Course = serde_json::from_str(
            r#"{"id": 9, "title": "Intro", "status": "IN_PROGRESS", "progress": 42.5}"#,
        )
        .unwrap();
        assert_eq!(course.enrollment_status, EnrollmentStatus::InProgress);
        assert!(course.enrollment_status.is_enrolled());
        assert!((course.display_progress() - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn completed_course_displays_full_progress() {
        let course: Course = serde_json::from_str(
            r#"{"id": 9, "title": "Intro", "enrollmentStatus": "COMPLETED", "progress": 99.0}"#,
        )
        .unwrap();
        assert!((course.display_progress() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn decodes_iso_timestamps_and_nested_videos() {
        let course: Course = serde_json::from_str(
            r#"{
                "id": 1, "title": "Intro",
                "createdAt": "2024-05-01T10:00:00.123456",
                "modules": [{"id": 2, "title": "M1", "orderIndex": 0,
                             "videos": [{"id": 3, "title": "V1", "videoUrl": "u"}]}]
            }"#,
        )
        .unwrap();
        assert!(course.created_at.is_some());
        assert_eq!(course.video_count(), 1);
        assert_eq!(course.enrollment_status, EnrollmentStatus::NotEnrolled);
    }

    #[test]
    fn catalog_query_resets_page_on_new_search() {
        let query = CatalogQuery::default().page(3).keyword("rust");
        assert_eq!(query.page, 1);

        let pairs = query.topic(2).page(2).to_pairs();
        assert!(pairs.contains(&("keyword", "rust".to_string())));
        assert!(pairs.contains(&("page", "2".to_string())));
        assert!(pairs.contains(&("sortDir", "desc".to_string())));
        assert!(pairs.contains(&("topicId", "2".to_string())));
    }

    #[test]
    fn page_zero_is_clamped() {
        assert_eq!(CatalogQuery::default().page(0).page, 1);
    }

    #[test]
    fn course_page_navigation() {
        let page = CoursePage { courses: vec![], current_page: 1, total_items: 13, total_pages: 3 };
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn create_validation_requires_core_fields() {
        assert!(complete_draft().validate_for_create().is_ok());

        let mut draft = complete_draft();
        draft.topic_id = None;
        assert!(matches!(
            draft.validate_for_create(),
            Err(PortalError::InvalidInput(m)) if m.contains("topicId")
        ));

        let mut draft = complete_draft();
        draft.content = Some("   ".into());
        assert!(draft.validate_for_create().is_err());
    }

    #[test]
    fn update_validation_checks_nested_videos() {
        let mut draft = CourseDraft::default();
        assert!(draft.validate_for_update().is_ok());

        draft.modules = complete_draft().modules;
        draft.modules[0].videos[0].video_url = String::new();
        assert!(draft.validate_for_update().is_err());
    }

    #[test]
    fn modules_are_sent_as_json_string() {
        let fields = complete_draft().text_fields().unwrap();
        let (_, modules) = fields.iter().find(|(name, _)| *name == "modules").unwrap();
        let decoded: Vec<ModuleDraft> = serde_json::from_str(modules).unwrap();
        assert_eq!(decoded[0].videos[0].title, "Moves");
        assert!(modules.contains("videoUrl"));
    }

    #[test]
    fn enrollment_status_wire_names() {
        assert_eq!(EnrollmentStatus::NotEnrolled.to_string(), "NOT_ENROLLED");
        assert_eq!("completed".parse::<EnrollmentStatus>(), Ok(EnrollmentStatus::Completed));
    }
}
