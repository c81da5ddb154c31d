use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A course row as read from the catalog. Records ingested by the external
/// sync process carry a class code; `status = "planning"` records do not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub class_code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A numeric vector produced by the external embedding endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    pub embedding: Vec<f32>,
    pub embedding_dim: i32,
}

/// The mutable fields an admin edits through the planning form. Blank form
/// inputs arrive as `None` and are written as explicit nulls.
#[derive(Debug, Clone, Default)]
pub struct CourseDraft {
    pub title: String,
    pub campus: Option<String>,
    pub instructor: Option<String>,
    pub start_date: Option<String>,
    pub audience: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
}

/// Insert payload for a manually created planning record.
#[derive(Debug, Clone, Serialize)]
pub struct CourseInsert {
    pub id: String,
    pub source: String,
    pub status: String,
    pub title: String,
    pub campus: Option<String>,
    pub instructor: Option<String>,
    pub start_date: Option<String>,
    pub audience: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub content_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_dim: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

/// Update payload for an existing planning record. Embedding fields are only
/// sent when the enrichment call produced one; everything else is written
/// as-is, nulls included.
#[derive(Debug, Clone, Serialize)]
pub struct CourseUpdate {
    pub title: String,
    pub campus: Option<String>,
    pub instructor: Option<String>,
    pub start_date: Option<String>,
    pub audience: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_dim: Option<i32>,
    pub updated_at: String,
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl CourseInsert {
    pub fn manual(draft: CourseDraft, embedding: Option<Embedding>) -> Self {
        let now = now_iso();
        let (vector, dim) = split_embedding(embedding);
        Self {
            id: format!("manual:{}", uuid::Uuid::new_v4().simple()),
            source: "manual".to_string(),
            status: "planning".to_string(),
            title: draft.title,
            campus: draft.campus,
            instructor: draft.instructor,
            start_date: draft.start_date,
            audience: draft.audience,
            level: draft.level,
            description: draft.description,
            content_hash: format!("manual-{}", now),
            embedding: vector,
            embedding_dim: dim,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl CourseUpdate {
    pub fn from_draft(draft: CourseDraft, embedding: Option<Embedding>) -> Self {
        let (vector, dim) = split_embedding(embedding);
        Self {
            title: draft.title,
            campus: draft.campus,
            instructor: draft.instructor,
            start_date: draft.start_date,
            audience: draft.audience,
            level: draft.level,
            description: draft.description,
            embedding: vector,
            embedding_dim: dim,
            updated_at: now_iso(),
        }
    }
}

fn split_embedding(embedding: Option<Embedding>) -> (Option<Vec<f32>>, Option<i32>) {
    match embedding {
        Some(e) => (Some(e.embedding), Some(e.embedding_dim)),
        None => (None, None),
    }
}

/// Formats a stored RFC 3339 timestamp for table display; unparseable values
/// pass through untouched.
pub fn display_timestamp(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_insert_sets_planning_defaults() {
        let draft = CourseDraft {
            title: "Intro to Pottery".to_string(),
            campus: Some("North".to_string()),
            ..Default::default()
        };
        let insert = CourseInsert::manual(draft, None);

        assert!(insert.id.starts_with("manual:"));
        assert_eq!(insert.source, "manual");
        assert_eq!(insert.status, "planning");
        assert!(insert.content_hash.starts_with("manual-"));
        assert_eq!(insert.created_at, insert.updated_at);
        assert!(insert.embedding.is_none());
    }

    #[test]
    fn embedding_fields_omitted_when_absent() {
        let insert = CourseInsert::manual(
            CourseDraft {
                title: "A".to_string(),
                ..Default::default()
            },
            None,
        );
        let json = serde_json::to_value(&insert).unwrap();

        assert!(json.get("embedding").is_none());
        assert!(json.get("embedding_dim").is_none());
        // Blank optional fields are written as explicit nulls.
        assert!(json.get("campus").unwrap().is_null());
    }

    #[test]
    fn embedding_fields_present_when_obtained() {
        let update = CourseUpdate::from_draft(
            CourseDraft {
                title: "A".to_string(),
                ..Default::default()
            },
            Some(Embedding {
                embedding: vec![0.1, 0.2],
                embedding_dim: 2,
            }),
        );
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["embedding_dim"], 2);
        assert_eq!(json["embedding"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn display_timestamp_handles_bad_input() {
        assert_eq!(display_timestamp("not-a-date"), "not-a-date");
        assert_eq!(
            display_timestamp("2026-03-01T09:30:00Z"),
            "2026-03-01 09:30"
        );
    }
}
