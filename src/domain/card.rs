use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a card, unique across the whole board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Generates a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority badge shown on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl fmt::Display for CardPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for CardPriority {
    type Err = crate::error::MemosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(crate::error::MemosError::InvalidPriority(s.to_string())),
        }
    }
}

/// A comment left on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardComment {
    pub id: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CardComment {
    pub fn new(author: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            author,
            avatar: None,
            content,
            created_at: Utc::now(),
        }
    }
}

/// A kanban card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CardComment>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<CardPriority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a new incomplete card with a generated id
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(CardId::generate(), title)
    }

    /// Creates a new incomplete card with the given id
    pub fn with_id(id: impl Into<CardId>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            snippet: None,
            comments: Vec::new(),
            completed: false,
            deadline: None,
            assigned_to: Vec::new(),
            priority: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: CardPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assigned_to = assignees.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.updated_at = Utc::now();
    }

    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.updated_at = Utc::now();
    }

    pub fn toggle_complete(&mut self) {
        if self.completed {
            self.mark_incomplete();
        } else {
            self.mark_completed();
        }
    }

    /// Appends a comment. Blank content is ignored and returns `None`.
    pub fn add_comment(&mut self, author: String, content: String) -> Option<&CardComment> {
        if content.trim().is_empty() {
            return None;
        }
        self.comments.push(CardComment::new(author, content));
        self.updated_at = Utc::now();
        self.comments.last()
    }

    /// Merges the fields present in `patch` into this card
    pub fn apply(&mut self, patch: CardPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(snippet) = patch.snippet {
            self.snippet = snippet;
        }
        if let Some(comments) = patch.comments {
            self.comments = comments;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }

    /// Encodes the card as the payload carried by a pointer drag
    pub fn to_transfer_data(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a card from a pointer drag payload
    pub fn from_transfer_data(data: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// A partial update for a card.
///
/// Each `Some` field replaces the card's value. For optional card fields the
/// inner `Option` allows clearing, e.g. `description: Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub snippet: Option<Option<String>>,
    pub comments: Option<Vec<CardComment>>,
    pub completed: Option<bool>,
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub assigned_to: Option<Vec<String>>,
    pub priority: Option<Option<CardPriority>>,
    pub tags: Option<Vec<String>>,
}

impl CardPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn snippet(mut self, snippet: Option<String>) -> Self {
        self.snippet = Some(snippet);
        self
    }

    pub fn comments(mut self, comments: Vec<CardComment>) -> Self {
        self.comments = Some(comments);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn assigned_to(mut self, assigned_to: Vec<String>) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    pub fn priority(mut self, priority: Option<CardPriority>) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
