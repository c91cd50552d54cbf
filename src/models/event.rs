use chrono::{DateTime, Utc};

/// Classification of one decoded session record.
///
/// Produced by [`crate::parsers::classify`]; `Unknown` is a valid terminal
/// classification for shapes the exporter does not understand, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Message,
    Reasoning,
    ToolCall,
    ToolOutput,
    Meta,
    Unknown,
}

/// Who produced an event. Roles outside the known set map to `Other` and
/// render with a fallback label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    User,
    Assistant,
    System,
    Tool,
    Other,
}

impl Actor {
    pub fn from_role(role: &str) -> Self {
        match role {
            "user" => Actor::User,
            "assistant" => Actor::Assistant,
            "system" => Actor::System,
            "tool" => Actor::Tool,
            _ => Actor::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Actor::User => "User",
            Actor::Assistant => "Assistant",
            Actor::System => "System",
            Actor::Tool => "Tool",
            Actor::Other => "Unknown",
        }
    }
}

/// Textual content of an event.
///
/// `Opaque` marks content that exists in the source but cannot be decrypted
/// or displayed; it renders as a fixed placeholder, never as an empty block.
#[derive(Debug, Clone, PartialEq)]
pub enum EventBody {
    Text(String),
    /// Reasoning summaries are multi-part in the source format.
    Reasoning(Vec<String>),
    Tool {
        name: Option<String>,
        payload: Option<String>,
    },
    Opaque,
}

/// One normalized unit of the conversation model.
///
/// The sequence `index` is assigned in source order and is the sole ordering
/// key; timestamps are supplementary display data only.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    pub kind: RecordKind,
    pub index: usize,
    pub actor: Actor,
    pub timestamp: Option<DateTime<Utc>>,
    pub line_num: usize,
    pub body: EventBody,
}
