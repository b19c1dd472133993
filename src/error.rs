use thiserror::Error;

/// Errors raised while resolving catalog metadata or compiling patterns
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown struct: {struct_name}")]
    UnknownStruct { struct_name: String },

    #[error("struct {struct_name} has no allowed events")]
    NoAllowedEvents { struct_name: String },

    #[error("event \"{event}\" not allowed for {struct_name} (allowed: {allowed:?})")]
    EventNotAllowed {
        event: String,
        struct_name: String,
        allowed: Vec<String>,
    },

    #[error("key alias \"{key}\" missing from exported log keys")]
    MissingKeyAlias { key: String },

    #[error("no structs found with fixed source = {source_value}")]
    UnknownSource { source_value: String },

    #[error(
        "event \"{event}\" is not allowed for source {source_value} (candidates: {candidates:?})"
    )]
    EventNotAllowedForSource {
        event: String,
        source_value: String,
        candidates: Vec<String>,
    },
}
