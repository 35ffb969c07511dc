/// The one mutation this service makes to a session record.
///
/// A record moves from its externally-set pending state to exactly one of
/// these terminal outcomes per pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// Everything worked: content fields written, error state cleared.
    Succeeded {
        transcript: String,
        formatted_conversation: String,
        summary: String,
        doc_url: String,
        billed_seconds: u64,
    },
    /// The pipeline failed: error flag and message set, content fields left
    /// exactly as they were.
    Failed { message: String },
}
