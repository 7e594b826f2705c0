/// kbase system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text of the answer returned when nothing met the minimum confidence.
pub const NO_RESULTS_MESSAGE: &str =
    "I couldn't find relevant information in the knowledge base. Could you rephrase your question?";

/// Text of the degraded answer sent while the embedding model is not ready.
pub const WARMING_UP_MESSAGE: &str =
    "The assistant is still warming up. Please try your question again in a moment.";

/// Maximum question length accepted from a session, in bytes.
pub const MAX_QUESTION_BYTES: usize = 4096;

/// Longest inbound line a byte-stream transport buffers. Leaves room for
/// JSON framing and escapes around a maximum-size question.
pub const MAX_FRAME_BYTES: usize = 2 * MAX_QUESTION_BYTES;

/// Wire `type` values for outbound frames.
pub const FRAME_TYPE_ASSISTANT: &str = "assistant";
pub const FRAME_TYPE_ERROR: &str = "error";
pub const FRAME_TYPE_HEARTBEAT: &str = "heartbeat";
