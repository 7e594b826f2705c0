// Single source of truth for all default values.

// --- Index ---
pub const DEFAULT_INDEX_DIMENSIONS: usize = 384;
pub const DEFAULT_METRIC: &str = "cosine";

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashing";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_L1_IDLE_SECS: u64 = 3_600; // 1 hour

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.1;
pub const DEFAULT_HIGH_THRESHOLD: f64 = 0.3;
pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 0.1;
pub const DEFAULT_ANSWER_CACHE_SIZE: u64 = 1_024;
pub const DEFAULT_ANSWER_CACHE_TTL_SECS: u64 = 600; // 10 minutes

// --- Compose ---
pub const DEFAULT_SAMPLE_SIZE: usize = 5;
pub const DEFAULT_RELATED_LIMIT: usize = 3;

// --- Session ---
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_HEARTBEAT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hello! I'm your data model assistant. Ask me about \
entities, attributes, business rules, or relationships in your knowledge base!";
pub const DEFAULT_MAX_PENDING_FRAMES: usize = 16;

// --- Server ---
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8765";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
