pub mod api_key;
pub mod realtime_client;

pub use api_key::{ApiKeyCache, ApiKeyError};
pub use realtime_client::{OpenAiRealtimeClient, RealtimeSessions, UpstreamError, UpstreamReply};
