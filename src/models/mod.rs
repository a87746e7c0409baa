pub mod hook;
pub mod message;
pub mod snapshot;

pub use hook::HookJson;
pub use message::{MessageUsage, Timestamp, TranscriptLine};
pub use snapshot::UsageSnapshot;
