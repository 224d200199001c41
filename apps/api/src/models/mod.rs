pub mod job;
pub mod notice;

pub use job::{EnrichedJob, JobType, MatchTier, RawMatch};
pub use notice::{Notice, NoticeVariant};
