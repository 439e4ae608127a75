/// Hours a user may go without posting before the streak check considers
/// them due for a backup post
pub const DUE_AFTER_HOURS: i64 = 24;

/// Sentinel hours-since-last-post for users who have never posted.
/// Large enough to always clear the due threshold.
pub const NEVER_POSTED_HOURS: i64 = 999;

/// Maximum unused backup posts a FREE-plan user may hold.
/// Enforced by the content-creation path; the job only consumes.
pub const FREE_PLAN_UNUSED_LIMIT: usize = 5;

/// Maximum length of backup post content in characters
pub const MAX_POST_CONTENT_CHARS: usize = 280;
