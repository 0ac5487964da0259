//! User-visible notices.

pub mod notice;

pub use notice::{NOTICE_DURATION, Notice, NoticeKind, NoticeQueue};
