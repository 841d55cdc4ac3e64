pub mod admin_service;
pub mod poll_service;
pub mod vote_service;

pub use admin_service::PollAdminService;
pub use poll_service::PollService;
pub use vote_service::{VoteOutcome, VoteService};
