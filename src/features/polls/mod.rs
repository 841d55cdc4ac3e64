//! Polls: listing, voting and results.
//!
//! Each poll owns exactly one question with a handful of choices. Votes are
//! accepted up to and including the expiry date; after that the poll is closed
//! and the listing shows its winning choice.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/` | No | Poll listing page |
//! | GET | `/{poll_id}/` | No | Question and vote form |
//! | ANY | `/{poll_id}/vote/` | No | Cast a vote (POST); other methods redirect |
//! | GET | `/{poll_id}/results/` | No | Results page |
//! | GET | `/api/polls` | No | List polls |
//! | GET | `/api/polls/{id}` | No | Poll detail |
//! | GET | `/api/polls/{id}/results` | No | Poll results |
//! | POST | `/api/polls/{id}/votes` | No | Cast a vote |
//! | GET, POST | `/api/admin/polls` | Basic | List or create polls |
//! | GET, DELETE | `/api/admin/polls/{id}` | Basic | Inspect or delete a poll |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod routes;
pub mod services;
pub mod store;

pub use services::{PollAdminService, PollService, VoteService};
pub use store::{MemoryPollStore, PgPollStore, PollStore};
