pub mod admin_dto;
pub mod poll_dto;
pub mod vote_dto;

pub use admin_dto::{CreateChoiceDto, CreatePollDto, CreateQuestionDto};
pub use poll_dto::{
    ChoiceOptionDto, ChoiceResultDto, PollDetailDto, PollResultsDto, PollSummaryDto,
    QuestionDetailDto, QuestionResultsDto, WinningChoiceDto,
};
pub use vote_dto::{CastVoteDto, VoteForm, VoteResponseDto, VoteSelection, VoteStatus};
