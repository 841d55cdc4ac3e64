pub mod choice;
pub mod poll;
pub mod question;

pub use choice::{winning_choice, Choice};
pub use poll::{NewChoice, NewPoll, NewQuestion, Poll, PollWithChoices};
pub use question::Question;
