use sqlx::FromRow;

/// Database model for choice
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i32,
}

/// The choice with the most votes; ties go to the lowest choice id.
pub fn winning_choice(choices: &[Choice]) -> Option<&Choice> {
    choices
        .iter()
        .max_by(|a, b| a.votes.cmp(&b.votes).then_with(|| b.id.cmp(&a.id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(id: i64, votes: i32) -> Choice {
        Choice {
            id,
            question_id: 1,
            choice_text: format!("Choice {}", id),
            votes,
        }
    }

    #[test]
    fn test_winning_choice_picks_most_votes() {
        let choices = vec![choice(1, 2), choice(2, 7), choice(3, 4)];
        assert_eq!(winning_choice(&choices).map(|c| c.id), Some(2));
    }

    #[test]
    fn test_winning_choice_tie_goes_to_lowest_id() {
        let choices = vec![choice(5, 3), choice(2, 3), choice(9, 1)];
        assert_eq!(winning_choice(&choices).map(|c| c.id), Some(2));

        let untouched = vec![choice(4, 0), choice(3, 0)];
        assert_eq!(winning_choice(&untouched).map(|c| c.id), Some(3));
    }

    #[test]
    fn test_winning_choice_empty() {
        assert!(winning_choice(&[]).is_none());
    }
}
