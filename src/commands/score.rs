//! One-shot scoring command

use crate::core::{GuessOutcome, Word, WordError, score};

/// A guess scored against an explicit target
pub struct ScoreReport {
    pub guess: Word,
    pub target: Word,
    pub outcome: GuessOutcome,
}

/// Score `guess` against `target` without starting a game
///
/// # Errors
///
/// Returns an error if either word is not five ASCII letters.
pub fn score_words(guess: &str, target: &str) -> Result<ScoreReport, WordError> {
    let guess = Word::new(guess)?;
    let target = Word::new(target)?;
    let outcome = score(&guess, &target);

    Ok(ScoreReport {
        guess,
        target,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterStatus;

    #[test]
    fn scores_mixed_case_input() {
        let report = score_words("Could", "cLoUd").unwrap();
        assert_eq!(report.guess.text(), "COULD");
        assert_eq!(report.target.text(), "CLOUD");

        let statuses: Vec<_> = report.outcome.results().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [
                LetterStatus::Correct,
                LetterStatus::Present,
                LetterStatus::Present,
                LetterStatus::Present,
                LetterStatus::Correct,
            ]
        );
        assert!(!report.outcome.is_correct());
    }

    #[test]
    fn rejects_bad_target() {
        assert_eq!(
            score_words("cloud", "clouds").err(),
            Some(WordError::InvalidLength(6))
        );
    }

    #[test]
    fn rejects_bad_guess() {
        assert_eq!(
            score_words("cl0ud", "cloud").err(),
            Some(WordError::InvalidCharacters)
        );
    }
}
