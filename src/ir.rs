use serde::Serialize;

/// One answer choice as it appeared in the document.
///
/// `letter` is the lower-cased marker letter; `text` keeps the whole line,
/// marker included, exactly as written.
#[derive(Clone, Debug, Serialize)]
pub struct AnswerOption {
    pub letter: char,
    pub text: String,
}

/// One extracted question with its ordered options and correct-letter set.
#[derive(Clone, Debug, Default, Serialize)]
pub struct QuestionBlock {
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub correct_letters: Vec<char>,
}

impl QuestionBlock {
    /// Correctness is by letter identity, not option position. Both sides are
    /// already lower-cased when stored.
    pub fn is_correct(&self, letter: char) -> bool {
        self.correct_letters.contains(&letter)
    }

    pub fn is_multiple(&self) -> bool {
        self.correct_letters.len() > 1
    }
}
