use crate::ir::{AnswerOption, QuestionBlock};
use crate::textutil::{
    collected_letter, is_answer_key_line, key_letters, leading_letter, starts_with_option_dot,
    starts_with_option_paren,
};

/// Extractor states. `CollectingCorrectLetters` means an answer-key line with
/// no inline letters was seen, so lines shaped like options declare correct
/// letters instead of scoring as answer options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ScanningQuestion,
    CollectingOptions,
    CollectingCorrectLetters,
}

/// Line-oriented state machine that rebuilds question blocks from the
/// normalized line sequence. Rules are applied to each line in precedence
/// order: answer-key line, correct-letter collection, answer option, question
/// text. A block is finalized when question text arrives while options are
/// being collected, or at end of input.
pub struct Extractor {
    state: State,
    question_lines: Vec<String>,
    options: Vec<AnswerOption>,
    correct_letters: Vec<char>,
    blocks: Vec<QuestionBlock>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            state: State::ScanningQuestion,
            question_lines: Vec::new(),
            options: Vec::new(),
            correct_letters: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if is_answer_key_line(line) {
            self.on_answer_key(line);
            return;
        }

        if self.state == State::CollectingCorrectLetters {
            if let Some(letter) = collected_letter(line) {
                self.push_correct(letter);
                return;
            }
            // Declarations ended; the line falls through to the option and
            // question-text rules.
            self.state = self.state_for_accumulators();
        }

        if starts_with_option_paren(line) || starts_with_option_dot(line) {
            self.push_option(line);
            return;
        }

        self.on_question_text(line);
    }

    pub fn finish(mut self) -> Vec<QuestionBlock> {
        if !self.question_lines.is_empty() {
            self.finalize_block();
        }
        self.blocks
    }

    fn on_answer_key(&mut self, line: &str) {
        self.correct_letters.clear();
        match line.split_once(':') {
            Some((_, tail)) if !tail.trim().is_empty() => {
                for letter in key_letters(tail) {
                    self.push_correct(letter);
                }
                self.state = self.state_for_accumulators();
            }
            _ => {
                // Letters follow on their own lines.
                self.state = State::CollectingCorrectLetters;
            }
        }
    }

    fn on_question_text(&mut self, line: &str) {
        if self.state == State::CollectingOptions {
            // Text after options means the previous question is complete and
            // this line opens the next one.
            self.finalize_block();
        }
        self.question_lines.push(line.to_string());
    }

    fn push_option(&mut self, line: &str) {
        // The marker regexes guarantee a leading letter here.
        if let Some(letter) = leading_letter(line) {
            self.options.push(AnswerOption {
                letter,
                text: line.to_string(),
            });
            self.state = State::CollectingOptions;
        }
    }

    fn push_correct(&mut self, letter: char) {
        if !self.correct_letters.contains(&letter) {
            self.correct_letters.push(letter);
        }
    }

    fn state_for_accumulators(&self) -> State {
        if self.options.is_empty() {
            State::ScanningQuestion
        } else {
            State::CollectingOptions
        }
    }

    fn finalize_block(&mut self) {
        let text = self.question_lines.join(" ").trim().to_string();
        self.blocks.push(QuestionBlock {
            text,
            options: std::mem::take(&mut self.options),
            correct_letters: std::mem::take(&mut self.correct_letters),
        });
        self.question_lines.clear();
        self.state = State::ScanningQuestion;
    }
}

/// Convenience wrapper: run the whole line sequence through a fresh extractor.
pub fn extract_blocks(lines: &[String]) -> Vec<QuestionBlock> {
    let mut ex = Extractor::new();
    for line in lines {
        ex.push_line(line);
    }
    ex.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(lines: &[&str]) -> Vec<QuestionBlock> {
        extract_blocks(&lines.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn options_keep_their_input_order() {
        let blocks = extract(&["Q?", "b) second letter first", "a) then a", "c) last"]);
        assert_eq!(blocks.len(), 1);
        let letters: Vec<char> = blocks[0].options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec!['b', 'a', 'c']);
        assert_eq!(blocks[0].options[0].text, "b) second letter first");
    }

    #[test]
    fn inline_answer_key_parses_paren_letters() {
        let blocks = extract(&["Q?", "a) one", "b) two", "c) three", "Ответ: b) , c)"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].correct_letters, vec!['b', 'c']);
        assert!(blocks[0].is_multiple());
    }

    #[test]
    fn inline_answer_key_falls_back_to_bare_letters() {
        let blocks = extract(&["Q?", "a) one", "b) two", "Жауабы: b"]);
        assert_eq!(blocks[0].correct_letters, vec!['b']);
        assert!(!blocks[0].is_multiple());
    }

    #[test]
    fn correctness_is_case_insensitive_by_letter_identity() {
        let blocks = extract(&["Q?", "C) upper option", "d) lower option", "Ответ: c"]);
        let block = &blocks[0];
        assert_eq!(block.options[0].letter, 'c');
        assert!(block.is_correct(block.options[0].letter));
        assert!(!block.is_correct(block.options[1].letter));
    }

    #[test]
    fn bare_key_line_collects_letters_from_following_lines() {
        let blocks = extract(&[
            "Q one?",
            "a) one",
            "b) two",
            "Жауап:",
            "a) one",
            "b) two",
            "What is next question",
            "a) next option",
        ]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].correct_letters, vec!['a', 'b']);
        assert_eq!(blocks[0].options.len(), 2);
        assert_eq!(blocks[1].text, "What is next question");
        assert_eq!(blocks[1].options.len(), 1);
        assert!(blocks[1].correct_letters.is_empty());
    }

    #[test]
    fn bare_key_line_replaces_previously_parsed_letters() {
        let blocks = extract(&["Q?", "a) one", "Ответ: a)", "Жауап:", "b) two"]);
        assert_eq!(blocks[0].correct_letters, vec!['b']);
    }

    #[test]
    fn text_after_options_starts_a_new_block() {
        let blocks = extract(&[
            "First line of question",
            "second line of question",
            "a) one",
            "b) two",
            "Second question?",
            "a) yes",
        ]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "First line of question second line of question");
        assert_eq!(blocks[1].text, "Second question?");
    }

    #[test]
    fn dot_marker_is_latin_only() {
        let blocks = extract(&["Q?", "A. latin dot", "Б. cyrillic dot", "a) paren"]);
        // The Cyrillic dot line is not an option, so it closes the first block
        // and opens a second question.
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "Q?");
        let letters: Vec<char> = blocks[0].options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec!['a']);
        assert_eq!(blocks[1].text, "Б. cyrillic dot");
        assert_eq!(blocks[1].options.len(), 1);
    }

    #[test]
    fn zero_option_text_still_forms_a_block() {
        let blocks = extract(&["Just a stray paragraph", "and another line"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Just a stray paragraph and another line");
        assert!(blocks[0].options.is_empty());
        assert!(!blocks[0].is_multiple());
    }

    #[test]
    fn unmatched_correct_letters_are_inert() {
        let blocks = extract(&["Q?", "a) one", "Ответ: z)"]);
        assert_eq!(blocks[0].correct_letters, vec!['z']);
        assert!(!blocks[0].is_correct('a'));
    }

    #[test]
    fn duplicate_correct_letters_collapse() {
        let blocks = extract(&["Q?", "a) one", "Ответ: a) a)"]);
        assert_eq!(blocks[0].correct_letters, vec!['a']);
        assert!(!blocks[0].is_multiple());
    }

    #[test]
    fn trailing_options_without_question_text_are_dropped() {
        let blocks = extract(&["a) homeless option", "b) another"]);
        assert!(blocks.is_empty());
    }
}
