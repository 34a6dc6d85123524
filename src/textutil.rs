use once_cell::sync::Lazy;
use regex::Regex;

/// Answer-key phrases as they occur in real documents (Kazakh and Russian,
/// frequent misspellings included). Matched case-insensitively against the
/// start of a line. Fixed literal data; order is cosmetic.
pub const ANSWER_KEYWORDS: [&str; 12] = [
    "дұрыс жауап",
    "дұрыс жаабы",
    "дұрыс жауаптар",
    "дұрыс жауабы",
    "жауабы",
    "жауап",
    "жауаптар",
    "ответ",
    "ответы",
    "правильный ответ",
    "дұрыс жаурамы",
    "дұрыс жауылы",
];

// The letter classes below are intentionally uneven: line-start `x)` markers
// accept Latin + Cyrillic without Ё, `x.` markers accept Latin only, and
// key-letter extraction additionally accepts Ё. Documents rely on all three.
static OPTION_PAREN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zА-Яа-я]\)").expect("option paren regex"));

static OPTION_DOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]\.").expect("option dot regex"));

static INLINE_OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s([A-Za-zА-Яа-я]\))").expect("inline option regex"));

static KEY_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-zА-Яа-яЁё])\)").expect("key letter regex"));

static BARE_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-zА-Яа-яЁё])\b").expect("bare letter regex"));

static COLLECT_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-zА-Яа-яЁё])\)").expect("collect letter regex"));

pub fn is_answer_key_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    ANSWER_KEYWORDS.iter().any(|kw| lower.starts_with(kw))
}

pub fn starts_with_option_paren(line: &str) -> bool {
    OPTION_PAREN_RE.is_match(line)
}

pub fn starts_with_option_dot(line: &str) -> bool {
    OPTION_DOT_RE.is_match(line)
}

/// Byte offset of the first embedded `x)` marker preceded by whitespace, i.e.
/// the point where a merged "question text a) first option" line splits.
pub fn inline_option_start(line: &str) -> Option<usize> {
    INLINE_OPTION_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.start())
}

/// Letter declared by a line of the `a) ...` shape, lower-cased.
pub fn collected_letter(line: &str) -> Option<char> {
    COLLECT_LETTER_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(lower_letter)
}

/// Correct letters from the tail of an inline answer-key line ("Ответ: b), c)").
/// Letters followed by `)` win; when none are present, fall back to standalone
/// single-letter tokens. The fallback is fragile (a bare one-letter word in the
/// tail also matches) but real documents depend on it.
pub fn key_letters(tail: &str) -> Vec<char> {
    let tail = tail.trim().to_lowercase();
    let mut letters: Vec<char> = KEY_LETTER_RE
        .captures_iter(&tail)
        .filter_map(|c| c.get(1).and_then(|m| m.as_str().chars().next()))
        .collect();
    if letters.is_empty() {
        letters = BARE_LETTER_RE
            .captures_iter(&tail)
            .filter_map(|c| c.get(1).and_then(|m| m.as_str().chars().next()))
            .collect();
    }
    letters
}

/// First character of an option line, lower-cased. This is the option's
/// identity for correctness checks.
pub fn leading_letter(line: &str) -> Option<char> {
    line.trim().chars().next().map(lower_letter)
}

fn lower_letter(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
