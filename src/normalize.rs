use crate::textutil::{inline_option_start, is_answer_key_line, starts_with_option_paren};

/// Turn raw paragraph strings into the flat line sequence the extractor
/// consumes: split on embedded soft line breaks, trim, drop empties, and
/// recover the common "question text a) first option" merge by splitting such
/// lines at the first embedded option marker.
///
/// Answer-key lines and lines that already start with an option marker are
/// never split; their embedded `x)` substrings are payload, not markers.
pub fn normalize_lines(paragraphs: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for para in paragraphs {
        for raw in para.split('\n') {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if !is_answer_key_line(line) && !starts_with_option_paren(line) {
                if let Some(at) = inline_option_start(line) {
                    out.push(line[..at].trim().to_string());
                    out.push(line[at..].trim().to_string());
                    continue;
                }
            }
            out.push(line.to_string());
        }
    }
    out
}
