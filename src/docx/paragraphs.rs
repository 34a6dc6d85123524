use super::xml::{find_attr, XmlEvent, XmlPart};

/// Collect the plain text of direct body paragraphs (`w:p` under `w:body`,
/// outside tables). Soft line breaks stay embedded as `\n` so the normalizer
/// can split them later; tabs become `\t`.
///
/// Table, header and footer text is deliberately not captured: quiz documents
/// keep their questions in the body flow, and table content is page furniture.
pub fn body_paragraphs(part: &XmlPart) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut stack: Vec<String> = Vec::new();

    let mut tbl_depth = 0usize;
    // Paragraph capture: text buffer plus the element depth the paragraph
    // opened at, so nested w:p (text boxes) close without ending the capture.
    let mut capture: Option<(String, usize)> = None;
    let mut nested_p = 0usize;
    let mut in_text = false;

    for ev in &part.events {
        match ev {
            XmlEvent::Start { name, .. } => {
                let parent = stack.last().map(String::as_str).unwrap_or("");
                if name == "w:tbl" {
                    tbl_depth += 1;
                }
                if name == "w:p" {
                    if capture.is_none() && parent == "w:body" && tbl_depth == 0 {
                        capture = Some((String::new(), stack.len()));
                    } else if capture.is_some() {
                        nested_p += 1;
                    }
                }
                if name == "w:t" && capture.is_some() && nested_p == 0 {
                    in_text = true;
                }
                stack.push(name.clone());
            }
            XmlEvent::Empty { name, attrs } => {
                if nested_p == 0 {
                    if let Some((buf, _)) = capture.as_mut() {
                        control_append(buf, name, attrs);
                    }
                }
            }
            XmlEvent::End { name } => {
                stack.pop();
                if name == "w:tbl" {
                    tbl_depth = tbl_depth.saturating_sub(1);
                }
                if name == "w:t" {
                    in_text = false;
                }
                if name == "w:p" {
                    if nested_p > 0 {
                        nested_p -= 1;
                    } else if let Some((buf, depth)) = capture.take() {
                        if stack.len() == depth {
                            if !buf.trim().is_empty() {
                                out.push(buf);
                            }
                        } else {
                            capture = Some((buf, depth));
                        }
                    }
                }
            }
            XmlEvent::Text { text } => {
                if in_text && nested_p == 0 {
                    if let Some((buf, _)) = capture.as_mut() {
                        buf.push_str(text);
                    }
                }
            }
        }
    }

    out
}

fn control_append(buf: &mut String, name: &str, attrs: &[(String, String)]) {
    match name {
        "w:tab" | "w:ptab" => buf.push('\t'),
        "w:cr" => buf.push('\n'),
        "w:br" => {
            // Page and column breaks end layout, not text.
            if find_attr(attrs, "w:type").unwrap_or("textWrapping") == "textWrapping" {
                buf.push('\n');
            }
        }
        "w:noBreakHyphen" => buf.push('-'),
        _ => {}
    }
}
