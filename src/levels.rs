use anyhow::{anyhow, Context};

#[derive(Clone, Debug)]
struct LevelSpan {
    label: String,
    first: usize,
    last: usize,
}

/// Assignment of level labels to contiguous 1-based question ordinals, parsed
/// from a compact `Label=Count,...` specification. Built fresh per document and
/// read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct LevelMap {
    spans: Vec<LevelSpan>,
}

impl LevelMap {
    /// Parse e.g. `A=35,B=50,C=35` into ordinal ranges 1..=35 -> A,
    /// 36..=85 -> B, 86..=120 -> C. Any malformed entry is a fatal error for
    /// the whole conversion run.
    pub fn parse(spec: &str) -> anyhow::Result<Self> {
        let mut spans = Vec::new();
        let mut start = 1usize;
        for part in spec.split(',') {
            let part = part.trim();
            let (label, count) = part
                .split_once('=')
                .ok_or_else(|| anyhow!("level entry missing '=': {part:?}"))?;
            if count.contains('=') {
                return Err(anyhow!("level entry has more than one '=': {part:?}"));
            }
            let n: usize = count
                .trim()
                .parse()
                .with_context(|| format!("level count is not a number: {part:?}"))?;
            spans.push(LevelSpan {
                label: label.to_string(),
                first: start,
                last: (start + n).saturating_sub(1),
            });
            start += n;
        }
        Ok(Self { spans })
    }

    /// Label for the Nth extracted question (1-based). Ordinals past the last
    /// range get the empty label.
    pub fn label_for(&self, ordinal: usize) -> &str {
        self.spans
            .iter()
            .find(|s| s.first <= ordinal && ordinal <= s.last)
            .map(|s| s.label.as_str())
            .unwrap_or("")
    }
}
