use crate::ir::QuestionBlock;
use crate::levels::LevelMap;

/// A typed output cell. Booleans stay typed all the way to the worksheet so
/// the sink can emit real boolean cells instead of stringified flags.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Bool(bool),
}

#[derive(Clone, Debug)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Lay question blocks out as rows: question text, level label by 1-based
/// ordinal, multiple-answer flag, then per option slot the option line and its
/// correctness. The widest block fixes the column count; narrower blocks pad
/// with empty text / false.
pub fn build_table(blocks: &[QuestionBlock], levels: &LevelMap) -> Table {
    let max_options = blocks.iter().map(|b| b.options.len()).max().unwrap_or(0);

    let mut header = vec![
        "question_text".to_string(),
        "level".to_string(),
        "is_multiple".to_string(),
    ];
    for i in 1..=max_options {
        header.push(format!("answer_{i}"));
        header.push(format!("is_correct_{i}"));
    }

    let mut rows = Vec::with_capacity(blocks.len());
    for (idx, block) in blocks.iter().enumerate() {
        let mut row = Vec::with_capacity(header.len());
        row.push(Cell::Text(block.text.clone()));
        row.push(Cell::Text(levels.label_for(idx + 1).to_string()));
        row.push(Cell::Bool(block.is_multiple()));
        for slot in 0..max_options {
            match block.options.get(slot) {
                Some(opt) => {
                    row.push(Cell::Text(opt.text.clone()));
                    row.push(Cell::Bool(block.is_correct(opt.letter)));
                }
                None => {
                    row.push(Cell::Text(String::new()));
                    row.push(Cell::Bool(false));
                }
            }
        }
        rows.push(row);
    }

    Table { header, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::AnswerOption;

    fn block(text: &str, letters: &[char], correct: &[char]) -> QuestionBlock {
        QuestionBlock {
            text: text.to_string(),
            options: letters
                .iter()
                .map(|&l| AnswerOption {
                    letter: l,
                    text: format!("{l}) option {l}"),
                })
                .collect(),
            correct_letters: correct.to_vec(),
        }
    }

    #[test]
    fn header_width_follows_widest_block() {
        let blocks = vec![
            block("Q1", &['a', 'b', 'c', 'd', 'e'], &['a']),
            block("Q2", &['a', 'b', 'c'], &['b']),
        ];
        let table = build_table(&blocks, &LevelMap::default());
        assert_eq!(table.header.len(), 3 + 2 * 5);
        assert_eq!(table.header[3], "answer_1");
        assert_eq!(table.header[4], "is_correct_1");
        assert_eq!(table.header[11], "answer_5");
    }

    #[test]
    fn narrow_blocks_pad_with_empty_and_false() {
        let blocks = vec![
            block("Q1", &['a', 'b', 'c', 'd', 'e'], &[]),
            block("Q2", &['a', 'b', 'c'], &['c']),
        ];
        let table = build_table(&blocks, &LevelMap::default());
        let row = &table.rows[1];
        // Slots 4 and 5 of the second row are padding.
        assert_eq!(row[3 + 2 * 3], Cell::Text(String::new()));
        assert_eq!(row[3 + 2 * 3 + 1], Cell::Bool(false));
        assert_eq!(row[3 + 2 * 4], Cell::Text(String::new()));
        assert_eq!(row[3 + 2 * 4 + 1], Cell::Bool(false));
        // The real third option is still marked correct.
        assert_eq!(row[3 + 2 * 2 + 1], Cell::Bool(true));
    }

    #[test]
    fn levels_assigned_by_ordinal() {
        let blocks = vec![
            block("Q1", &[], &[]),
            block("Q2", &[], &[]),
            block("Q3", &[], &[]),
            block("Q4", &[], &[]),
        ];
        let levels = LevelMap::parse("A=2,B=1").expect("levels");
        let table = build_table(&blocks, &levels);
        let labels: Vec<&Cell> = table.rows.iter().map(|r| &r[1]).collect();
        assert_eq!(
            labels,
            vec![
                &Cell::Text("A".into()),
                &Cell::Text("A".into()),
                &Cell::Text("B".into()),
                &Cell::Text(String::new()),
            ]
        );
    }

    #[test]
    fn zero_option_block_has_minimal_row() {
        let blocks = vec![block("stray text", &[], &[])];
        let table = build_table(&blocks, &LevelMap::default());
        assert_eq!(table.header.len(), 3);
        assert_eq!(
            table.rows[0],
            vec![
                Cell::Text("stray text".into()),
                Cell::Text(String::new()),
                Cell::Bool(false),
            ]
        );
    }

    #[test]
    fn multiple_flag_requires_two_letters() {
        let blocks = vec![
            block("Q1", &['a', 'b'], &['a', 'b']),
            block("Q2", &['a', 'b'], &['a']),
        ];
        let table = build_table(&blocks, &LevelMap::default());
        assert_eq!(table.rows[0][2], Cell::Bool(true));
        assert_eq!(table.rows[1][2], Cell::Bool(false));
    }
}
