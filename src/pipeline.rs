use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::docx::package::read_document_xml;
use crate::docx::paragraphs::body_paragraphs;
use crate::docx::xml::parse_xml_part;
use crate::extract::extract_blocks;
use crate::ir::QuestionBlock;
use crate::levels::LevelMap;
use crate::normalize::normalize_lines;
use crate::progress::ConsoleProgress;
use crate::table::build_table;
use crate::xlsx::write_workbook;

#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Level specification; absent means every question gets an empty level.
    pub levels: Option<String>,
    pub sheet_name: String,
    /// Target directory for workbooks; absent means next to each input.
    pub output_dir: Option<PathBuf>,
    /// When set, also write <stem>.questions.json into this directory.
    pub dump_json_dir: Option<PathBuf>,
}

pub struct ConvertPipeline {
    opts: ConvertOptions,
    progress: ConsoleProgress,
}

/// JSON shape for the inspection dump: the extracted block joined with the
/// per-option correctness the workbook row will carry.
#[derive(Serialize)]
struct DumpQuestion<'a> {
    question_text: &'a str,
    level: &'a str,
    is_multiple: bool,
    correct_letters: &'a [char],
    options: Vec<DumpOption<'a>>,
}

#[derive(Serialize)]
struct DumpOption<'a> {
    letter: char,
    text: &'a str,
    is_correct: bool,
}

impl ConvertPipeline {
    pub fn new(opts: ConvertOptions, progress: ConsoleProgress) -> Self {
        Self { opts, progress }
    }

    pub fn convert_all(&self, inputs: &[PathBuf]) -> anyhow::Result<()> {
        for (i, input) in inputs.iter().enumerate() {
            let out_path = self
                .convert_docx(input)
                .with_context(|| format!("convert {}", input.display()))?;
            self.progress.step("converted", i + 1, inputs.len());
            self.progress
                .info(format!("  {} -> {}", input.display(), out_path.display()));
        }
        self.progress
            .info(format!("Done: {} file(s) converted", inputs.len()));
        Ok(())
    }

    /// One document, start to finish. The level map and all extractor state
    /// are rebuilt here, so documents never leak state into each other.
    pub fn convert_docx(&self, input: &Path) -> anyhow::Result<PathBuf> {
        let levels = match self.opts.levels.as_deref() {
            Some(spec) => LevelMap::parse(spec).context("parse level specification")?,
            None => LevelMap::default(),
        };

        let xml = read_document_xml(input)?;
        let part = parse_xml_part("word/document.xml", &xml)?;
        let paragraphs = body_paragraphs(&part);
        let lines = normalize_lines(&paragraphs);
        let blocks = extract_blocks(&lines);
        let table = build_table(&blocks, &levels);

        self.progress.info(format!(
            "{}: {} question(s), {} answer column(s)",
            input.display(),
            blocks.len(),
            (table.header.len().saturating_sub(3)) / 2,
        ));

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");

        let out_dir = match self.opts.output_dir.as_deref() {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("create output dir: {}", dir.display()))?;
                dir.to_path_buf()
            }
            None => input.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
        };
        let out_path = out_dir.join(format!("{stem}.xlsx"));
        write_workbook(&out_path, &self.opts.sheet_name, &table)?;

        if let Some(dir) = self.opts.dump_json_dir.as_deref() {
            self.dump_json(dir, stem, &blocks, &levels)?;
        }

        Ok(out_path)
    }

    fn dump_json(
        &self,
        dir: &Path,
        stem: &str,
        blocks: &[QuestionBlock],
        levels: &LevelMap,
    ) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create dump dir: {}", dir.display()))?;
        let dump: Vec<DumpQuestion> = blocks
            .iter()
            .enumerate()
            .map(|(idx, b)| DumpQuestion {
                question_text: &b.text,
                level: levels.label_for(idx + 1),
                is_multiple: b.is_multiple(),
                correct_letters: &b.correct_letters,
                options: b
                    .options
                    .iter()
                    .map(|o| DumpOption {
                        letter: o.letter,
                        text: &o.text,
                        is_correct: b.is_correct(o.letter),
                    })
                    .collect(),
            })
            .collect();
        let path = dir.join(format!("{stem}.questions.json"));
        let json = serde_json::to_string_pretty(&dump).context("serialize questions json")?;
        std::fs::write(&path, json).with_context(|| format!("write json: {}", path.display()))?;
        Ok(())
    }
}
