use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use zip::ZipArchive;

/// Pull `word/document.xml` out of a DOCX package. The rest of the package
/// (styles, numbering, headers, media) carries no quiz text and is never
/// touched; the input is read-only.
pub fn read_document_xml(path: &Path) -> anyhow::Result<Vec<u8>> {
    let f = File::open(path).with_context(|| format!("open docx: {}", path.display()))?;
    let mut zip = ZipArchive::new(f).context("read zip")?;
    let mut part = zip
        .by_name("word/document.xml")
        .context("missing word/document.xml")?;
    let mut data = Vec::with_capacity(part.size() as usize);
    part.read_to_end(&mut data).context("read word/document.xml")?;
    Ok(data)
}
