use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use lopdf::{Document, Object};

use crate::model::TitleBlockRegion;

/// Collect every annotation `Contents` string across all pages.
pub fn annotation_texts(path: &Path) -> Result<Vec<String>> {
    let doc = Document::load(path)
        .with_context(|| format!("failed to open PDF: {}", path.display()))?;
    Ok(annotation_texts_in(&doc))
}

/// Annotation walk over an already-loaded document. Structural oddities in
/// individual pages or annotations are skipped, not errors.
pub fn annotation_texts_in(doc: &Document) -> Vec<String> {
    let mut texts = Vec::new();

    for page_id in doc.get_pages().into_values() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        let Ok(annots) = page.get(b"Annots") else {
            continue;
        };
        let Ok(annots) = resolve(doc, annots) else {
            continue;
        };
        let Ok(annots) = annots.as_array() else {
            continue;
        };

        for annot in annots {
            let Ok(annot) = resolve(doc, annot) else {
                continue;
            };
            let Ok(annot) = annot.as_dict() else {
                continue;
            };
            let Ok(contents) = annot.get(b"Contents") else {
                continue;
            };
            let Ok(contents) = resolve(doc, contents) else {
                continue;
            };
            if let Ok(bytes) = contents.as_str() {
                let text = decode_pdf_string(bytes);
                if !text.is_empty() {
                    texts.push(text);
                }
            }
        }
    }

    texts
}

/// Text confined to the title-block rectangle on page 1 only. pdftotext's
/// crop flags take top-left-origin coordinates at 72 dpi, i.e. point units.
pub fn title_block_text(path: &Path, region: &TitleBlockRegion) -> Result<String> {
    let mut command = Command::new("pdftotext");
    command
        .arg("-enc")
        .arg("UTF-8")
        .arg("-f")
        .arg("1")
        .arg("-l")
        .arg("1")
        .arg("-x")
        .arg(region.left.to_string())
        .arg("-y")
        .arg(region.top.to_string())
        .arg("-W")
        .arg(region.width().to_string())
        .arg("-H")
        .arg(region.height().to_string())
        .arg(path)
        .arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            path.display(),
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).replace('\u{0000}', ""))
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> lopdf::Result<&'a Object> {
    match object.as_reference() {
        Ok(id) => doc.get_object(id),
        Err(_) => Ok(object),
    }
}

/// PDF text strings are UTF-16BE when they carry a BOM, PDFDocEncoding
/// (treated as UTF-8-ish) otherwise.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    String::from_utf8_lossy(bytes).into_owned()
}
