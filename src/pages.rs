use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

// pdftotext separates pages with a form feed on stdout.
const PAGE_BREAK: char = '\u{000C}';

pub fn extract_pdf_pages(pdf_path: &Path, max_pages: Option<usize>) -> Result<Vec<String>> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8").arg("-f").arg("1");
    if let Some(max_pages) = max_pages {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
}

pub fn read_text_pages(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read page text from {}", path.display()))?;
    Ok(split_pages(&raw))
}

fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split(PAGE_BREAK)
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages
}

/// Flattens page texts into trimmed, whitespace-collapsed, non-empty lines.
/// Order is preserved across and within pages.
pub fn normalize_lines(pages: &[String]) -> Vec<String> {
    let mut lines = Vec::new();

    for page in pages {
        for line in page.lines() {
            let collapsed = line.split_whitespace().collect::<Vec<&str>>().join(" ");
            if !collapsed.is_empty() {
                lines.push(collapsed);
            }
        }
    }

    lines
}
