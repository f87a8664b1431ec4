//! DOCXテキスト抽出
//!
//! DOCXはZIPアーカイブ。`word/document.xml` の段落（`<w:p>`）ごとに
//! テキストラン（`<w:t>`）を連結するのが一次抽出。二次抽出はヘッダー・
//! フッターも含めた全パーツからタグを取り除いたテキスト。

use crate::error::{ResumeSorterError, Result};
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// 開始タグは自己終了形（`<w:p .../>`）を含まない
lazy_static::lazy_static! {
    static ref PARAGRAPH_RE: Regex = Regex::new(r"(?s)<w:p(?:\s[^>]*[^/>])?\s*>(.*?)</w:p>").unwrap();
    static ref RUN_TEXT_RE: Regex = Regex::new(r"(?s)<w:t(?:\s[^>]*[^/>])?\s*>(.*?)</w:t>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref TEXT_PART_RE: Regex =
        Regex::new(r"^word/(document|header\d*|footer\d*|footnotes|endnotes)\.xml$").unwrap();
}

fn open_archive(path: &Path) -> Result<zip::ZipArchive<File>> {
    let file = File::open(path)?;
    zip::ZipArchive::new(file)
        .map_err(|e| ResumeSorterError::Extraction(format!("DOCXを開けません '{}': {}", path.display(), e)))
}

fn read_entry(archive: &mut zip::ZipArchive<File>, name: &str) -> Result<String> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ResumeSorterError::Extraction(format!("{}が見つかりません: {}", name, e)))?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// 段落単位の抽出（1段落1行）
pub(super) fn extract_paragraphs(path: &Path) -> Result<String> {
    let mut archive = open_archive(path)?;
    let xml = read_entry(&mut archive, "word/document.xml")?;
    Ok(paragraphs_from_xml(&xml))
}

fn paragraphs_from_xml(xml: &str) -> String {
    PARAGRAPH_RE
        .captures_iter(xml)
        .map(|para| {
            RUN_TEXT_RE
                .captures_iter(&para[1])
                .map(|run| unescape_xml(&run[1]))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 全テキストパーツからタグを除去した抽出
pub(super) fn extract_plain(path: &Path) -> Result<String> {
    let mut archive = open_archive(path)?;
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| TEXT_PART_RE.is_match(name))
        .map(str::to_string)
        .collect();
    // document.xml を先頭に
    names.sort_by_key(|name| (name != "word/document.xml", name.clone()));

    let mut text = String::new();
    for name in names {
        let xml = read_entry(&mut archive, &name)?;
        text.push_str(&plain_from_xml(&xml));
        text.push('\n');
    }
    Ok(text)
}

fn plain_from_xml(xml: &str) -> String {
    let with_breaks = xml
        .replace("</w:p>", "\n")
        .replace("<w:tab/>", "\t")
        .replace("<w:br/>", "\n");
    unescape_xml(&TAG_RE.replace_all(&with_breaks, ""))
}
