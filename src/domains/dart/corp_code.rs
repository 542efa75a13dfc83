//! Parsing of DART's corporation code registry.
//!
//! `corpCode.xml` is served as a zip archive holding a single `CORPCODE.xml`:
//!
//! ```xml
//! <result>
//!   <list>
//!     <corp_code>00126380</corp_code>
//!     <corp_name>삼성전자</corp_name>
//!     <corp_eng_name>SAMSUNG ELECTRONICS CO,.LTD</corp_eng_name>
//!     <stock_code>005930</stock_code>
//!     <modify_date>20240101</modify_date>
//!   </list>
//! </result>
//! ```
//!
//! When the request fails DART answers with a plain XML or JSON status body
//! instead of an archive.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::endpoints::CORP_CODE_ENTRY;
use super::error::{DartError, DartResult};

/// One entry of the corporation code registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpRecord {
    pub corp_code: String,
    pub corp_name: String,
    pub corp_eng_name: String,
    /// Six-digit exchange code; `None` for unlisted companies.
    pub stock_code: Option<String>,
    pub modify_date: String,
}

impl CorpRecord {
    pub fn is_listed(&self) -> bool {
        self.stock_code.is_some()
    }
}

#[derive(Default)]
struct PartialRecord {
    corp_code: String,
    corp_name: String,
    corp_eng_name: String,
    stock_code: String,
    modify_date: String,
}

impl PartialRecord {
    fn field_mut(&mut self, tag: &str) -> Option<&mut String> {
        match tag {
            "corp_code" => Some(&mut self.corp_code),
            "corp_name" => Some(&mut self.corp_name),
            "corp_eng_name" => Some(&mut self.corp_eng_name),
            "stock_code" => Some(&mut self.stock_code),
            "modify_date" => Some(&mut self.modify_date),
            _ => None,
        }
    }

    fn finish(self) -> Option<CorpRecord> {
        let corp_code = self.corp_code.trim().to_string();
        let corp_name = self.corp_name.trim().to_string();
        if corp_code.is_empty() || corp_name.is_empty() {
            return None;
        }
        let stock_code = Some(self.stock_code.trim().to_string()).filter(|s| !s.is_empty());
        Some(CorpRecord {
            corp_code,
            corp_name,
            corp_eng_name: self.corp_eng_name.trim().to_string(),
            stock_code,
            modify_date: self.modify_date.trim().to_string(),
        })
    }
}

/// Unpack the registry XML from the downloaded archive.
///
/// A body that is not a zip archive is inspected for a DART status envelope
/// and reported as that error.
pub fn extract_corp_code_xml(bytes: &[u8]) -> DartResult<String> {
    if !bytes.starts_with(b"PK") {
        return Err(match parse_status_body(bytes) {
            Some((status, message)) => DartError::from_status(status, message),
            None => DartError::Archive("response is not a zip archive".to_string()),
        });
    }

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| DartError::Archive(e.to_string()))?;

    let name = if archive.file_names().any(|n| n == CORP_CODE_ENTRY) {
        CORP_CODE_ENTRY.to_string()
    } else {
        let first = archive
            .file_names()
            .next()
            .map(str::to_string)
            .ok_or_else(|| DartError::Archive("archive is empty".to_string()))?;
        debug!("{} not found, using archive entry {}", CORP_CODE_ENTRY, first);
        first
    };

    let mut entry = archive
        .by_name(&name)
        .map_err(|e| DartError::Archive(e.to_string()))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| DartError::Archive(e.to_string()))?;
    Ok(xml)
}

/// Parse `CORPCODE.xml`. Entries without a code or name are skipped.
pub fn parse_corp_code_xml(xml: &str) -> DartResult<Vec<CorpRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<PartialRecord> = None;
    let mut tag: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "list" {
                    current = Some(PartialRecord::default());
                } else if current.is_some() {
                    tag = Some(name);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(record), Some(tag)) = (current.as_mut(), tag.as_deref()) {
                    if let Some(field) = record.field_mut(tag) {
                        let text = e.unescape().map_err(|e| DartError::Xml(e.to_string()))?;
                        field.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"list" {
                    if let Some(record) = current.take().and_then(PartialRecord::finish) {
                        records.push(record);
                    }
                }
                tag = None;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DartError::Xml(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
        buf.clear();
    }

    Ok(records)
}

/// Extract `(status, message)` from a DART error body in JSON or XML form.
pub fn parse_status_body(bytes: &[u8]) -> Option<(String, String)> {
    #[derive(Deserialize)]
    struct StatusBody {
        status: String,
        #[serde(default)]
        message: String,
    }

    if let Ok(body) = serde_json::from_slice::<StatusBody>(bytes) {
        return Some((body.status, body.message));
    }

    let text = std::str::from_utf8(bytes).ok()?;
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut status = None;
    let mut message = String::new();
    let mut tag = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => tag = e.name().as_ref().to_vec(),
            Ok(Event::Text(e)) => {
                let value = e.unescape().ok()?.into_owned();
                match tag.as_slice() {
                    b"status" => status = Some(value),
                    b"message" => message = value,
                    _ => {}
                }
            }
            Ok(Event::End(_)) => tag.clear(),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }
    status.map(|status| (status, message))
}
