//! Generic XML to JSON tree conversion.
//!
//! The tree keeps the export's own element names (`wp:post_type`,
//! `content:encoded`, ...) and folds attributes into the element object:
//! - an element without attributes or child elements becomes its text;
//! - otherwise it becomes an object of attributes and children, with
//!   non-blank text under `_`;
//! - a name repeated among siblings becomes an array in document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::{Map, Value};
use thiserror::Error;

const TEXT_KEY: &str = "_";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlTreeError {
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },
    #[error("document ended while <{open}> was still open")]
    UnexpectedEof { open: String },
    #[error("document has no root element")]
    NoRoot,
}

#[derive(Debug, Default)]
struct Frame {
    name: String,
    fields: Map<String, Value>,
    has_children: bool,
    text: String,
    saw_cdata: bool,
}

impl Frame {
    fn open(start: &BytesStart, position: u64) -> Result<Self, XmlTreeError> {
        let mut frame = Frame {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            ..Frame::default()
        };
        for attr in start.attributes() {
            let attr = attr.map_err(|e| syntax(position, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| syntax(position, e))?;
            insert_merged(&mut frame.fields, key, Value::String(value.into_owned()));
        }
        Ok(frame)
    }

    fn close(self) -> (String, Value) {
        let Frame {
            name,
            mut fields,
            has_children,
            text,
            saw_cdata,
        } = self;
        if fields.is_empty() && !has_children {
            return (name, Value::String(text));
        }
        if saw_cdata || !text.trim().is_empty() {
            insert_merged(&mut fields, TEXT_KEY.to_string(), Value::String(text));
        }
        (name, Value::Object(fields))
    }
}

/// Parses a whole XML document into a JSON tree rooted at `{ "<root>": ... }`.
pub fn parse_document(xml: &str) -> Result<Value, XmlTreeError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|e| syntax(position, e))?;
        match event {
            Event::Start(start) => {
                ensure_single_root(&root, &stack, position)?;
                stack.push(Frame::open(&start, position)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root, &stack, position)?;
                let closed = Frame::open(&start, position)?.close();
                attach(&mut stack, &mut root, closed);
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| XmlTreeError::Syntax {
                    position,
                    message: "closing tag without matching opening tag".into(),
                })?;
                attach(&mut stack, &mut root, frame.close());
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let decoded = text.decode().map_err(|e| syntax(position, e))?;
                    frame.text.push_str(&decoded);
                }
            }
            Event::CData(cdata) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&cdata));
                    frame.saw_cdata = true;
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(frame) = stack.last_mut() {
                    let name = String::from_utf8_lossy(&reference).into_owned();
                    frame.text.push_str(&resolve_reference(&name, position)?);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no content.
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlTreeError::UnexpectedEof { open: open.name });
    }
    let (name, value) = root.ok_or(XmlTreeError::NoRoot)?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

/// Top-level keys of a parsed document, for diagnostics.
pub fn top_level_keys(document: &Value) -> Vec<String> {
    document
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

fn ensure_single_root(
    root: &Option<(String, Value)>,
    stack: &[Frame],
    position: u64,
) -> Result<(), XmlTreeError> {
    if stack.is_empty() && root.is_some() {
        return Err(XmlTreeError::Syntax {
            position,
            message: "more than one root element".into(),
        });
    }
    Ok(())
}

fn attach(stack: &mut [Frame], root: &mut Option<(String, Value)>, closed: (String, Value)) {
    match stack.last_mut() {
        Some(parent) => {
            parent.has_children = true;
            insert_merged(&mut parent.fields, closed.0, closed.1);
        }
        None => *root = Some(closed),
    }
}

/// Inserts `value` under `key`, turning repeated keys into an array.
fn insert_merged(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        None => {
            map.insert(key, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

fn resolve_reference(name: &str, position: u64) -> Result<String, XmlTreeError> {
    let predefined = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => None,
    };
    if let Some(c) = predefined {
        return Ok(c.to_string());
    }
    let Some(number) = name.strip_prefix('#') else {
        // Undeclared named entity: keep it as written rather than guess.
        return Ok(format!("&{name};"));
    };
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => number.parse::<u32>(),
    };
    code.ok()
        .and_then(char::from_u32)
        .map(|c| c.to_string())
        .ok_or_else(|| XmlTreeError::Syntax {
            position,
            message: format!("invalid character reference &{name};"),
        })
}

fn syntax(position: u64, err: impl std::fmt::Display) -> XmlTreeError {
    XmlTreeError::Syntax {
        position,
        message: err.to_string(),
    }
}
