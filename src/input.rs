//! Loading page fragment dumps.
//!
//! A dump is either a page object
//! `{ "viewport": {..}, "items": [{ "str", "transform", "width" }, ..] }`
//! or a bare array of items, which is placed on a default Letter viewport.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::layout::project_page;
use crate::model::{Page, PageInput, RawFragment};

/// Parse a page dump from JSON bytes.
pub fn parse_page_json(data: &[u8]) -> Result<PageInput> {
    let value: Value = serde_json::from_slice(data)?;
    let input = match value {
        Value::Object(_) => serde_json::from_value::<PageInput>(value)?,
        Value::Array(_) => PageInput {
            items: serde_json::from_value::<Vec<RawFragment>>(value)?,
            ..PageInput::default()
        },
        _ => {
            return Err(Error::InvalidInput(
                "expected a page object or an array of text items".to_string(),
            ))
        }
    };
    validate(&input)?;
    Ok(input)
}

/// Read and parse a page dump from a file.
pub fn load_page_file<P: AsRef<Path>>(path: P) -> Result<PageInput> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());
    parse_page_json(&data)
}

/// Read and parse a page dump from a reader.
pub fn load_page_reader<R: Read>(mut reader: R) -> Result<PageInput> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_page_json(&data)
}

/// Read, parse and project a page dump from a file.
pub fn open_page<P: AsRef<Path>>(path: P) -> Result<Page> {
    Ok(project_page(&load_page_file(path)?))
}

fn validate(input: &PageInput) -> Result<()> {
    let vp = &input.viewport;
    if !(vp.width.is_finite() && vp.height.is_finite()) || vp.width < 0.0 || vp.height < 0.0 {
        return Err(Error::InvalidInput(format!(
            "viewport size {}x{} is not a valid page size",
            vp.width, vp.height
        )));
    }
    if let Some(i) = input
        .items
        .iter()
        .position(|item| !item.width.is_finite() || item.width < 0.0)
    {
        return Err(Error::InvalidInput(format!(
            "item {} has invalid width {}",
            i, input.items[i].width
        )));
    }
    Ok(())
}
