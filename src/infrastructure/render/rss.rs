//! RSS 2.0 renderer built on quick-xml.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::json;

use crate::domain::entities::{FeedChannel, FeedEntry};
use crate::domain::gateways::FeedRenderer;
use crate::error::AppError;

const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Renders entries in the order given; `guid` is emitted as a non-permalink.
#[derive(Debug, Clone, Copy, Default)]
pub struct RssRenderer;

impl RssRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn render_error(e: impl std::fmt::Display) -> AppError {
    AppError::render("Failed to write RSS document", json!({ "reason": e.to_string() }))
}

fn open<W: Write>(writer: &mut Writer<W>, tag: BytesStart<'_>) -> Result<(), AppError> {
    writer.write_event(Event::Start(tag)).map_err(render_error)
}

fn close<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), AppError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(render_error)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), AppError> {
    open(writer, BytesStart::new(name))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(render_error)?;
    close(writer, name)
}

fn write_item<W: Write>(writer: &mut Writer<W>, entry: &FeedEntry) -> Result<(), AppError> {
    open(writer, BytesStart::new("item"))?;
    text_element(writer, "title", &entry.title)?;
    text_element(writer, "link", &entry.link)?;
    text_element(writer, "description", &entry.description)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    open(writer, guid)?;
    writer
        .write_event(Event::Text(BytesText::new(&entry.guid)))
        .map_err(render_error)?;
    close(writer, "guid")?;

    text_element(writer, "pubDate", &entry.published_at.to_rfc2822())?;
    close(writer, "item")
}

impl FeedRenderer for RssRenderer {
    fn render(&self, channel: &FeedChannel, entries: &[FeedEntry]) -> Result<String, AppError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(render_error)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        open(&mut writer, rss)?;
        open(&mut writer, BytesStart::new("channel"))?;

        text_element(&mut writer, "title", &channel.title)?;
        text_element(&mut writer, "link", &channel.link)?;
        text_element(&mut writer, "description", &channel.description)?;
        text_element(&mut writer, "language", &channel.language)?;
        text_element(&mut writer, "generator", GENERATOR)?;

        for entry in entries {
            write_item(&mut writer, entry)?;
        }

        close(&mut writer, "channel")?;
        close(&mut writer, "rss")?;

        String::from_utf8(writer.into_inner()).map_err(render_error)
    }
}
