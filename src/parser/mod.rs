//! # Credit Database Parser
//!
//! Single-pass parser for credit database documents. The document is read as
//! a stream of element-enter, text and element-exit events with
//! `quick_xml::Reader`; each event is applied to a `ParseContext` that lives
//! only for the duration of one `parse` call, so concurrent parses never
//! share state.
//!
//! ## Document Format
//!
//! ```xml
//! <credits xmlns="urn:credits:1">
//!     <credit key="glide">
//!         <component>Glide</component>
//!         <owner>Bump Technologies</owner>
//!         <licenseRef keyref="apache" />
//!         <artifact groupId="com.github.bumptech.glide" artifactId="glide" />
//!     </credit>
//!     <licenses>
//!         <license key="apache">Apache License, Version 2.0</license>
//!     </licenses>
//! </credits>
//! ```
//!
//! Uniqueness of credit keys, artifact pairs and registry keys is checked as
//! each entity is entered. Completeness of the credits and resolution of the
//! `ownerRef`/`licenseRef` references are deferred to the end of the
//! document (see `finalize`), because a registry may be declared after the
//! credits that refer to it.

mod context;
mod finalize;

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Location, Result};
use crate::model::{ArtifactCoordinate, CreditItem};
use context::{ParseContext, Position, StartTag};

/// The two lookup structures produced by a successful parse.
#[derive(Debug, Default)]
pub(crate) struct ParsedDocument {
    pub credits: HashMap<String, CreditItem>,
    pub artifacts: HashMap<ArtifactCoordinate, String>,
}

/// Parses and validates a credit database document.
pub(crate) fn parse(source: &str) -> Result<ParsedDocument> {
    let mut reader = Reader::from_str(source);
    let mut context = ParseContext::new();

    loop {
        let offset = reader.buffer_position() as usize;
        let at = Position { source, offset };

        let event = reader.read_event().map_err(|e| Error::MalformedDocument {
            message: e.to_string(),
            location: Location::from_offset(source, reader.buffer_position() as usize),
        })?;

        match event {
            Event::Start(start) => {
                let tag = start_tag(&start, source, offset)?;
                context.enter(&tag, at)?;
            }
            Event::Empty(start) => {
                let tag = start_tag(&start, source, offset)?;
                context.enter(&tag, at)?;
                context.exit(&tag.name, at)?;
            }
            Event::End(end) => {
                let name = utf8(end.local_name().into_inner(), source, offset)?;
                context.exit(name, at)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| Error::MalformedDocument {
                    message: e.to_string(),
                    location: at.location(),
                })?;
                context.text(&text);
            }
            Event::CData(data) => {
                let text = utf8(&data, source, offset)?;
                context.text(text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    context.finish(Location::from_offset(source, source.len()))
}

fn start_tag(start: &BytesStart<'_>, source: &str, offset: usize) -> Result<StartTag> {
    let malformed = |message: String| Error::MalformedDocument {
        message,
        location: Location::from_offset(source, offset),
    };

    let name = utf8(start.local_name().into_inner(), source, offset)?.to_string();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| malformed(e.to_string()))?;
        let key = utf8(attribute.key.local_name().into_inner(), source, offset)?.to_string();
        let value = attribute
            .unescape_value()
            .map_err(|e| malformed(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(StartTag { name, attributes })
}

fn utf8<'a>(bytes: &'a [u8], source: &str, offset: usize) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| Error::MalformedDocument {
        message: e.to_string(),
        location: Location::from_offset(source, offset),
    })
}
