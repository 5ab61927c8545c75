use std::io::BufRead;

use log::trace;
use quick_xml::events::{BytesStart, Event};
use quick_xml::NsReader;

use super::events::{
    check_complete, check_outside_text, check_single_root, namespace_uri, outside_root, utf8,
};
use super::fields::{finish_deposit, is_deposit, start_deposit, OpenFields, TextField};
use super::{DepositParser, ParseError, ParserKind};
use crate::deposit::{DepositBuilder, DepositsDb};

/// Cursor (pull) strategy
///
/// Pulls namespace-resolved events one at a time and keeps the assembly
/// state in local variables of a single loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorParser;

impl DepositParser for CursorParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Cursor
    }

    fn parse_reader(&self, reader: &mut dyn BufRead) -> Result<DepositsDb, ParseError> {
        let mut reader = NsReader::from_reader(reader);

        let mut deposits = DepositsDb::new();
        let mut current: Option<DepositBuilder> = None;
        let mut fields = OpenFields::default();
        let mut position = 0usize;
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut buf = Vec::new();

        loop {
            let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
            let namespace = namespace_uri(ns)?;

            // An empty element is handled as an open immediately followed by a close.
            // `level` is the depth of the element the event belongs to.
            let (start, end, level) = match event {
                Event::Start(ref e) => {
                    check_single_root(seen_root, depth)?;
                    depth += 1;
                    (Some(e), None, depth)
                }
                Event::Empty(ref e) => {
                    check_single_root(seen_root, depth)?;
                    (Some(e), Some(utf8(e.local_name().as_ref())?), depth + 1)
                }
                Event::End(ref e) => {
                    let level = depth;
                    depth = depth.saturating_sub(1);
                    (None, Some(utf8(e.local_name().as_ref())?), level)
                }
                Event::Text(ref t) => {
                    if depth == 0 {
                        check_outside_text(t)?;
                    } else {
                        fields.push_text(&t.unescape()?);
                    }
                    (None, None, depth)
                }
                Event::CData(ref c) => {
                    if depth == 0 {
                        return Err(outside_root());
                    }
                    fields.push_text(std::str::from_utf8(c)?);
                    (None, None, depth)
                }
                Event::Eof => break,
                _ => (None, None, depth),
            };

            if let Some(e) = start {
                seen_root = true;
                let local_name = utf8(e.local_name().as_ref())?;
                if is_deposit(&local_name) {
                    position += 1;
                    current = Some(start_deposit(position, |ns, local| {
                        attribute_value(&reader, e, ns, local)
                    })?);
                    fields.clear();
                } else if let Some(builder) = &current {
                    // amount-on-deposit and interest only count in the financial namespace
                    if let Some(field) = TextField::for_element(namespace.as_deref(), &local_name) {
                        fields.open(field, level, builder);
                    }
                }
            }

            if let Some(local_name) = end {
                if let Some(builder) = current.as_mut() {
                    fields.close(level, builder, position)?;
                }

                // a close without a started record is ignored
                if is_deposit(&local_name) {
                    if let Some(builder) = current.take() {
                        fields.clear();
                        let deposit = finish_deposit(builder, position)?;
                        trace!("cursor parser: deposit {} complete", deposit.id);
                        deposits.push(deposit);
                    }
                }
            }

            buf.clear();
        }

        check_complete(seen_root, depth)?;
        Ok(deposits)
    }
}

/// Look up an attribute by resolved (namespace, local name)
fn attribute_value<R>(
    reader: &NsReader<R>,
    e: &BytesStart<'_>,
    namespace: Option<&str>,
    local_name: &str,
) -> Result<Option<String>, ParseError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        if local.as_ref() == local_name.as_bytes()
            && namespace_uri(ns)?.as_deref() == namespace
        {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
