use std::io::BufRead;

use log::trace;
use roxmltree::{Document, Node, ParsingOptions};

use super::fields::{finish_deposit, is_deposit, start_deposit, TextField};
use super::{DepositParser, ParseError, ParserKind};
use crate::deposit::DepositsDb;

/// Tree-traversal strategy
///
/// Reads the full document into a `roxmltree` tree, then visits every
/// `deposit` element at any depth and reads its fields by random access.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeParser;

impl DepositParser for TreeParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Tree
    }

    fn parse_reader(&self, reader: &mut dyn BufRead) -> Result<DepositsDb, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        deposits_from_text(&text)
    }

    fn parse_str(&self, xml: &str) -> Result<DepositsDb, ParseError> {
        deposits_from_text(xml)
    }
}

fn deposits_from_text(text: &str) -> Result<DepositsDb, ParseError> {
    // Streaming strategies skip DOCTYPE declarations, so the tree must too
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(text, options)?;

    let mut deposits = DepositsDb::new();
    let records = doc
        .descendants()
        .filter(|n| n.is_element() && is_deposit(n.tag_name().name()));

    for (index, node) in records.enumerate() {
        let position = index + 1;
        let mut builder = start_deposit(position, |ns, local| Ok(attribute(node, ns, local)))?;

        for field in TextField::ALL {
            let element = node
                .descendants()
                .find(|n| {
                    n.is_element() && field.matches(n.tag_name().namespace(), n.tag_name().name())
                })
                .ok_or(ParseError::MissingField {
                    position,
                    field: field.field(),
                })?;
            field.apply(&mut builder, &text_content(element), position)?;
        }

        let deposit = finish_deposit(builder, position)?;
        trace!("tree parser: deposit {} complete", deposit.id);
        deposits.push(deposit);
    }

    Ok(deposits)
}

fn attribute(node: Node<'_, '_>, namespace: Option<&str>, local_name: &str) -> Option<String> {
    let value = match namespace {
        Some(ns) => node.attribute((ns, local_name)),
        None => node.attribute(local_name),
    };
    value.map(str::to_owned)
}

/// Concatenated text of all descendant text nodes
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
