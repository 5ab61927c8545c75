use std::io::BufRead;

use log::trace;

use super::events::{ContentHandler, EventDriver, StartElement, XmlName};
use super::fields::{finish_deposit, is_deposit, start_deposit, OpenFields, TextField};
use super::{DepositParser, ParseError, ParserKind};
use crate::deposit::{DepositBuilder, DepositsDb};

/// Event-callback strategy
///
/// The document is pushed through an [`EventDriver`] into a handler that
/// assembles one deposit at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallbackParser;

impl DepositParser for CallbackParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Callback
    }

    fn parse_reader(&self, reader: &mut dyn BufRead) -> Result<DepositsDb, ParseError> {
        let mut handler = DepositContentHandler::default();
        EventDriver::new(reader).run(&mut handler)?;
        Ok(handler.into_deposits())
    }
}

/// Content handler that builds [`DepositsDb`] from document events
///
/// State carried between events: the record being assembled, the field
/// elements open inside it, and the current element depth.
#[derive(Debug, Default)]
struct DepositContentHandler {
    deposits: DepositsDb,
    current: Option<DepositBuilder>,
    fields: OpenFields,
    depth: usize,
    position: usize,
}

impl DepositContentHandler {
    fn into_deposits(self) -> DepositsDb {
        self.deposits
    }
}

impl ContentHandler for DepositContentHandler {
    fn start_element(&mut self, element: &StartElement) -> Result<(), ParseError> {
        self.depth += 1;
        let name = &element.name;
        if is_deposit(&name.local_name) {
            self.position += 1;
            let builder = start_deposit(self.position, |ns, local| {
                Ok(element.attribute(ns, local).map(str::to_owned))
            })?;
            self.current = Some(builder);
            self.fields.clear();
        } else if let Some(builder) = &self.current {
            if let Some(field) = TextField::for_element(name.namespace.as_deref(), &name.local_name)
            {
                self.fields.open(field, self.depth, builder);
            }
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), ParseError> {
        self.fields.push_text(text);
        Ok(())
    }

    fn end_element(&mut self, name: &XmlName) -> Result<(), ParseError> {
        if let Some(builder) = self.current.as_mut() {
            self.fields.close(self.depth, builder, self.position)?;
        }
        self.depth = self.depth.saturating_sub(1);

        if is_deposit(&name.local_name) {
            if let Some(builder) = self.current.take() {
                self.fields.clear();
                let deposit = finish_deposit(builder, self.position)?;
                trace!("callback parser: deposit {} complete", deposit.id);
                self.deposits.push(deposit);
            }
        }
        Ok(())
    }
}
