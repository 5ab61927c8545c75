//! # Deposits XML Writer
//!
//! Serializes a [`DepositsDb`] back into the deposits vocabulary read by
//! the parsers, so a loaded (and possibly re-sorted) collection can be
//! saved as a new document.
//!
//! Decimals are written with their stored scale, which makes
//! parse → write → parse lossless.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::deposit::{Deposit, DepositsDb};
use crate::parser::{BANK_NS, FINANCIAL_NS};

/// Root element of a written document
pub const ROOT_ELEMENT: &str = "deposits";

/// Errors that can occur while writing a deposits document
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// I/O error on the destination
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by the XML writer
    #[error("XML writing error: {0}")]
    XmlError(#[from] quick_xml::Error),
}

/// Write `db` as an indented XML document
pub fn write_deposits<W: Write>(db: &DepositsDb, writer: W) -> Result<(), WriteError> {
    let mut xml = Writer::new_with_indent(writer, b' ', 4);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let root = BytesStart::new(ROOT_ELEMENT).with_attributes([
        ("xmlns:bank", BANK_NS),
        ("xmlns:fin", FINANCIAL_NS),
    ]);
    xml.write_event(Event::Start(root))?;

    for deposit in db {
        write_deposit(&mut xml, deposit)?;
    }

    xml.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    xml.into_inner().flush()?;
    Ok(())
}

/// Write `db` to a file, replacing any existing content
pub fn write_deposits_to_file(db: &DepositsDb, path: &Path) -> Result<(), WriteError> {
    let file = File::create(path)?;
    write_deposits(db, BufWriter::new(file))?;
    info!("Wrote {} deposits to {}", db.len(), path.display());
    Ok(())
}

/// Serialize `db` into a string
pub fn deposits_to_string(db: &DepositsDb) -> Result<String, WriteError> {
    let mut buffer = Vec::new();
    write_deposits(db, &mut buffer)?;
    // quick-xml only writes the UTF-8 text it is given
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_deposit<W: Write>(xml: &mut Writer<W>, deposit: &Deposit) -> Result<(), WriteError> {
    let start = BytesStart::new("deposit").with_attributes([
        ("id", deposit.id.as_str()),
        ("type", deposit.deposit_type.as_str()),
        ("bank:name", deposit.name.as_str()),
        ("country", deposit.country.as_str()),
    ]);
    xml.write_event(Event::Start(start))?;

    write_text_element(xml, "depositor", &deposit.depositor)?;
    write_text_element(xml, "account-id", &deposit.account_id.to_string())?;
    write_text_element(
        xml,
        "fin:amount-on-deposit",
        &deposit.amount_on_deposit.to_string(),
    )?;
    write_text_element(xml, "fin:interest", &deposit.interest.to_string())?;
    write_text_element(xml, "time-constraint", &deposit.time_constraint.to_string())?;

    xml.write_event(Event::End(BytesEnd::new("deposit")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), WriteError> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposit::{CountryCode, DepositType};
    use crate::parser::ParserKind;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample_db() -> DepositsDb {
        DepositsDb::from(vec![
            Deposit {
                id: "1".to_string(),
                deposit_type: DepositType::Savings,
                name: "Smith & Sons <Bank>".to_string(),
                country: CountryCode::GB,
                depositor: "Alice".to_string(),
                account_id: 100,
                amount_on_deposit: Decimal::from_str("1000.50").unwrap(),
                interest: Decimal::from_str("2.250").unwrap(),
                time_constraint: 365,
            },
            Deposit {
                id: "2".to_string(),
                deposit_type: DepositType::Metal,
                name: "Gold".to_string(),
                country: CountryCode::CH,
                depositor: "Bob \"B\"".to_string(),
                account_id: -3,
                amount_on_deposit: Decimal::from_str("0.0001").unwrap(),
                interest: Decimal::ZERO,
                time_constraint: 0,
            },
        ])
    }

    #[test]
    fn test_written_document_parses_back() {
        let db = sample_db();
        let xml = deposits_to_string(&db).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<fin:amount-on-deposit>1000.50</fin:amount-on-deposit>"));
        assert!(xml.contains("<fin:interest>2.250</fin:interest>"));

        for kind in ParserKind::ALL {
            let reparsed = kind.parser().parse_str(&xml).unwrap();
            assert_eq!(reparsed, db, "{} parser", kind);
        }
    }

    #[test]
    fn test_write_empty_collection() {
        let xml = deposits_to_string(&DepositsDb::new()).unwrap();
        let reparsed = ParserKind::Cursor.parser().parse_str(&xml).unwrap();
        assert!(reparsed.is_empty());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy.xml");
        write_deposits_to_file(&sample_db(), &path).unwrap();

        let reparsed = ParserKind::Tree.parser().parse(&path).unwrap();
        assert_eq!(reparsed.len(), 2);
    }
}
