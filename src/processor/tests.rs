use super::*;
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

const TWO_DEPOSITS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<deposits xmlns:bank="www.example.org/xmlns/bank"
          xmlns:fin="www.example.org/xmlns/financial">
    <deposit id="1" type="savings" bank:name="First Bank" country="US">
        <depositor>Alice</depositor>
        <account-id>100</account-id>
        <fin:amount-on-deposit>1000.50</fin:amount-on-deposit>
        <fin:interest>2.25</fin:interest>
        <time-constraint>365</time-constraint>
    </deposit>
    <deposit id="2" type="demand" bank:name="Zweite Bank" country="DE">
        <depositor>Bob</depositor>
        <account-id>200</account-id>
        <fin:amount-on-deposit>500.00</fin:amount-on-deposit>
        <fin:interest>1.10</fin:interest>
        <time-constraint>180</time-constraint>
    </deposit>
</deposits>"#;

/// Validator that accepts or rejects everything and records its calls
#[derive(Clone, Default)]
struct FakeValidator {
    reject: bool,
    calls: Rc<RefCell<Vec<(PathBuf, PathBuf)>>>,
}

impl SchemaValidator for FakeValidator {
    fn validate(&self, document: &Path, schema: &Path) -> Result<(), ToolError> {
        self.calls
            .borrow_mut()
            .push((document.to_path_buf(), schema.to_path_buf()));
        if self.reject {
            Err(ToolError::Spawn {
                program: "fake".to_string(),
                source: io::Error::new(io::ErrorKind::Other, "rejected"),
            })
        } else {
            Ok(())
        }
    }
}

/// Transform that writes a fixed HTML body
struct FakeTransform;

impl StyleTransform for FakeTransform {
    fn render(
        &self,
        _document: &Path,
        _stylesheet: &Path,
        output: &Path,
    ) -> Result<PathBuf, ToolError> {
        std::fs::write(output, "<html/>").map_err(|source| ToolError::Spawn {
            program: "fake".to_string(),
            source,
        })?;
        Ok(output.to_path_buf())
    }
}

fn workspace() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let xml = dir.path().join("deposits.xml");
    std::fs::write(&xml, TWO_DEPOSITS).unwrap();
    (dir, xml)
}

fn ids(processor: &DepositProcessor) -> Vec<String> {
    processor
        .deposits()
        .unwrap()
        .iter()
        .map(|d| d.id.clone())
        .collect()
}

#[test]
fn test_open_missing_file_keeps_reference() {
    let mut processor = DepositProcessor::new();
    let err = processor.open("/no/such/deposits.xml").unwrap_err();
    assert!(matches!(
        err,
        ProcessorError::MissingFile { role: FileRole::Document, .. }
    ));
    assert_eq!(processor.xml_file(), Some(Path::new("/no/such/deposits.xml")));

    assert!(processor.set_schema("/no/such.xsd").is_err());
    assert!(processor.set_stylesheet("/no/such.xsl").is_err());
    assert!(processor.schema_file().is_some());
    assert!(processor.stylesheet_file().is_some());
}

#[test]
fn test_validate_preconditions() {
    let validator = FakeValidator::default();
    let mut processor = DepositProcessor::new().with_validator(validator.clone());
    assert!(!processor.validate());

    let (dir, xml) = workspace();
    processor.open(&xml).unwrap();
    assert!(!processor.validate());
    assert!(validator.calls.borrow().is_empty());

    let xsd = dir.path().join("deposits.xsd");
    std::fs::write(&xsd, "<schema/>").unwrap();
    processor.set_schema(&xsd).unwrap();
    assert!(processor.validate());
    assert_eq!(validator.calls.borrow().as_slice(), &[(xml, xsd)]);
}

#[test]
fn test_validate_rejected() {
    let (dir, xml) = workspace();
    let xsd = dir.path().join("deposits.xsd");
    std::fs::write(&xsd, "<schema/>").unwrap();

    let mut processor = DepositProcessor::new().with_validator(FakeValidator {
        reject: true,
        ..Default::default()
    });
    processor.open(&xml).unwrap();
    processor.set_schema(&xsd).unwrap();
    assert!(!processor.validate());
}

#[test]
fn test_read_requires_document() {
    let mut processor = DepositProcessor::new();
    assert!(matches!(
        processor.read_deposits(ParserKind::Tree),
        Err(ProcessorError::NoDocument)
    ));
    assert!(processor.deposits().is_none());
}

#[test]
fn test_read_with_every_strategy() {
    let (_dir, xml) = workspace();
    let mut processor = DepositProcessor::new();
    processor.open(&xml).unwrap();

    for kind in ParserKind::ALL {
        let db = processor.read_deposits(kind).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(ids(&processor), ["1", "2"]);
    }
}

#[test]
fn test_failed_read_leaves_collection_unset() {
    let (dir, xml) = workspace();
    let mut processor = DepositProcessor::new();
    processor.open(&xml).unwrap();
    processor.read_deposits(ParserKind::Cursor).unwrap();

    let broken = dir.path().join("broken.xml");
    std::fs::write(&broken, TWO_DEPOSITS.replace("<depositor>Bob</depositor>", "")).unwrap();
    processor.open(&broken).unwrap();

    let err = processor.read_deposits(ParserKind::Callback).unwrap_err();
    assert!(matches!(err, ProcessorError::Parse(ParseError::MissingField { .. })));
    assert!(processor.deposits().is_none());
}

#[test]
fn test_sort_by_time_constraint() {
    let (_dir, xml) = workspace();
    let mut processor = DepositProcessor::new();
    processor.open(&xml).unwrap();
    processor.read_deposits(ParserKind::Tree).unwrap();

    processor.sort_deposits(SortKey::TimeConstraint).unwrap();
    assert_eq!(ids(&processor), ["2", "1"]);

    processor.sort_deposits(SortKey::Depositor).unwrap();
    assert_eq!(ids(&processor), ["1", "2"]);

    processor.sort_deposits(SortKey::Amount).unwrap();
    assert_eq!(ids(&processor), ["2", "1"]);
}

#[test]
fn test_sort_is_stable() {
    let (dir, _) = workspace();
    let xml = dir.path().join("ties.xml");
    let doc = TWO_DEPOSITS
        .replace("<depositor>Bob</depositor>", "<depositor>Alice</depositor>")
        .replace("500.00", "1000.5")
        .replace("<time-constraint>180</time-constraint>", "<time-constraint>365</time-constraint>");
    std::fs::write(&xml, doc).unwrap();

    let mut processor = DepositProcessor::new();
    processor.open(&xml).unwrap();
    processor.read_deposits(ParserKind::Cursor).unwrap();

    for key in SortKey::ALL {
        processor.sort_deposits(key).unwrap();
        assert_eq!(ids(&processor), ["1", "2"], "sort by {}", key);
    }
}

#[test]
fn test_sort_without_deposits() {
    let mut processor = DepositProcessor::new();
    assert!(matches!(
        processor.sort_deposits(SortKey::Amount),
        Err(ProcessorError::NotLoaded)
    ));
}

#[test]
fn test_sort_key_selector() {
    assert_eq!("depositor".parse::<SortKey>().unwrap(), SortKey::Depositor);
    assert_eq!("amount".parse::<SortKey>().unwrap(), SortKey::Amount);
    assert_eq!("time".parse::<SortKey>().unwrap(), SortKey::TimeConstraint);
    assert_eq!("time-constraint".parse::<SortKey>().unwrap(), SortKey::TimeConstraint);

    let err = "interest".parse::<SortKey>().unwrap_err();
    assert_eq!(err.kind, "sort key");
}

#[test]
fn test_print() {
    let mut out = Vec::new();
    let mut processor = DepositProcessor::new();
    processor.print_deposits_to(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Could not print: no deposits loaded.\n"
    );

    let (_dir, xml) = workspace();
    processor.open(&xml).unwrap();
    processor.read_deposits(ParserKind::Cursor).unwrap();

    let mut out = Vec::new();
    processor.print_deposits_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[1] Alice"));
    assert!(lines[1].contains("amount 500.00"));
}

#[test]
fn test_render_report() {
    let (dir, xml) = workspace();
    let report = dir.path().join("report.html");
    let mut processor = DepositProcessor::new()
        .with_transform(FakeTransform)
        .with_report_path(&report);

    assert!(matches!(
        processor.render_report(),
        Err(ProcessorError::NoStylesheet)
    ));

    let xsl = dir.path().join("deposits.xsl");
    std::fs::write(&xsl, "<xsl/>").unwrap();
    processor.set_stylesheet(&xsl).unwrap();
    assert!(matches!(
        processor.render_report(),
        Err(ProcessorError::NoDocument)
    ));

    processor.open(&xml).unwrap();
    assert_eq!(processor.render_report().unwrap(), report);
    assert!(report.exists());
}

#[test]
fn test_write_copy() {
    let (dir, xml) = workspace();
    let copy = dir.path().join("copy.xml");
    let mut processor = DepositProcessor::new();
    assert!(matches!(
        processor.write_copy(&copy),
        Err(ProcessorError::NotLoaded)
    ));

    processor.open(&xml).unwrap();
    processor.read_deposits(ParserKind::Tree).unwrap();
    processor.sort_deposits(SortKey::TimeConstraint).unwrap();
    processor.write_copy(&copy).unwrap();

    let sorted = processor.take_deposits().unwrap();
    assert!(processor.deposits().is_none());

    processor.open(&copy).unwrap();
    assert_eq!(processor.read_deposits(ParserKind::Callback).unwrap(), &sorted);
}
