use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use deposit_xml::external::{XmllintValidator, XsltprocTransform};
use deposit_xml::parser::ParserKind;
use deposit_xml::processor::{DepositProcessor, SortKey, DEFAULT_REPORT_PATH};

use super::config::Config;

/// Command-line settings of the process command.
///
/// `None` fields fall back to the config file, then to built-in defaults.
pub struct ProcessArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub parser: Option<ParserKind>,
    pub sort: Option<SortKey>,
    pub schema: Option<PathBuf>,
    pub stylesheet: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub skip_validation: bool,
    pub json: bool,
}

/// Validate, load, sort, print and render one deposits document
pub fn run(args: ProcessArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let parser = args
        .parser
        .or(config.processor.parser)
        .unwrap_or(ParserKind::Cursor);
    let sort = args.sort.or(config.processor.sort);
    let schema = args.schema.or(config.processor.schema);
    let stylesheet = args.stylesheet.or(config.processor.stylesheet);
    let report = args
        .report
        .or(config.processor.report)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));

    let validator = config
        .tools
        .xmllint
        .map(XmllintValidator::new)
        .unwrap_or_default();
    let transform = config
        .tools
        .xsltproc
        .map(XsltprocTransform::new)
        .unwrap_or_default();

    info!("Deposit Processor");
    info!("=================");
    info!("Input:  {}", args.input.display());
    info!("Parser: {}", parser);
    if let Some(key) = sort {
        info!("Sort:   {}", key);
    }

    let mut processor = DepositProcessor::new()
        .with_validator(validator)
        .with_transform(transform)
        .with_report_path(report);

    processor
        .open(&args.input)
        .with_context(|| format!("Cannot open {}", args.input.display()))?;
    if let Some(path) = &schema {
        processor.set_schema(path)?;
    }
    if let Some(path) = &stylesheet {
        processor.set_stylesheet(path)?;
    }

    if args.skip_validation {
        warn!("Skipping schema validation");
    } else if schema.is_none() {
        bail!("No schema given; pass --schema or --skip-validation");
    } else if !processor.validate() {
        bail!("{} is not valid against its schema", args.input.display());
    }

    processor
        .read_deposits(parser)
        .context("Failed to load deposits")?;
    if let Some(key) = sort {
        processor.sort_deposits(key)?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&processor.deposits())
            .context("Failed to serialize deposits")?;
        println!("{}", json);
    } else {
        processor.print_deposits();
    }

    if stylesheet.is_some() {
        let output = processor
            .render_report()
            .context("Failed to render report")?;
        info!("Report written to {}", output.display());
    }

    Ok(())
}
