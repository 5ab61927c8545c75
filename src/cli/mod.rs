use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use deposit_xml::parser::ParserKind;
use deposit_xml::processor::SortKey;

mod compare;
mod config;
mod copy;
mod process;
mod validate;

pub use process::ProcessArgs;

/// deposit-processor - Load, validate, sort and report bank deposit records
#[derive(Parser)]
#[command(name = "deposit-processor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Parser strategy used to load the document.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ParserArg {
    /// Whole document tree in memory
    Tree,
    /// Push-style content handler
    Callback,
    /// Explicit pull loop over events
    Cursor,
}

/// Sort order for loaded deposits.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortArg {
    /// Depositor name
    Depositor,
    /// Amount on deposit
    Amount,
    /// Time constraint
    Time,
}

impl From<ParserArg> for ParserKind {
    fn from(arg: ParserArg) -> Self {
        match arg {
            ParserArg::Tree => ParserKind::Tree,
            ParserArg::Callback => ParserKind::Callback,
            ParserArg::Cursor => ParserKind::Cursor,
        }
    }
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Depositor => SortKey::Depositor,
            SortArg::Amount => SortKey::Amount,
            SortArg::Time => SortKey::TimeConstraint,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate, load, sort, print and render a deposits document
    Process {
        /// Input deposits XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Parser strategy (tree, callback, cursor; default: cursor)
        #[arg(short = 'p', long, value_enum)]
        parser: Option<ParserArg>,

        /// Sort key (depositor, amount, time); document order when omitted
        #[arg(short = 's', long, value_enum)]
        sort: Option<SortArg>,

        /// XML Schema used for validation
        #[arg(long, value_name = "XSD")]
        schema: Option<PathBuf>,

        /// XSLT stylesheet used to render the report
        #[arg(long, value_name = "XSL")]
        stylesheet: Option<PathBuf>,

        /// Output path of the rendered HTML report
        #[arg(long, value_name = "HTML")]
        report: Option<PathBuf>,

        /// Load the document even when no schema is available or it is invalid
        #[arg(long)]
        skip_validation: bool,

        /// Print the loaded deposits as JSON instead of text lines
        #[arg(long)]
        json: bool,
    },

    /// Validate a deposits document against an XML Schema
    Validate {
        /// Input deposits XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// XML Schema file
        #[arg(long, value_name = "XSD")]
        schema: PathBuf,
    },

    /// Parse a document with every strategy and check that they agree
    Compare {
        /// Input deposits XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Load a document and write the deposits back out as XML
    Copy {
        /// Input deposits XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output XML file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Parser strategy (tree, callback, cursor)
        #[arg(short = 'p', long, default_value = "cursor", value_enum)]
        parser: ParserArg,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            input,
            config,
            parser,
            sort,
            schema,
            stylesheet,
            report,
            skip_validation,
            json,
        } => process::run(ProcessArgs {
            input,
            config,
            parser: parser.map(ParserKind::from),
            sort: sort.map(SortKey::from),
            schema,
            stylesheet,
            report,
            skip_validation,
            json,
        }),
        Commands::Validate { input, schema } => validate::run(input, schema),
        Commands::Compare { input } => compare::run(input),
        Commands::Copy {
            input,
            output,
            parser,
        } => copy::run(input, output, ParserKind::from(parser)),
    }
}
