use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mapcard::{logging, ControlCard, ConverterBuilder, WorkbookInfo, DEFAULT_SHEET_NAME};
use rayon::prelude::*;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Accepted spreadsheet extensions
const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xlsb", "xls"];

#[derive(Parser)]
#[command(name = "mapcard")]
#[command(about = "Convert MAPPING spreadsheets into fixed-format control-card text")]
#[command(long_about = "Convert MAPPING spreadsheets into fixed-format control-card text.

The workbook must contain a sheet named MAPPING (case-insensitive) with the
columns Begin, BETA Field Name and Mapping Instructions for Programmer.
Each row becomes one control-card line per mapping option:

  0000 0001  01                                    DEMO-FIELD-NAME

EXAMPLES:
  mapcard convert Input1.xlsx                 # writes Input1.txt
  mapcard convert Input1.xlsx Input2.xlsx     # converts both in parallel
  mapcard convert Input1.xlsx --stdout        # print instead of writing
  mapcard info Input1.xlsx --json             # list sheets and headers")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one or more workbooks into control-card text files
    Convert {
        /// Input workbooks (.xlsx, .xlsm, .xlsb, .xls)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (single input only; default: <input>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the control card to stdout instead of a file (single input only)
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Omit the banner header block
        #[arg(long)]
        no_header: bool,

        /// Name of the mapping sheet (case-insensitive)
        #[arg(long, env = "MAPCARD_SHEET", default_value = DEFAULT_SHEET_NAME)]
        sheet: String,

        /// Print a per-file summary on stderr
        #[arg(long, value_enum)]
        summary: Option<SummaryFormat>,
    },

    /// Show sheet names, sizes and header rows of a workbook
    Info {
        /// Input workbook
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct FileSummary<'a> {
    file: &'a Path,
    output: Option<&'a Path>,
    #[serde(flatten)]
    summary: mapcard::ConversionSummary,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "warn" });

    let result = match cli.command {
        Commands::Convert {
            inputs,
            output,
            stdout,
            no_header,
            sheet,
            summary,
        } => convert(&inputs, output, stdout, !no_header, sheet, summary),
        Commands::Info { input, json } => info(&input, json),
    };

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(exit_status(&result))
}

/// `Ok(true)`のみ0、部分的な失敗とエラーは1
fn exit_status(result: &Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}

/// Returns `Ok(false)` when at least one input failed to convert
fn convert(
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    stdout: bool,
    include_header: bool,
    sheet: String,
    summary: Option<SummaryFormat>,
) -> Result<bool> {
    check_single_input(inputs, output.as_deref(), stdout)?;
    for input in inputs {
        check_extension(input)?;
    }

    let converter = ConverterBuilder::new()
        .with_sheet_name(sheet)
        .include_header(include_header)
        .build()?;

    // Each input gets its own workbook handle; results keep input order
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| converter.convert_path(input))
        .collect();

    let mut all_ok = true;
    for (input, result) in inputs.iter().zip(results) {
        let card = match result {
            Ok(card) => card,
            Err(e) => {
                eprintln!("{}: {}", input.display(), e);
                all_ok = false;
                continue;
            }
        };

        let written = if stdout {
            write_stdout(&card).map(|()| None)
        } else {
            let path = output_path(input, output.as_deref());
            write_card(&card, &path).map(|()| Some(path))
        };
        let written = match written {
            Ok(written) => written,
            Err(e) => {
                eprintln!("{}: {:#}", input.display(), e);
                all_ok = false;
                continue;
            }
        };

        if let Some(format) = summary {
            print_summary(format, input, written.as_deref(), &card)?;
        }
    }

    Ok(all_ok)
}

fn check_single_input(inputs: &[PathBuf], output: Option<&Path>, stdout: bool) -> Result<()> {
    if inputs.len() > 1 && (output.is_some() || stdout) {
        bail!("--output and --stdout accept a single input file");
    }
    Ok(())
}

/// 出力先。指定が無ければ入力と同じ場所の`<input>.txt`
fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("txt"))
}

fn check_extension(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        bail!(
            "{}: please provide an Excel file (.xlsx, .xlsm, .xlsb or .xls)",
            path.display()
        );
    }
    Ok(())
}

fn write_stdout(card: &ControlCard) -> Result<()> {
    let out = io::stdout();
    let mut handle = out.lock();
    card.write_to(&mut handle)?;
    writeln!(handle)?;
    Ok(())
}

fn write_card(card: &ControlCard, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    card.write_to(file)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn print_summary(
    format: SummaryFormat,
    input: &Path,
    output: Option<&Path>,
    card: &ControlCard,
) -> Result<()> {
    let summary = card.summary();
    match format {
        SummaryFormat::Text => {
            eprintln!(
                "{}: {} lines, {} field mappings from {} rows{}",
                input.display(),
                summary.total_lines,
                summary.field_mappings,
                summary.rows_processed,
                output
                    .map(|p| format!(" -> {}", p.display()))
                    .unwrap_or_default()
            );
            if summary.coerced_begin_values > 0 {
                eprintln!(
                    "  {} Begin values were not numeric and were written as 0000",
                    summary.coerced_begin_values
                );
            }
        }
        SummaryFormat::Json => {
            let record = FileSummary {
                file: input,
                output,
                summary,
            };
            eprintln!("{}", serde_json::to_string(&record)?);
        }
    }
    Ok(())
}

fn info(input: &Path, json: bool) -> Result<bool> {
    let converter = ConverterBuilder::new().build()?;
    let file = std::fs::File::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let info = converter.inspect(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_info(input, &info);
    }
    Ok(true)
}

fn print_info(input: &Path, info: &WorkbookInfo) {
    println!("File: {}", input.display());
    println!("Sheets: {}", info.num_sheets);
    for sheet in &info.sheets {
        println!();
        println!("Sheet '{}':", sheet.name);
        println!("  Rows: {}", sheet.rows);
        println!("  Columns: {}", sheet.columns);
        println!("  Column names: {}", sheet.column_names.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_mapping(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("MAPPING").unwrap();
        sheet.write_string(0, 0, "Begin").unwrap();
        sheet.write_string(0, 1, "BETA Field Name").unwrap();
        sheet.write_string(0, 2, "Mapping Instructions for Programmer").unwrap();
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_string(1, 1, "PER-ACCOUNT").unwrap();
        sheet.write_string(1, 2, "Copy").unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_output_conflicts_with_stdout() {
        let parsed = Cli::try_parse_from(["mapcard", "convert", "a.xlsx", "-o", "a.txt", "--stdout"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_convert_defaults() {
        let cli = Cli::try_parse_from(["mapcard", "convert", "a.xlsx"]).unwrap();
        match cli.command {
            Commands::Convert {
                inputs,
                output,
                stdout,
                no_header,
                summary,
                ..
            } => {
                assert_eq!(inputs, vec![PathBuf::from("a.xlsx")]);
                assert!(output.is_none());
                assert!(!stdout);
                assert!(!no_header);
                assert!(summary.is_none());
            }
            Commands::Info { .. } => panic!("Expected convert command"),
        }
    }

    #[test]
    fn test_check_extension_accepts_spreadsheets() {
        for name in ["a.xlsx", "b.xlsm", "c.xlsb", "d.xls", "E.XLSX"] {
            assert!(check_extension(Path::new(name)).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_check_extension_rejects_other_files() {
        for name in ["a.csv", "b.txt", "noext"] {
            let err = check_extension(Path::new(name)).unwrap_err().to_string();
            assert!(err.contains(".xlsx, .xlsm, .xlsb or .xls"), "{}", err);
        }
    }

    #[test]
    fn test_output_path_defaults_to_txt() {
        assert_eq!(
            output_path(Path::new("dir/Input1.xlsx"), None),
            PathBuf::from("dir/Input1.txt")
        );
        assert_eq!(
            output_path(Path::new("Input1.xlsx"), Some(Path::new("out/card.txt"))),
            PathBuf::from("out/card.txt")
        );
    }

    #[test]
    fn test_single_input_rule() {
        let one = vec![PathBuf::from("a.xlsx")];
        let two = vec![PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")];

        assert!(check_single_input(&one, Some(Path::new("out.txt")), false).is_ok());
        assert!(check_single_input(&one, None, true).is_ok());
        assert!(check_single_input(&two, None, false).is_ok());
        assert!(check_single_input(&two, Some(Path::new("out.txt")), false).is_err());
        assert!(check_single_input(&two, None, true).is_err());
    }

    #[test]
    fn test_exit_status_mapping() {
        assert_eq!(exit_status(&Ok(true)), 0);
        assert_eq!(exit_status(&Ok(false)), 1);
        assert_eq!(exit_status(&Err(anyhow::anyhow!("boom"))), 1);
    }

    #[test]
    fn test_convert_writes_txt_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Input1.xlsx");
        write_mapping(&input);

        let ok = convert(&[input.clone()], None, false, true, "MAPPING".to_string(), None).unwrap();
        assert!(ok);

        let text = std::fs::read_to_string(dir.path().join("Input1.txt")).unwrap();
        assert!(text.ends_with("DEMO-ACCOUNT"));
    }

    #[test]
    fn test_convert_continues_after_failed_input() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.xlsx");
        std::fs::write(&broken, b"not a workbook").unwrap();
        let good = dir.path().join("good.xlsx");
        write_mapping(&good);

        let ok = convert(
            &[broken, good],
            None,
            false,
            false,
            "MAPPING".to_string(),
            None,
        )
        .unwrap();
        assert!(!ok);
        assert!(dir.path().join("good.txt").exists());
    }

    #[test]
    fn test_convert_reports_write_failure() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Input1.xlsx");
        write_mapping(&input);
        let unwritable = dir.path().join("missing").join("out.txt");

        let ok = convert(
            &[input],
            Some(unwritable),
            false,
            true,
            "MAPPING".to_string(),
            None,
        )
        .unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_convert_rejects_multiple_inputs_with_output() {
        let inputs = vec![PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")];
        let result = convert(
            &inputs,
            Some(PathBuf::from("out.txt")),
            false,
            true,
            "MAPPING".to_string(),
            None,
        );
        assert!(result.is_err());
    }
}
