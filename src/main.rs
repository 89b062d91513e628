use clap::Parser;
use phlogmap::{config, generate, logger, output, scan};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "phlogmap")]
#[command(about = "Generate a gophermap for a directory of phlog posts")]
#[command(long_about = "\
Generate a gophermap for a directory of phlog posts

Takes the contents of DIRECTORY and generates a gophermap based on the
template TEMPLATE (relative to DIRECTORY). The gophermap is written into
DIRECTORY, replacing any existing one.

Directory structure:

  phlog/
  ├── phlogmap.toml                  # Optional config (see --print-config)
  ├── gophermap.tmpl                 # Template
  ├── 2024-05-01__My_First_Post.txt  # Post  → [2024-05-01] My First Post
  ├── 2024-05-09__Notes.md           # Post  → [2024-05-09] Notes
  ├── 2024-06-01__Elsewhere.glink    # Link  → first line is the selector
  ├── 2024-04-20__Photos/            # Directory
  └── AR_2023/                       # Archive → listed by ARCHIVE_LIST as \"2023\"

Template placeholders (one per line):
  {{ FILE_LIST }}     posts and directories, newest first
  {{ ARCHIVE_LIST }}  archive directories, newest first
  {{ DATE_TIME }}     current local date and time")]
#[command(version)]
struct Cli {
    /// Phlog directory to index
    #[arg(value_name = "DIRECTORY", required_unless_present = "print_config")]
    directory: Option<PathBuf>,

    /// Template file, relative to DIRECTORY
    #[arg(value_name = "TEMPLATE", required_unless_present_any = ["print_config", "check"])]
    template: Option<PathBuf>,

    /// Write the gophermap to stdout instead of DIRECTORY
    #[arg(long)]
    stdout: bool,

    /// Only scan DIRECTORY and list what would be included
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// With --check, print the scan result as JSON
    #[arg(long, requires = "check")]
    json: bool,

    /// Print a stock phlogmap.toml with all options documented
    #[arg(long, exclusive = true)]
    print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let directory = cli.directory.ok_or("missing DIRECTORY")?;

    if cli.check {
        let site_config = config::load_config(&directory)?;
        let result = scan::scan(&directory, &scan::Rules::from_config(&site_config))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            output::print_scan_output(&result);
        }
        return Ok(());
    }

    let template = cli.template.ok_or("missing TEMPLATE")?;

    if cli.stdout {
        let stdout = std::io::stdout();
        generate::generate_to(&directory, &template, &mut stdout.lock())?;
    } else {
        let report = generate::generate(&directory, &template)?;
        output::print_generate_output(&report);
    }

    Ok(())
}
