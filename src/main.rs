use anyhow::{anyhow, Result};
use std::path::PathBuf;

use tabview::app::App;
use tabview::config::Config;
use tabview::data::csv_loader;
use tabview::data::datatable::DataTable;
use tabview::logging;
use tabview::ui::renderer;

fn print_usage() {
    println!("tabview - interactive viewer for delimited tabular data");
    println!();
    println!("Usage:");
    println!("  tabview [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE, or standard input when FILE is absent.");
    println!();
    println!("Options:");
    println!("  -d <delim>  - field delimiter (default comma; \\t for tab)");
    println!("  -H          - no header row; label columns col_0..col_N");
    println!("  -h, --help  - show this help");
    println!();
    println!("Modes (first character on an empty query line):");
    println!("  /  search    @  command    ^  filter    :  view");
    println!();
    println!("Commands: show, show_only, hide, reset, exit");
}

fn run() -> Result<()> {
    if let Some(path) = logging::init_tracing() {
        tracing::info!(target: "system", path = %path.display(), "log file");
    }

    let mut delimiter_flag: Option<String> = None;
    let mut synthetic_header = false;
    let mut files: Vec<PathBuf> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-d" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("-d requires a delimiter argument"))?;
                delimiter_flag = Some(value);
            }
            "-H" => synthetic_header = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(anyhow!("unknown option: {} (see --help)", arg));
            }
            _ => files.push(PathBuf::from(arg)),
        }
    }

    if files.len() > 1 {
        return Err(anyhow!("only one input file may be given"));
    }

    let config = Config::load();
    let delimiter_str = delimiter_flag.unwrap_or_else(|| config.behavior.delimiter.clone());
    let delimiter = csv_loader::parse_delimiter(&delimiter_str)?;

    let records = csv_loader::load(files.first().map(|p| p.as_path()), delimiter)?;
    let table = DataTable::new(records, synthetic_header)?;
    tracing::info!(
        target: "system",
        rows = table.row_count(),
        cols = table.column_count(),
        "table loaded"
    );

    let mut app = App::new(table, config);
    app.run()?;

    // The exit command asks for one last plain render on the real stdout,
    // after the alternate screen is gone.
    if app.table.dump_on_exit {
        print!("{}", renderer::render_plain(&app.table));
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("tabview: {:#}", e);
        std::process::exit(1);
    }
}
