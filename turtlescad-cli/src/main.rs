//! `turtlescad` CLI: run a turtle script and print OpenSCAD polygons.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use turtlescad_core::error::Severity;
use turtlescad_core::interpreter::Interpreter;
use turtlescad_geometry::turtle::TurtleOptions;
use turtlescad_geometry::types::{DEFAULT_CAP_FACETS, DEFAULT_PEN_WIDTH};
use turtlescad_scad::{RenderOptions, render_with_options};

#[derive(Parser)]
#[command(version, about = "Turn turtle-graphics scripts into OpenSCAD polygons")]
struct Cli {
    /// Script file to run
    file: Option<PathBuf>,

    /// Run the given script text instead of reading a file
    #[arg(short = 'e', long = "eval", conflicts_with = "file")]
    eval: Option<String>,

    /// Write OpenSCAD output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decimal places for coordinates
    #[arg(long, default_value_t = 6)]
    precision: usize,

    /// Initial end-cap facet count (even, at least 2)
    #[arg(long, default_value_t = DEFAULT_CAP_FACETS)]
    end_cap_sides: u32,

    /// Initial pen width
    #[arg(long, default_value_t = DEFAULT_PEN_WIDTH)]
    pen_width: f64,

    /// Log more detail to stderr (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = read_source(&cli);

    let options = TurtleOptions {
        pen_width: cli.pen_width,
        cap_facets: cli.end_cap_sides,
    };
    let mut interp = match Interpreter::new(options) {
        Ok(interp) => interp,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let run_err = interp.run(&source).err();
    print_diagnostics(&interp);
    if let Some(e) = run_err {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let opts = RenderOptions {
        precision: cli.precision,
    };
    let scad = render_with_options(interp.drawing(), &opts);
    write_output(cli.output.as_ref(), &scad);
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_diagnostics(interp: &Interpreter) {
    for diag in interp.diagnostics() {
        match diag.severity {
            Severity::Warning => eprintln!("Warning: {diag}"),
            Severity::Error => eprintln!("Error: {diag}"),
        }
    }
}

fn read_source(cli: &Cli) -> String {
    if let Some(ref script) = cli.eval {
        return script.clone();
    }
    if let Some(ref file) = cli.file {
        match fs::read_to_string(file) {
            Ok(s) => {
                debug!(file = %file.display(), bytes = s.len(), "read script");
                return s;
            }
            Err(e) => {
                eprintln!("Error reading {}: {e}", file.display());
                process::exit(1);
            }
        }
    }
    eprintln!("No input file or script specified");
    process::exit(1);
}

fn write_output(path: Option<&PathBuf>, content: &str) {
    let Some(path) = path else {
        print!("{content}");
        return;
    };
    match fs::write(path, content) {
        Ok(()) => {
            eprintln!("Wrote {}", path.display());
        }
        Err(e) => {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        }
    }
}
