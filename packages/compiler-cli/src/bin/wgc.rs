/**
 * Widget Compiler CLI - wgc
 *
 * Compiles page descriptions into view modules
 */
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use std::path::PathBuf;
use std::process;

use widget_compiler_cli::{run, RunOptions};

fn main() {
    let matches = Command::new("wgc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Widget tree compiler")
        .arg(
            Arg::new("inputs")
                .value_name("FILE_OR_GLOB")
                .num_args(0..)
                .help("Page descriptions to compile (defaults to the project's include patterns)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to wgc.json"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Directory the generated modules are written to"),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .action(ArgAction::SetTrue)
                .help("Render broken widget links as placeholders instead of failing"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("More log output (repeatable)"),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = matches.get_one::<String>("config").map(PathBuf::from).or_else(|| {
        let default = PathBuf::from("wgc.json");
        default.exists().then_some(default)
    });
    let options = RunOptions {
        inputs: matches
            .get_many::<String>("inputs")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        config,
        out_dir: matches.get_one::<String>("out-dir").map(PathBuf::from),
        lenient: matches.get_flag("lenient"),
    };

    match run(&options) {
        Ok(summary) if summary.is_success() => {}
        Ok(summary) => {
            for (input, message) in &summary.failed {
                eprintln!("Error: {}: {}", input.display(), message);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
