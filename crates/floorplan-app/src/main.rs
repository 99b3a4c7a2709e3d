//! Main application entry point.
//!
//! Usage: `floorplan <script|-> [out_dir] [--config path]`

use floorplan_app::{App, parse_script};
use floorplan_core::DesignerConfig;
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::{env, fs, io};

const USAGE: &str = "usage: floorplan <script|-> [out_dir] [--config path]";

struct Args {
    script: String,
    out_dir: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(args.next().ok_or(USAGE)?)),
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    let script = positional.next().ok_or(USAGE)?;
    let out_dir = positional.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    Ok(Args {
        script,
        out_dir,
        config,
    })
}

fn read_script(source: &str) -> io::Result<String> {
    if source == "-" {
        let mut script = String::new();
        io::stdin().read_to_string(&mut script)?;
        Ok(script)
    } else {
        fs::read_to_string(source)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Starting floor-plan designer");

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => DesignerConfig::load(path)?,
        None => DesignerConfig::default(),
    };

    let commands = parse_script(&read_script(&args.script)?)?;
    log::info!("running {} commands", commands.len());

    let mut app = App::new(config)?;
    app.run_script(commands);
    app.settle();

    let outputs = app.write_outputs(&args.out_dir)?;
    match &outputs.png {
        Some(png) => println!("{}\n{}", outputs.html.display(), png.display()),
        None => println!("{}", outputs.html.display()),
    }
    Ok(())
}
