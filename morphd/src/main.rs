//! # Morph Host Daemon
//!
//! Main entry point for replaying interaction scripts against a design.

use morph_core::EditorConfig;
use morphd::{HostRuntime, HostRuntimeConfig};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    runtime.run();
}

fn parse_args(args: &[String]) -> Result<HostRuntimeConfig, String> {
    let mut config = HostRuntimeConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = value(args, &mut i, "--config")?;
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file: {}", e))?;
                config.editor = EditorConfig::from_json(&text).map_err(|e| e.to_string())?;
            }
            "--script" | "-s" => {
                let path = value(args, &mut i, "--script")?;
                let script_text = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                config.script = Some(script_text);
            }
            "--load" | "-l" => {
                config.load = Some(PathBuf::from(value(args, &mut i, "--load")?));
            }
            "--max-ticks" => {
                let raw = value(args, &mut i, "--max-ticks")?;
                config.max_ticks = raw
                    .parse()
                    .map_err(|_| format!("Invalid max-ticks value: {}", raw))?;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      Editor config (JSON: width, height, mode, selector)");
    eprintln!("  -s, --script <FILE>      Interaction script to replay");
    eprintln!("  -l, --load <FILE>        Design to load before replaying");
    eprintln!("  --max-ticks <N>          Maximum ticks to run (0 = unlimited)");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --config demos/small_grid.json --script demos/walker.morph", program);
    eprintln!("  {} --load walker.json --script demos/rename.morph", program);
}
