/// curvescript - run a scene script against a terminal canvas
///
/// Usage:
///   curvescript <script-file>
///   curvescript stdin
///
/// Exit status is 0 when the script ends (with or without `quit`), 1 when it
/// fails, and 2 on bad usage.
use std::env;
use std::process;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("curvescript");
        eprintln!("Usage: {program} <script-file | stdin>");
        process::exit(2);
    }

    curvescript_terminal::run_script(&args[1])?;
    Ok(())
}
