use clap::Parser;
use docwin_bin::{cli::Cli, commands};
use docwin_log::LogConfig;

fn main() {
    let cli = Cli::parse();

    let log_guard = match docwin_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        },
    };

    let result = commands::run(&cli, &mut std::io::stdout().lock());

    // Flush the log file before exiting.
    drop(log_guard);
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
