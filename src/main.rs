//! pdftoc - Edit the bookmarks of PDF files through a plain-text TOC.

use clap::Parser;
use std::process;

use pdftoc::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and are not failures.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    if let Err(err) = pdftoc::run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}
