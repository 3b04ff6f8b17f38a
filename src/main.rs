//! pagemark CLI: render one document as an XHTML page

use std::io::{self, Read, Write};
use std::process::ExitCode;

use log::debug;
use pagemark::{HtmlOptions, Options};

fn run() -> pagemark::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Simple usage: read from stdin or file
    let input = if args.len() > 1 && args[1] != "-" {
        debug!("reading {}", args[1]);
        std::fs::read_to_string(&args[1])?
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    };

    let options = Options {
        strict_links: std::env::var_os("PAGEMARK_STRICT").is_some(),
    };
    let stdout = io::stdout().lock();
    let mut out = pagemark::render_html(&input, stdout, &HtmlOptions::default(), &options)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pagemark: {e}");
            ExitCode::FAILURE
        }
    }
}
