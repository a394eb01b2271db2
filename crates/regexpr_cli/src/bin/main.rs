use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use regexpr::{Regex, RegexError, RegexOption, Span};
use serde_json::json;

const VERSION: &str = concat!("regexpr ", env!("CARGO_PKG_VERSION"));

/// Compile PATTERN and print every match in each SUBJECT.
/// With no subjects, subjects are read line by line from stdin.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Compare characters case-insensitively
    #[arg(short = 'i', long)]
    ignore_case: bool,
    /// Print one JSON object per subject instead of text
    #[arg(long)]
    json: bool,
    pattern: String,
    subjects: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let _ = env_logger::try_init();
    let cli = Cli::parse();

    let option = RegexOption::default().case_insensitive(cli.ignore_case);
    let regex = match Regex::with_option(&cli.pattern, option) {
        Ok(regex) => regex,
        Err(err @ RegexError::Syntax { offset, .. }) => {
            eprintln!("{}", cli.pattern);
            eprintln!("{}^", " ".repeat(cli.pattern[..offset].chars().count()));
            eprintln!("error: {err}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!("{} capture groups", regex.group_count());

    let mut out = io::stdout().lock();
    if cli.subjects.is_empty() {
        run_repl(&regex, cli.json, &mut out)?;
    } else {
        for subject in &cli.subjects {
            report(&regex, subject, cli.json, &mut out)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_repl(regex: &Regex, as_json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let interactive = !as_json;
    if interactive {
        writeln!(out, "{VERSION}")?;
        writeln!(out, "pattern: {regex}")?;
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if interactive && matches!(line.trim(), ":q" | ":quit") {
            break;
        }
        report(regex, &line, as_json, out)?;
    }
    Ok(())
}

fn report(regex: &Regex, subject: &str, as_json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if as_json {
        let matches: Vec<_> = regex
            .find_matches(subject)
            .map(|m| json!({ "span": m.span(), "text": m.as_str() }))
            .collect();
        let line = json!({ "subject": subject, "matches": matches });
        writeln!(out, "{line}")?;
        return Ok(());
    }

    let mut count = 0usize;
    for m in regex.find_matches(subject) {
        writeln!(out, "{m}")?;
        count += 1;
    }
    let mut buf = itoa::Buffer::new();
    writeln!(out, "{} match(es) in {:?}", buf.format(count), subject)?;
    Ok(())
}
