use clap::{Parser, Subcommand};
use frac_repl::prelude::*;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::Level;

#[derive(Parser)]
#[command(name = "frac-repl")]
#[command(about = "Exact fraction and mixed fraction calculator")]
#[command(version)]
struct Cli {
    /// Read literals as mixed fractions (`i/n/d`) and print results mixed
    #[arg(long, global = true)]
    mixed: bool,

    /// Log more, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive REPL
    Repl,
    /// Evaluate each expression and print its result
    Eval { exprs: Vec<String> },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.mixed { Mode::Mixed } else { Mode::Simple };
    let mut dispatcher = Dispatcher::new(mode);

    let code = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => run_repl(&mut dispatcher),
        Commands::Eval { exprs } => run_eval(&mut dispatcher, &exprs),
    };
    std::process::exit(code);
}

fn run_eval(dispatcher: &mut Dispatcher, exprs: &[String]) -> i32 {
    for expr in exprs {
        match dispatcher.dispatch(expr) {
            DispatchResult::Success(Some(output)) => println!("{}", output),
            DispatchResult::Success(None) => {}
            DispatchResult::Failure(message) => {
                eprintln!("Error: {}", message);
                return 1;
            }
        }
    }
    0
}

fn run_repl(dispatcher: &mut Dispatcher) -> i32 {
    println!("Fractions: `1/2 + 1/3`, `2/1/4 * 3`, `sqrt 9/4`, `gcd 24 36`, `:mixed`.");
    println!("Type 'exit' to quit.");

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error starting editor: {}", e);
            return 1;
        }
    };
    let mut line_number = 1;

    loop {
        let prompt = format!("frac[{}]> ", line_number);

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                let _ = rl.add_history_entry(line);

                match dispatcher.dispatch(line) {
                    DispatchResult::Success(Some(output)) => println!("{}", output),
                    DispatchResult::Success(None) => {}
                    DispatchResult::Failure(message) => eprintln!("Error: {}", message),
                }
                line_number += 1;
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error reading line: {}", err);
                return 1;
            }
        }
    }
    0
}
