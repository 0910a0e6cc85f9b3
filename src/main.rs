use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::exit,
    rc::Rc,
    time::Instant,
};

use clap::{Parser, Subcommand};
use finescript::{
    display_error,
    errors::errors::Error,
    interpreter::{
        environment::Environment,
        interpreter::{evaluate_program, interpret},
        native::create_global_environment,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
};
use tracing::{info, level_filters::LevelFilter};

#[derive(Parser)]
#[command(name = "finescript", version, about = "The finescript interpreter")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a finescript source file
    Run {
        file: PathBuf,
        /// Print the token stream
        #[arg(long)]
        show_tokens: bool,
        /// Print the parsed program
        #[arg(long)]
        show_ast: bool,
        /// Print the value of the last statement
        #[arg(long)]
        show_result: bool,
        /// Print phase timings
        #[arg(long)]
        show_time: bool,
    },
}

struct RunOptions {
    show_tokens: bool,
    show_ast: bool,
    show_result: bool,
    show_time: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn report(errors: &[Error], source: &str) {
    for error in errors {
        display_error(error, source);
    }
}

fn run_file(file: PathBuf, options: RunOptions) -> Result<(), ()> {
    let source = read_to_string(&file).map_err(|error| {
        eprintln!("Error: cannot read {}: {}", file.display(), error);
    })?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string());

    let start = Instant::now();
    let tokens = tokenize(source.clone(), Some(file_name.clone())).map_err(|error| report(&[error], &source))?;
    if options.show_time {
        println!("Tokenized in {:?}", start.elapsed());
    }
    info!(elapsed = ?start.elapsed(), count = tokens.len(), "Tokenized");

    if options.show_tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let (program, errors) = parse(tokens, Rc::new(file_name));
    if options.show_time {
        println!("Parsed in {:?}", parse_start.elapsed());
    }
    info!(elapsed = ?parse_start.elapsed(), statements = program.body.len(), "Parsed");

    if options.show_ast {
        println!("{:#?}", program);
    }
    if !errors.is_empty() {
        report(&errors, &source);
        return Err(());
    }

    let eval_start = Instant::now();
    let env = create_global_environment();
    let result = evaluate_program(&program, &env).map_err(|error| report(&[error], &source))?;
    if options.show_time {
        println!("Evaluated in {:?}", eval_start.elapsed());
        println!("Total time: {:?}", start.elapsed());
    }
    info!(elapsed = ?eval_start.elapsed(), "Evaluated");

    if options.show_result {
        println!("{}", result);
    }

    Ok(())
}

fn repl() {
    let env: Environment = create_global_environment();
    let stdin = io::stdin();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => {
                eprintln!("Error: {}", error);
                break;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        match interpret(&line, None, &env) {
            Ok(value) => println!("{}", value),
            Err(errors) => report(&errors, &line),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => repl(),
        Some(Commands::Run {
            file,
            show_tokens,
            show_ast,
            show_result,
            show_time,
        }) => {
            let options = RunOptions {
                show_tokens,
                show_ast,
                show_result,
                show_time,
            };

            if run_file(file, options).is_err() {
                exit(1);
            }
        }
    }
}
