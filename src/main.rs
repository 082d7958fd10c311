
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod lang;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::collections::HashMap;
use std::io;
use std::path::Path;

use lang::ast::Node;
use lang::interpreter::Interpreter;
use lang::parser::Parser;

/// Program run when no input file is given.
const DEFAULT_INPUT: &str = "samples/example.asmp";

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tParse Only: {}\n\tShow Listing: {}\n\tShow Registers: {}\n\tInfile: {}",
        verbosity(args.occurrences_of("verbose")),
        args.is_present("no-run"),
        args.is_present("print-debug"),
        args.is_present("registers"),
        args.value_of("INPUT").unwrap_or(DEFAULT_INPUT)
    );

    let ipath = Path::new(args.value_of("INPUT").unwrap_or(DEFAULT_INPUT));

    let bytes = match std::fs::read(&ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(bytes) => bytes,
    };

    // Invalid UTF-8 decodes to U+FFFD, which the lexer skips like any
    // other unrecognized character.
    let tokens = lang::lexer::tokenize(&String::from_utf8_lossy(&bytes));
    info!("read {} token(s) from `{}`", tokens.len(), ipath.display());

    let (ast, errors) = Parser::new(tokens).run();
    if !errors.is_empty() {
        warn!("`{}`: {} malformed statement(s) skipped", ipath.display(), errors.len());
    }

    if args.is_present("print-debug") {
        print_listing(&ast);
    }

    if args.is_present("no-run") {
        return;
    }

    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(stdout.lock());
    let result = interpreter.interpret(&ast);
    debug!("final flags: {:?}", interpreter.flags());

    if args.is_present("registers") {
        print_registers(interpreter.registers());
    }

    if let Err(err) = result {
        error!("fatal: {}", err);
        std::process::exit(1);
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("asmp"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the program to run (defaults to samples/example.asmp)")
            .required(false)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("no-run")
            .short("n")
            .long("no-run")
            .takes_value(false)
            .help("parse only, do not execute"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("show")
            .alias("s")
            .takes_value(false)
            .help("prints the parsed statement listing to STDOUT before running"))
        .arg(Arg::with_name("registers")
            .short("r")
            .long("registers")
            .takes_value(false)
            .help("prints the register file to STDOUT after running"))
        .get_matches()
}

fn verbosity(occurrences: u64) -> log::LevelFilter {
    match occurrences {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn initialize_logging(occurrences: u64) {
    // Program output owns stdout, so log records go to stderr.
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity(occurrences))
        .chain(std::io::stderr())
        .apply().ok();
}

fn print_listing(ast: &[Node]) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, node) in ast.iter().enumerate() {
        grid.add(Cell::from(format!("{:04}:", idx)));
        grid.add(Cell::from(format!("{}", node)));
    }

    println!("{}", grid.fit_into_columns(2));
}

fn print_registers(registers: &HashMap<String, i32>) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    let mut names: Vec<&String> = registers.keys().collect();
    names.sort();
    for name in names {
        grid.add(Cell::from(name.clone()));
        grid.add(Cell::from("=".to_string()));
        grid.add(Cell::from(registers[name].to_string()));
    }

    println!("{}", grid.fit_into_columns(3));
}
