use clap::{App, Arg};
use dpllsat::formula::{dimacs, text};
use dpllsat::*;
use std::fs::File;
use std::io::Read;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .arg(Arg::with_name("INPUT").help("input file (one clause per line)").index(1))
        .arg(
            Arg::with_name("dimacs")
                .long("dimacs")
                .help("read DIMACS CNF instead of the line-oriented format"),
        )
        .get_matches();

    let use_dimacs = matches.is_present("dimacs");
    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_from_file(path, use_dimacs)
    } else {
        parse_input(std::io::stdin(), use_dimacs)
    };

    match f {
        Ok(f) => {
            let solver = Solver::new(f);

            let exit_code = match solver.solve() {
                SatResult::Satisfiable(model) => {
                    // a formula with no clauses constrains nothing; the
                    // exit code already says satisfiable
                    if !model.is_empty() {
                        println!("satisfiable");
                        for (variable, value) in model.iter() {
                            println!("{} = {}", variable, value);
                        }
                    }
                    0
                }
                SatResult::Unsatisfiable => {
                    println!("unsatisfiable");
                    1
                }
            };
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("parse error: {:?}", e);
            std::process::exit(-1);
        }
    }
}

fn parse_from_file(path: &str, use_dimacs: bool) -> Result<Formula, ParseError> {
    let file = File::open(path)?;
    parse_input(file, use_dimacs)
}

fn parse_input<R: Read>(input: R, use_dimacs: bool) -> Result<Formula, ParseError> {
    if use_dimacs {
        dimacs::parse(input)
    } else {
        text::parse(input)
    }
}
