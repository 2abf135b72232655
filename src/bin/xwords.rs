extern crate clap;
use std::{fs::File, path::Path, time::Duration};

use clap::{App, Arg};
use log::info;
use xwords_gen::{
    crossword::Crossword,
    fill::{backtrack::BacktrackingFiller, FillOptions, Filler},
    parse::{parse_words, parse_words_json},
    puzzle::Puzzle,
};

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("xwords")
        .arg(
            Arg::with_name("structure")
                .short("s")
                .long("structure")
                .value_name("FILE")
                .help("Crossword structure; * or # marks a blocked cell, anything else (spaces too) is open")
                .required(true),
        )
        .arg(
            Arg::with_name("words")
                .short("w")
                .long("words")
                .value_name("FILE")
                .help("Word list, one word per line or a JSON array")
                .required(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Also write the filled grid to this file"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for breaking ties between equally good slots"),
        )
        .arg(
            Arg::with_name("timeout")
                .short("t")
                .long("timeout")
                .value_name("SECONDS")
                .help("Give up after this many seconds"),
        )
        .arg(
            Arg::with_name("profile")
                .short("p")
                .long("profile")
                .takes_value(false),
        )
        .get_matches();

    let structure = matches.value_of("structure").expect("structure not included");
    let structure = std::fs::read_to_string(structure)
        .map_err(|err| format!("Failed to read structure: {}", err))?;
    let crossword = Crossword::new(structure)?;

    let words_path = matches.value_of("words").expect("words not included");
    let words = if Path::new(words_path).extension().map_or(false, |ext| ext == "json") {
        let file =
            File::open(words_path).map_err(|err| format!("Failed to open word list: {}", err))?;
        parse_words_json(file)?
    } else {
        let contents = std::fs::read_to_string(words_path)
            .map_err(|err| format!("Failed to read word list: {}", err))?;
        parse_words(&contents)
    };

    let seed = match matches.value_of("seed") {
        Some(seed) => Some(
            seed.parse::<u64>()
                .map_err(|_| String::from("Failed to parse seed"))?,
        ),
        None => None,
    };
    let timeout = match matches.value_of("timeout") {
        Some(timeout) => Some(Duration::from_secs_f64(
            timeout
                .parse::<f64>()
                .map_err(|_| String::from("Failed to parse timeout"))?,
        )),
        None => None,
    };

    if matches.is_present("profile") {
        let guard = pprof::ProfilerGuard::new(100).map_err(|err| err.to_string())?;
        std::thread::spawn(move || loop {
            if let Ok(report) = guard.report().build() {
                if let Ok(file) = File::create("flamegraph.svg") {
                    let _ = report.flamegraph(file);
                }
            }
            std::thread::sleep(Duration::from_secs(5))
        });
    }

    let puzzle = Puzzle::from_crossword(&crossword, words);
    info!(
        "Loaded {} slots and {} words",
        puzzle.variables().len(),
        puzzle.words().len()
    );

    let mut filler = BacktrackingFiller::new(FillOptions { seed, timeout });
    match filler.fill(&puzzle) {
        Ok(assignment) => {
            let rendered = crossword.render(&assignment).to_string();
            print!("{}", rendered);
            if let Some(output) = matches.value_of("output") {
                std::fs::write(output, rendered)
                    .map_err(|err| format!("Failed to write output: {}", err))?;
            }
        }
        Err(err) if err.is_unsatisfiable() => println!("No solution."),
        Err(err) => return Err(err.to_string()),
    }
    Ok(())
}
