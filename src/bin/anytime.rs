//! A command line interface to the anytime metaheuristic drivers.
//!
//! Every subcommand reads a problem instance from stdin, searches for the
//! time budget given on its first line, prints the best quality to stdout
//! and the best solution to stderr.

use std::fmt::Display;
use std::io::Read;
use std::process;
use std::str::FromStr;

use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use anytime_metaheur::ga::{GaConfig, GaMode, GaRunner};
use anytime_metaheur::ls::{LsConfig, LsRunner};
use anytime_metaheur::problems::blocks::BlockImageProblem;
use anytime_metaheur::problems::continuous::{Benchmark, ContinuousProblem};
use anytime_metaheur::problems::maze::{
    format_path, InitialPath, Maze, MazeProblem, Move, Neighborhood,
};
use anytime_metaheur::problems::tsp::{CostMatrix, TspProblem};
use anytime_metaheur::problems::words::{parse_letter, WordsProblem};
use anytime_metaheur::sa::{CoolingSchedule, SaConfig, SaRunner};
use anytime_metaheur::tabu::{TabuConfig, TabuRunner};

const ALGORITHM_ARG_NAME: &str = "algorithm";
const INIT_ARG_NAME: &str = "init";
const TWEAK_ARG_NAME: &str = "tweak";
const POPULATION_ARG_NAME: &str = "population";
const DICT_ARG_NAME: &str = "dict";
const SEED_ARG_NAME: &str = "seed";

type CliResult<T> = Result<T, String>;

fn main() {
    let matches = Command::new("anytime")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Time-budgeted metaheuristic search on reference problems")
        .arg(
            Arg::new(SEED_ARG_NAME)
                .help("Seed for reproducible runs")
                .long(SEED_ARG_NAME)
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .subcommand(get_tsp_app())
        .subcommand(get_maze_app())
        .subcommand(get_function_app())
        .subcommand(get_salomon_app())
        .subcommand(get_blocks_app())
        .subcommand(get_words_app())
        .get_matches();

    init_logging();

    let result = match matches.subcommand() {
        Some(("tsp", sub)) => run_tsp(sub),
        Some(("maze", sub)) => run_maze(sub),
        Some(("function", sub)) => run_function(sub),
        Some(("salomon", sub)) => run_salomon(sub),
        Some(("blocks", sub)) => run_blocks(sub),
        Some(("words", sub)) => run_words(sub),
        _ => Err("No subcommand was used. Use -h to print help information.".to_string()),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn algorithm_arg(values: &'static [&'static str], default: &'static str) -> Arg {
    Arg::new(ALGORITHM_ARG_NAME)
        .help("Search driver")
        .short('a')
        .long(ALGORITHM_ARG_NAME)
        .value_parser(clap::builder::PossibleValuesParser::new(values.iter().copied()))
        .default_value(default)
}

fn get_tsp_app() -> Command {
    Command::new("tsp")
        .about("Closed tour over a cost matrix. Input: 't n', then n rows of n costs")
        .arg(algorithm_arg(&["tabu", "sa", "ga"], "tabu"))
        .arg(
            Arg::new(POPULATION_ARG_NAME)
                .help("GA population size")
                .long(POPULATION_ARG_NAME)
                .value_parser(clap::value_parser!(usize))
                .default_value("20"),
        )
}

fn get_maze_app() -> Command {
    Command::new("maze")
        .about(
            "Shortest exit path. Input: 't n m', then n rows; \
             for ga 't n m s p', n rows, then s starting paths",
        )
        .arg(algorithm_arg(&["sa", "tabu", "ga"], "sa"))
        .arg(
            Arg::new(INIT_ARG_NAME)
                .help("Starting path for sa and tabu")
                .long(INIT_ARG_NAME)
                .value_parser(clap::builder::PossibleValuesParser::new(["walls", "random"])),
        )
        .arg(
            Arg::new(TWEAK_ARG_NAME)
                .help("Neighborhood: swap/reverse, or swap/redraw/reverse")
                .long(TWEAK_ARG_NAME)
                .value_parser(clap::builder::PossibleValuesParser::new(["rearrange", "resample"]))
                .default_value("rearrange"),
        )
}

fn get_function_app() -> Command {
    Command::new("function")
        .about("Iterated local search on HappyCat (b = 0) or Griewank. Input: 't b'")
}

fn get_salomon_app() -> Command {
    Command::new("salomon")
        .about("Simulated annealing on the Salomon function. Input: 't x1 x2 x3 x4'")
}

fn get_blocks_app() -> Command {
    Command::new("blocks").about(
        "Block-image reconstruction by simulated annealing. \
         Input: 't n m k', then n rows of m intensities",
    )
}

fn get_words_app() -> Command {
    Command::new("words")
        .about("Best-scoring word. Input: 't n s', n lines 'letter score', s starting words")
        .arg(
            Arg::new(DICT_ARG_NAME)
                .help("Dictionary file, one word per line")
                .long(DICT_ARG_NAME)
                .default_value("dict.txt"),
        )
}

fn seed(matches: &ArgMatches) -> Option<u64> {
    matches.get_one::<u64>(SEED_ARG_NAME).copied()
}

fn algorithm(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>(ALGORITHM_ARG_NAME)
        .map(String::as_str)
        .unwrap_or_default()
}

fn run_tsp(matches: &ArgMatches) -> CliResult<()> {
    let mut input = Input::from_stdin()?;
    let header = input.tokens("header")?;
    let timeout: f64 = parse_token(&header, 0, "time limit")?;
    let n: usize = parse_token(&header, 1, "city count")?;
    let rows = (0..n)
        .map(|i| input.numbers::<f64>(&format!("cost row {i}")))
        .collect::<CliResult<Vec<_>>>()?;
    let problem = TspProblem::new(CostMatrix::new(rows).map_err(|e| e.to_string())?);

    let (tour, cost) = match algorithm(matches) {
        "sa" => {
            let mut config = SaConfig::default().with_timeout_secs(timeout);
            config.seed = seed(matches);
            let result = SaRunner::run(&problem, &config).map_err(|e| e.to_string())?;
            (result.best, result.best_quality)
        }
        "ga" => {
            let population = matches
                .get_one::<usize>(POPULATION_ARG_NAME)
                .copied()
                .unwrap_or(20);
            let mut config = GaConfig::default()
                .with_population_size(population)
                .with_elite_size(population / 4)
                .with_timeout_secs(timeout);
            config.seed = seed(matches);
            let mut rng = anytime_metaheur::random::rng_from(config.seed);
            let first = problem.first_generation(population, &mut rng);
            let result = GaRunner::run(&problem, &config, first).map_err(|e| e.to_string())?;
            (result.best, result.best_fitness)
        }
        _ => {
            let mut config = TabuConfig::scaled(n).with_timeout_secs(timeout);
            config.seed = seed(matches);
            let result = TabuRunner::run(&problem, &config);
            (result.best, result.best_quality)
        }
    };

    println!("{cost}");
    eprintln!("{}", join(tour.iter().map(|city| city + 1)));
    Ok(())
}

fn run_maze(matches: &ArgMatches) -> CliResult<()> {
    let algorithm = algorithm(matches);
    let mut input = Input::from_stdin()?;
    let header = input.tokens("header")?;
    let timeout: f64 = parse_token(&header, 0, "time limit")?;
    let n: usize = parse_token(&header, 1, "row count")?;
    let m: usize = parse_token(&header, 2, "column count")?;
    let rows = (0..n)
        .map(|i| input.line(&format!("maze row {i}")))
        .collect::<CliResult<Vec<_>>>()?;
    let maze = Maze::from_rows(&rows).map_err(|e| e.to_string())?;

    let initial = match matches.get_one::<String>(INIT_ARG_NAME).map(String::as_str) {
        Some("walls") => InitialPath::WallFollowing,
        Some("random") => InitialPath::RandomWalk,
        _ if algorithm == "tabu" => InitialPath::WallFollowing,
        _ => InitialPath::RandomWalk,
    };

    let neighborhood = match matches.get_one::<String>(TWEAK_ARG_NAME).map(String::as_str) {
        Some("resample") => Neighborhood::Resample,
        _ => Neighborhood::Rearrange,
    };

    let problem = MazeProblem::new(maze, initial).with_neighborhood(neighborhood);
    let (path, cost) = match algorithm {
        "ga" => {
            let starting: usize = parse_token(&header, 3, "starting path count")?;
            let population: usize = parse_token(&header, 4, "population size")?;
            let first = (0..starting)
                .map(|i| {
                    let line = input.line(&format!("starting path {i}"))?;
                    Move::parse_path(line.trim()).map_err(|e| e.to_string())
                })
                .collect::<CliResult<Vec<_>>>()?;
            let mut config = GaConfig::default()
                .with_population_size(population)
                .with_elite_size(0)
                .with_mode(GaMode::Generational)
                .with_timeout_secs(timeout)
                .with_log_stagnation_window();
            config.seed = seed(matches);
            let result = GaRunner::run(&problem, &config, first).map_err(|e| e.to_string())?;
            (result.best, result.best_fitness)
        }
        "tabu" => {
            let mut config = TabuConfig::default()
                .with_tabu_capacity(n * 10)
                .with_candidates_per_iteration(n * m)
                .with_timeout_secs(timeout);
            config.seed = seed(matches);
            let result = TabuRunner::run(&problem, &config);
            (result.best, result.best_quality)
        }
        _ => {
            let mut config = SaConfig::default()
                .with_initial_temperature(1e5)
                .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
                .with_timeout_secs(timeout);
            config.seed = seed(matches);
            let result = SaRunner::run(&problem, &config).map_err(|e| e.to_string())?;
            (result.best, result.best_quality)
        }
    };

    let steps = (cost as usize).min(path.len());
    println!("{cost}");
    eprintln!("{}", format_path(&path[..steps]));
    Ok(())
}

fn run_function(matches: &ArgMatches) -> CliResult<()> {
    let mut input = Input::from_stdin()?;
    let header = input.tokens("header")?;
    let timeout: f64 = parse_token(&header, 0, "time limit")?;
    let benchmark = match header.get(1).map(String::as_str) {
        Some("0") => Benchmark::HappyCat,
        Some(_) => Benchmark::Griewank,
        None => return Err("missing function selector".to_string()),
    };

    let problem = ContinuousProblem::ils_preset(benchmark).map_err(|e| e.to_string())?;
    let mut config = LsConfig::default().with_timeout_secs(timeout);
    config.seed = seed(matches);
    let result = LsRunner::run(&problem, &config).map_err(|e| e.to_string())?;

    println!("{} {}", join(result.best.iter()), result.best_quality);
    Ok(())
}

fn run_salomon(matches: &ArgMatches) -> CliResult<()> {
    let mut input = Input::from_stdin()?;
    let numbers = input.numbers::<f64>("header")?;
    let Some((&timeout, point)) = numbers.split_first() else {
        return Err("missing time limit".to_string());
    };
    if point.is_empty() {
        return Err("missing starting point".to_string());
    }

    let problem = ContinuousProblem::salomon_preset(point.to_vec()).map_err(|e| e.to_string())?;
    let mut config = SaConfig::default()
        .with_initial_temperature(1e5)
        .with_cooling(CoolingSchedule::Geometric { alpha: 0.999 })
        .with_timeout_secs(timeout);
    config.seed = seed(matches);
    let result = SaRunner::run(&problem, &config).map_err(|e| e.to_string())?;

    println!("{} {}", join(result.best.iter()), result.best_quality);
    Ok(())
}

fn run_blocks(matches: &ArgMatches) -> CliResult<()> {
    let mut input = Input::from_stdin()?;
    let header = input.tokens("header")?;
    let timeout: f64 = parse_token(&header, 0, "time limit")?;
    let n: usize = parse_token(&header, 1, "row count")?;
    let m: usize = parse_token(&header, 2, "column count")?;
    let k: usize = parse_token(&header, 3, "minimum block side")?;
    let image = (0..n)
        .map(|i| {
            let row = input.numbers::<u8>(&format!("image row {i}"))?;
            if row.len() != m {
                return Err(format!("image row {i} has {} pixels, expected {m}", row.len()));
            }
            Ok(row)
        })
        .collect::<CliResult<Vec<_>>>()?;

    let problem = BlockImageProblem::new(image, k).map_err(|e| e.to_string())?;
    let mut config = SaConfig::default()
        .with_initial_temperature(1.52)
        .with_cooling(CoolingSchedule::Geometric { alpha: 0.85 })
        .with_timeout_secs(timeout);
    config.seed = seed(matches);
    let result = SaRunner::run(&problem, &config).map_err(|e| e.to_string())?;

    println!("{}", result.best_quality);
    eprint!("{}", result.best);
    Ok(())
}

fn run_words(matches: &ArgMatches) -> CliResult<()> {
    let mut input = Input::from_stdin()?;
    let header = input.tokens("header")?;
    let timeout: f64 = parse_token(&header, 0, "time limit")?;
    let n: usize = parse_token(&header, 1, "letter count")?;
    let s: usize = parse_token(&header, 2, "starting word count")?;
    let letters = (0..n)
        .map(|i| {
            let line = input.line(&format!("letter {i}"))?;
            parse_letter(&line).map_err(|e| e.to_string())
        })
        .collect::<CliResult<Vec<_>>>()?;
    let first = (0..s)
        .map(|i| input.line(&format!("starting word {i}")).map(|w| w.trim().to_string()))
        .collect::<CliResult<Vec<_>>>()?;

    let dict_path = matches
        .get_one::<String>(DICT_ARG_NAME)
        .map(String::as_str)
        .unwrap_or("dict.txt");
    let dictionary = std::fs::read_to_string(dict_path)
        .map_err(|err| format!("cannot open dictionary file '{dict_path}': '{err}'"))?;

    let problem = WordsProblem::new(&letters, dictionary.lines());
    let mut config = WordsProblem::ga_config(timeout);
    config.seed = seed(matches);
    let result = GaRunner::run(&problem, &config, first).map_err(|e| e.to_string())?;

    println!("{}", result.best_fitness);
    eprintln!("{}", result.best);
    Ok(())
}

fn join<T: Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(" ")
}

fn parse_token<T>(tokens: &[String], index: usize, what: &str) -> CliResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let token = tokens.get(index).ok_or_else(|| format!("missing {what}"))?;
    token
        .parse()
        .map_err(|err| format!("cannot parse {what} '{token}': '{err}'"))
}

/// Line-oriented view of stdin.
struct Input {
    lines: std::vec::IntoIter<String>,
}

impl Input {
    fn from_stdin() -> CliResult<Self> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| format!("cannot read stdin: '{err}'"))?;
        let lines: Vec<String> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            lines: lines.into_iter(),
        })
    }

    fn line(&mut self, what: &str) -> CliResult<String> {
        self.lines
            .next()
            .ok_or_else(|| format!("unexpected end of input, expected {what}"))
    }

    fn tokens(&mut self, what: &str) -> CliResult<Vec<String>> {
        Ok(self
            .line(what)?
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    fn numbers<T>(&mut self, what: &str) -> CliResult<Vec<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        let tokens = self.tokens(what)?;
        (0..tokens.len())
            .map(|i| parse_token(&tokens, i, what))
            .collect()
    }
}
