use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use lifegrid_kernel::{Board, Outcome, Simulation, SimulationConfig, Topology, patterns};
use lifegrid_render::{CsvRenderer, GlyphRenderer, Renderer, TextPresenter};
use tracing_subscriber::EnvFilter;

/// Pattern used when neither a board file nor a pattern is given.
const DEFAULT_PATTERN: &str = "sample";

#[derive(Parser)]
#[command(name = "lifegrid-cli", about = "Run Conway's Game of Life on bounded boards")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Simulate a board and print every generation
    Run(RunArgs),
    /// List the built-in patterns
    Patterns,
    /// Re-encode a board file (format follows the extension)
    Convert {
        /// Source board file
        input: PathBuf,
        /// Destination board file
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Board file to start from (.json, .csv, .cells, .txt)
    #[arg(short, long, conflicts_with = "pattern")]
    board: Option<PathBuf>,
    /// Built-in pattern to start from
    #[arg(short, long)]
    pattern: Option<String>,
    /// Board height for pattern placement
    #[arg(long, requires = "cols")]
    rows: Option<usize>,
    /// Board width for pattern placement
    #[arg(long, requires = "rows")]
    cols: Option<usize>,
    /// Number of generations to compute
    #[arg(short, long)]
    generations: Option<u64>,
    /// Edge behaviour for neighbor counting
    #[arg(short, long, value_enum)]
    topology: Option<TopologyArg>,
    /// Output style
    #[arg(short, long, value_enum, default_value_t = Style::Csv)]
    style: Style,
    /// Stop early once the board dies out, stops changing or repeats
    #[arg(long)]
    until_settled: bool,
    /// Print bare boards without generation headers
    #[arg(long)]
    no_headers: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TopologyArg {
    Clamped,
    Toroidal,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Clamped => Topology::Clamped,
            TopologyArg::Toroidal => Topology::Toroidal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Style {
    Csv,
    Glyph,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("lifegrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", lifegrid_common::crate_info());
            println!("kernel: {}", lifegrid_kernel::crate_info());
            println!("render: {}", lifegrid_render::crate_info());
            println!("persist: {}", lifegrid_persist::crate_info());
        }
        Commands::Run(args) => {
            let stdout = std::io::stdout();
            run(&args, stdout.lock())?;
        }
        Commands::Patterns => {
            for p in patterns::PATTERNS {
                println!("{:<8} {:>2}x{:<2} {}", p.name, p.rows, p.cols, p.description);
            }
        }
        Commands::Convert { input, output } => convert(&input, &output)?,
    }

    Ok(())
}

/// Re-encode a board file; settings survive only if the target format holds them.
fn convert(input: &Path, output: &Path) -> anyhow::Result<()> {
    let file = lifegrid_persist::load(input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    lifegrid_persist::save(output, &file)
        .with_context(|| format!("failed to save {}", output.display()))?;
    tracing::info!("converted {} -> {}", input.display(), output.display());
    Ok(())
}

/// Resolve the starting board and settings: flags win over file settings,
/// file settings win over defaults.
fn prepare(args: &RunArgs) -> anyhow::Result<(Board, SimulationConfig)> {
    let (board, stored) = match (&args.board, &args.pattern) {
        (Some(path), _) => {
            if args.rows.is_some() {
                bail!("--rows/--cols only apply to patterns");
            }
            let file = lifegrid_persist::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            (file.board, file.config)
        }
        (None, name) => {
            let name = name.as_deref().unwrap_or(DEFAULT_PATTERN);
            (place_pattern(name, args.rows.zip(args.cols))?, None)
        }
    };

    let stored = stored.unwrap_or_default();
    let config = SimulationConfig {
        topology: args.topology.map(Topology::from).unwrap_or(stored.topology),
        generations: args.generations.unwrap_or(stored.generations),
    };
    Ok((board, config))
}

fn place_pattern(name: &str, dims: Option<(usize, usize)>) -> anyhow::Result<Board> {
    let Some(pattern) = patterns::find(name) else {
        bail!("unknown pattern {name:?} (see `lifegrid-cli patterns`)");
    };
    let board = match dims {
        Some((rows, cols)) => pattern.place(rows, cols),
        None => pattern.board(),
    };
    board.with_context(|| format!("cannot place pattern {:?}", pattern.name))
}

fn run<W: Write>(args: &RunArgs, out: W) -> anyhow::Result<()> {
    let (board, config) = prepare(args)?;
    tracing::info!(
        rows = board.rows(),
        cols = board.cols(),
        generations = config.generations,
        topology = ?config.topology,
        "starting simulation"
    );

    match args.style {
        Style::Csv => simulate(board, &config, args, CsvRenderer::new(), out),
        Style::Glyph => simulate(board, &config, args, GlyphRenderer::default(), out),
    }
}

fn simulate<R, W>(
    board: Board,
    config: &SimulationConfig,
    args: &RunArgs,
    renderer: R,
    out: W,
) -> anyhow::Result<()>
where
    R: Renderer<Output = String>,
    W: Write,
{
    let mut presenter = TextPresenter::new(renderer, out);
    if args.no_headers {
        presenter = presenter.without_headers();
    }
    presenter.present(&board, 0)?;

    let mut sim = Simulation::with_topology(board, config.topology);
    let mut write_result: std::io::Result<()> = Ok(());
    let mut observer = |board: &Board, generation: u64| {
        if write_result.is_ok() {
            write_result = presenter.present(board, generation);
        }
    };

    if args.until_settled {
        let outcome = sim.run_until_settled(config.generations, &mut observer);
        write_result?;
        report(outcome);
    } else {
        sim.run(config.generations, &mut observer);
        write_result?;
    }
    presenter.flush()?;
    Ok(())
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Extinct { generation } => tracing::info!(generation, "board died out"),
        Outcome::StillLife { generation } => tracing::info!(generation, "reached a still life"),
        Outcome::Oscillating { generation, period } => {
            tracing::info!(generation, period, "entered an oscillation")
        }
        Outcome::Exhausted { generation } => {
            tracing::info!(generation, "generation limit reached before settling")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_persist::BoardFile;

    fn parse_run(args: &[&str]) -> RunArgs {
        let mut argv = vec!["lifegrid-cli", "run"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            _ => unreachable!(),
        }
    }

    fn run_to_string(args: &[&str]) -> String {
        let mut out = Vec::new();
        run(&parse_run(args), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_run_uses_sample_for_four_generations() {
        let (board, config) = prepare(&parse_run(&[])).unwrap();
        assert_eq!(board, patterns::find("sample").unwrap().board().unwrap());
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn blinker_output_alternates() {
        let text = run_to_string(&["--pattern", "blinker", "-g", "2", "--no-headers"]);
        let horizontal = "0,0,0,0,0\n0,0,0,0,0\n0,1,1,1,0\n0,0,0,0,0\n0,0,0,0,0\n";
        let vertical = "0,0,0,0,0\n0,0,1,0,0\n0,0,1,0,0\n0,0,1,0,0\n0,0,0,0,0\n";
        assert_eq!(text, format!("{horizontal}\n{vertical}\n{horizontal}\n"));
    }

    #[test]
    fn glyph_style_with_headers() {
        let text = run_to_string(&["-p", "block", "-g", "1", "-s", "glyph"]);
        assert!(text.starts_with("Generation 0 (population 4)\n....\n.##.\n"));
        assert!(text.contains("Generation 1 (population 4)"));
    }

    #[test]
    fn until_settled_stops_early() {
        let text = run_to_string(&["-p", "block", "-g", "50", "--until-settled"]);
        assert!(text.contains("Generation 1"));
        assert!(!text.contains("Generation 2"));
    }

    #[test]
    fn flags_override_file_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("glider.json");
        let board = patterns::find("glider").unwrap().board().unwrap();
        let stored = SimulationConfig {
            topology: Topology::Toroidal,
            generations: 9,
        };
        lifegrid_persist::save(&path, &BoardFile::with_config(board.clone(), stored)).unwrap();

        let path_arg = path.to_str().unwrap();
        let (loaded, config) = prepare(&parse_run(&["--board", path_arg])).unwrap();
        assert_eq!(loaded, board);
        assert_eq!(config, stored);

        let args = parse_run(&["--board", path_arg, "-t", "clamped", "-g", "2"]);
        let (_, config) = prepare(&args).unwrap();
        assert_eq!(config.topology, Topology::Clamped);
        assert_eq!(config.generations, 2);
    }

    #[test]
    fn unknown_pattern_is_an_error() {
        let err = prepare(&parse_run(&["-p", "spaceship"])).unwrap_err();
        assert!(err.to_string().contains("unknown pattern"));
    }

    #[test]
    fn pattern_too_large_for_board_is_an_error() {
        assert!(prepare(&parse_run(&["-p", "glider", "--rows", "2", "--cols", "2"])).is_err());
    }

    #[test]
    fn oversized_pattern_board_is_an_error() {
        let args = parse_run(&["-p", "block", "--rows", "18446744073709551615", "--cols", "4"]);
        let err = prepare(&args).unwrap_err();
        assert!(format!("{err:#}").contains("too large"));
    }

    #[test]
    fn convert_json_to_plaintext() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("toad.json");
        let output = tmp.path().join("toad.cells");
        let board = patterns::find("toad").unwrap().board().unwrap();
        let stored = SimulationConfig {
            topology: Topology::Toroidal,
            generations: 3,
        };
        lifegrid_persist::save(&input, &BoardFile::with_config(board.clone(), stored)).unwrap();

        convert(&input, &output).unwrap();

        let converted = lifegrid_persist::load(&output).unwrap();
        assert_eq!(converted.board, board);
        assert_eq!(converted.config, None);
        assert!(std::fs::read_to_string(&output).unwrap().starts_with('!'));
    }

    #[test]
    fn convert_rejects_unknown_target_format() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("block.csv");
        let board = patterns::find("block").unwrap().board().unwrap();
        lifegrid_persist::save(&input, &BoardFile::new(board)).unwrap();

        let err = convert(&input, &tmp.path().join("block.rle")).unwrap_err();
        assert!(err.to_string().contains("failed to save"));
    }

    #[test]
    fn board_and_pattern_conflict() {
        let parsed = Cli::try_parse_from(["lifegrid-cli", "run", "-b", "x.csv", "-p", "block"]);
        assert!(parsed.is_err());
    }
}
