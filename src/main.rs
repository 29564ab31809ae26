use anyhow::{Context, Result};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use structopt::StructOpt;

mod adjacency;
mod board;
mod error;
mod events;
mod flag;
mod game;
mod placer;
mod reveal;
mod store;
mod ui;

#[derive(Debug, structopt::StructOpt)]
struct Opt {
    /// The number of rows in the grid.
    #[structopt(short, long, default_value = "9")]
    rows: usize,

    /// The number of columns in the grid.
    #[structopt(short, long, default_value = "9")]
    columns: usize,

    /// The total number of mines in the grid.
    #[structopt(short, long, default_value = "10")]
    mines: usize,

    /// Seed for mine placement. The same seed always produces the same grid.
    #[structopt(short, long)]
    seed: Option<u64>,

    /// The width of each cell.
    #[structopt(short = "-w", long, default_value = "5")]
    cell_width: usize,

    /// The height of each cell.
    #[structopt(short = "-H", long, default_value = "3")]
    cell_height: usize,

    /// Write logs to this file. Filtered with RUST_LOG, `info` by default.
    #[structopt(long, parse(from_os_str))]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")
}

fn main() -> Result<()> {
    let Opt {
        rows,
        columns,
        mines,
        seed,
        cell_width,
        cell_height,
        log_file,
    } = Opt::from_args();

    if let Some(path) = &log_file {
        init_logging(path)?;
    }

    let config = board::BoardConfig::builder()
        .rows(rows)
        .columns(columns)
        .hazards(mines)
        .seed(seed)
        .build();
    let board = board::Board::new(&config).context("failed to build board")?;
    log::info!(
        "starting {rows}x{columns} game with {mines} mines, seed {}",
        board.seed()
    );

    ui::Ui::builder()
        .game(game::Game::new(board))
        .cell_width(cell_width)
        .cell_height(cell_height)
        .build()
        .run()
        .context("sweep failed")
}
