use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use catoid::{batch, ObjectStore, OpenOptions};

/// Read `<oid>[ <git-dir>]` lines on stdin and write `git cat-file --batch`
/// records to stdout.
#[derive(Parser)]
#[command(name = "catoid", version)]
struct Cli {
    /// Object directory to search (`$GIT_DIR/objects`); repeatable.
    #[arg(short = 'a', long = "alternate")]
    alternates: Vec<PathBuf>,

    /// Colon-separated object directories, searched after `--alternate`.
    #[arg(long = "alternates", env = "CATOID_ALTERNATES", value_delimiter = ':')]
    alternate_list: Vec<PathBuf>,

    /// Repository whose `objects/` directory is searched first.
    #[arg(long, env = "GIT_DIR")]
    git_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut options = OpenOptions::default();
    if let Some(git_dir) = cli.git_dir {
        options = options.repository(git_dir);
    }
    for path in cli.alternates.into_iter().chain(cli.alternate_list) {
        options = options.alternate(path);
    }

    let mut store = match ObjectStore::open(&options) {
        Ok(store) => store,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin().lock();
    match batch::run(&mut store, stdin, std::io::stdout()) {
        Ok(stats) => {
            log::info!("{} requests, {} missing", stats.total(), stats.missing);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
