mod game;

use anyhow::{Context, Result};
use game::config::MansionConfig;

fn main() -> Result<()> {
    // Initialize logging. Control verbosity with RUST_LOG env var:
    //   RUST_LOG=info   cargo run   # rooms entered, clues recorded, verdict
    //   RUST_LOG=debug  cargo run   # + commands, duplicate clues, passages
    //   RUST_LOG=trace  cargo run   # + every suspect lookup
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();

    let config = match args.get(1) {
        Some(path) if !std::path::Path::new(path).is_file() => anyhow::bail!(
            "no mansion file at {path}\n\
             \n\
             Usage: detective-quest [path-to-mansion.json]\n\
             \n\
             Example:\n  detective-quest ./data/mansion.json\n\
             \n\
             Without a path the classic six-room mansion is used."
        ),
        Some(path) => MansionConfig::load(path).context("failed to load mansion")?,
        None => MansionConfig::reference(),
    };

    let mansion = config.build().context("invalid mansion")?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    game::run(&mansion, &mut input, &mut output)
}
