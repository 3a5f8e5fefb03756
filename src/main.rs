use anyhow::Result;
use clap::Parser;
use flappy_arcade::app::{self, Settings};

fn main() -> Result<()> {
    let settings = Settings::parse();
    app::init_logging(&settings)?;
    app::run(&settings)
}
