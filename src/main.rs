use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use coloring_page_rust_lib::{gui, load_image, Config, Session};

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about = "Coloring Page Generator - photo to outline art")]
struct Args {
    /// Path to the input photo
    #[clap(short, long)]
    input: PathBuf,

    /// Path the generated page is written to (headless mode)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: String,

    /// Launch the interactive coloring window
    #[clap(long)]
    gui: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config).with_context(|| format!("loading {}", args.config))?
    } else {
        info!("no config file at '{}', using defaults", args.config);
        Config::default()
    };

    if args.gui {
        gui::run_gui(args.input, config)?;
        return Ok(());
    }

    // Headless mode: one photo in, one page out.
    let Some(output) = args.output else {
        bail!("--output is required unless --gui is given");
    };

    let input = load_image(&args.input)?;
    info!(
        "converting '{}' ({}x{})",
        input.filename,
        input.image.width(),
        input.image.height()
    );

    let mut session = Session::new(config);
    session.generate_from(&input.image)?;
    session.save_page(&output)?;

    // save_page only succeeds with a page present
    let page = session.page().expect("page exists after generation");
    info!(
        "wrote {}x{} page to {}",
        page.width(),
        page.height(),
        output.display()
    );

    Ok(())
}
