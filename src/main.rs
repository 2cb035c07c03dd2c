use text_fitter::app::App;
use text_fitter::config::{load_config, CliArgs};
use text_fitter::{logging, sink};

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();
    logging::init_tracing(args.verbose);

    // Load configuration
    let config = load_config(&args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(());
    }

    // Clipboard support is settled here, once, rather than when copying
    let clipboard = if config.clip {
        sink::system_clipboard()
    } else {
        None
    };

    App::new(config).with_clipboard(clipboard).run()?;

    Ok(())
}
