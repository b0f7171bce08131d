use argparse::set_configs;
use ppmtrans::ppmtrans;
use utils::logging::init_logger;

mod argparse;
mod ppmtrans;
mod utils;

fn main() -> anyhow::Result<()> {
    let config = set_configs()?;
    init_logger(config.verbose)?;

    ppmtrans(config)
}
