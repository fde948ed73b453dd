use log::{debug, info};
use structopt::StructOpt;

use parasent::{
    download::{Downloader, Offline},
    error::Error,
    pipelines::{Extraction, PairStatus, Pipeline, Report},
};

mod cli;

fn log_report(report: &Report) {
    for r in &report.pairs {
        match r.status {
            PairStatus::Unavailable => info!("[{}] unavailable", r.pair),
            status => info!(
                "[{}] {:?}: {} accepted, {} rejected",
                r.pair, status, r.accepted, r.rejected
            ),
        }
    }
    info!("{} rows in {:?}", report.nb_rows, report.table_path);
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Parasent::from_args();
    debug!("cli args\n{:#?}", opt);

    let offline = opt.offline;
    let config = opt.into_config()?;
    let report = if offline {
        Extraction::new(config, Offline).run()?
    } else {
        Extraction::new(config, Downloader::default()).run()?
    };

    log_report(&report);
    Ok(())
}
