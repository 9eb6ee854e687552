// XOR demo: trains a 2-2-1 sigmoid network with finite-difference gradients.
//
// No command-line flags. Environment:
//   FDNET_LOG     log filter (default "info")
//   FDNET_DATA    whitespace-separated table with 3 columns (default: built-in XOR)
//   FDNET_CONFIG  JSON TrainConfig (default: 250000 steps, eps 1e-3, rate 1e-2)
use std::process::ExitCode;

use fdnet::{train_loop, Dataset, Network, NnResult, TrainConfig};

const LAYER_SIZES: [usize; 3] = [2, 2, 1];

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("FDNET_LOG", "info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> NnResult<()> {
    let config = match std::env::var_os("FDNET_CONFIG") {
        Some(path) => TrainConfig::load_json(path)?,
        None => TrainConfig::default(),
    };

    let columns = LAYER_SIZES[0] + LAYER_SIZES[LAYER_SIZES.len() - 1];
    let dataset = match std::env::var_os("FDNET_DATA") {
        Some(path) => Dataset::load(path, columns, LAYER_SIZES[0])?,
        None => Dataset::xor()?,
    };
    log::info!("loaded {} examples", dataset.len());

    let mut network = Network::new(&LAYER_SIZES)?;
    network.randomize(&mut config.rng(), config.init_low, config.init_high);
    println!("{}", network);

    let final_cost = train_loop(&mut network, &dataset, &config)?;

    println!("{}", network);
    println!("cost = {:.6}", final_cost);
    for (input, target) in dataset.iter() {
        let output = network.forward(input)?;
        println!("{:?} -> {} (expected {:?})", input, output, target);
    }

    Ok(())
}
