use biodivine_lib_maboss::{take_warnings, Simulation};
use std::fs::File;

/// Load a MaBoSS model (`.bnd` + `.cfg`) and print a short summary of it.
/// If an output prefix is given, the normalized model is written
/// to `<prefix>.bnd` and `<prefix>.cfg`.
fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: check-model <model.bnd> <model.cfg> [<output_prefix>]");
        std::process::exit(2);
    }

    let simulation = match Simulation::try_from_files(&args[1], &args[2]) {
        Ok(simulation) => simulation,
        Err(error) => {
            eprintln!("ERROR: {}", error);
            std::process::exit(1);
        }
    };
    let warnings = take_warnings();

    let network = simulation.network();
    let internal = network
        .ordered_nodes()
        .iter()
        .filter(|it| it.is_internal())
        .count();
    println!("Nodes: {} ({} internal)", network.num_nodes(), internal);
    println!("Initial state bindings: {}", network.bindings().len());
    println!(
        "External variables: {}",
        simulation.parameters().external_variables().len()
    );
    println!("Mutations: [{}]", simulation.mutations().join(", "));
    println!("Warnings: {}", warnings.len());

    if let Some(prefix) = args.get(3) {
        let mut bnd = File::create(format!("{}.bnd", prefix)).unwrap();
        let mut cfg = File::create(format!("{}.cfg", prefix)).unwrap();
        simulation.write_bnd(&mut bnd).unwrap();
        simulation.write_cfg(&mut cfg).unwrap();
        eprintln!("Model written to {}.bnd and {}.cfg", prefix, prefix);
    }
}
