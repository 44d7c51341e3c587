use ice_cycle_simulator as ice;
use ice::SimResult;
use std::path::Path;
use tracing::info;

/// Usage: `ice_cycle_simulator [engine.json] [output folder]`
fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let engine_file = args.get(1).map(String::as_str).unwrap_or("engine.json");
    let folder_name = args.get(2).map(String::as_str).unwrap_or("results");

    if let Err(err) = run(engine_file, folder_name) {
        eprintln!("Error at 'ice_cycle_simulator':\n {}", err);
        std::process::exit(1);
    }
}

fn run(engine_file: &str, folder_name: &str) -> SimResult<()> {
    let mut builder = ice::SimulationBuilder::new();
    builder.load_engine(engine_file)?;
    let simulation = builder.build()?;
    println!("{}", simulation.config());

    let result = simulation.run()?;

    // Writting data
    let folder = Path::new(folder_name);
    std::fs::create_dir_all(folder)?;
    let table_file = folder.join("cycle.txt");
    result.write_to_file(&table_file.to_string_lossy())?;
    std::fs::write(folder.join("cycle.json"), result.to_json()?)?;
    let scripts = ice::plot::write_gnuplot_scripts(&result, folder)?;
    info!(folder = folder_name, scripts = scripts.len(), "results written");

    println!("constant gamma:\n        {}", result.constant_summary());
    println!("variable gamma:\n        {}", result.variable_summary());
    Ok(())
}
