use anyhow::{Context, Result};
use clap::Parser;
use sorted_flat_map::{FlatMap, FlatMultimap};

#[derive(Parser, Debug)]
#[command(
    name = "kv-demo",
    version,
    about = "Fills a map and a multimap, then prints their value sets and filtered copies."
)]
struct Opts {
    /// Keep only the values less than or equal to this
    #[arg(long, default_value_t = 30)]
    threshold: i32,
}

fn fill_map() -> Result<FlatMap<String, i32>> {
    let mut map = FlatMap::new();
    for (key, value) in [("1", 1), ("2", 2), ("3", 3), ("31", 31)] {
        map.insert(key.to_string(), value).context("Could not fill the map")?;
    }
    Ok(map)
}

fn fill_multimap() -> FlatMultimap<String, i32> {
    let mut map = FlatMultimap::new();
    for (key, value) in [("1", 1), ("1", 2), ("2", 2), ("3", 3), ("31", 31)] {
        map.insert(key.to_string(), value);
    }
    map
}

fn run(opts: &Opts) -> Result<()> {
    let threshold = opts.threshold;

    let map = fill_map()?;
    println!("map:\n{map}");
    println!("map values: {}", map.project_values());
    println!("map values <= {threshold}:\n{}", map.filter(|v| *v <= threshold));

    let multimap = fill_multimap();
    println!("multimap:\n{multimap}");
    println!("multimap values: {}", multimap.project_values());
    println!(
        "multimap values <= {threshold}:\n{}",
        multimap.filter(|v| *v <= threshold)
    );

    Ok(())
}

fn main() {
    env_logger::init();
    let opts = Opts::parse();
    log::debug!("starting with {opts:?}");

    if let Err(e) = run(&opts) {
        println!("Error: {e}");
        for cause in e.chain().skip(1) {
            println!("\tcaused by: {cause}");
        }
        std::process::exit(1);
    }
}
