use data_loader::Catalog;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/movies.json"));

    println!("Loading movie dataset from {}...\n", path.display());

    let start = Instant::now();
    let catalog = Catalog::load_from_file(&path).expect("Failed to load dataset");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Documentaries: {}", catalog.documentary_count());
    if let Some((first, last)) = catalog.year_span() {
        println!("Years: {} - {}", first, last);
    }
}
