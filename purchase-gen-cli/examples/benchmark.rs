//! Times generation and CSV encoding of a large dataset.
//! can be run with `cargo run --release --example benchmark`

use std::error::Error;
use std::io;
use std::time::Instant;

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

use purchase_gen::catalog::Catalog;
use purchase_gen::generator::{PurchaseGenerator, PurchaseRange};
use purchase_gen::table::write_records;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let catalog = Catalog::standard();
    let generator = PurchaseGenerator::new(&catalog);
    let mut rng = StdRng::seed_from_u64(0);

    let start = Instant::now();
    let purchases = generator.generate(10_000, PurchaseRange::default(), &mut rng)?;
    let elapsed = start.elapsed();
    warn!("Generating {} purchases took: {:.2?}", purchases.len(), elapsed);

    let start_writing = Instant::now();
    write_records(io::sink(), &purchases)?;
    let elapsed_writing = start_writing.elapsed();
    warn!("Writing took: {:.2?}", elapsed_writing);

    warn!("Total took: {:.2?}", start.elapsed());

    Ok(())
}
