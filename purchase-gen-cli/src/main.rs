use std::error::Error;
use std::process;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

use purchase_gen::catalog::Catalog;
use purchase_gen::generator::{
    PurchaseGenerator, PurchaseRange, DEFAULT_CUSTOMERS, DEFAULT_MAX_PURCHASES,
    DEFAULT_MIN_PURCHASES,
};
use purchase_gen::recommend::{Recommender, DEFAULT_RECOMMENDATIONS};
use purchase_gen::report::{preview, DatasetSummary};
use purchase_gen::table::write_csv_file;

/// Generates a CSV file of synthetic retail purchases
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The CSV file to write
    #[clap(short, long = "output", default_value = "purchase_data.csv")]
    pub(crate) output_file: String,

    /// Number of simulated customers
    #[clap(short, long, default_value_t = DEFAULT_CUSTOMERS)]
    pub(crate) customers: u32,

    /// Fewest purchases a single customer makes
    #[clap(long, default_value_t = DEFAULT_MIN_PURCHASES)]
    pub(crate) min_purchases: u32,

    /// Most purchases a single customer makes
    #[clap(long, default_value_t = DEFAULT_MAX_PURCHASES)]
    pub(crate) max_purchases: u32,

    /// Seed for reproducible output. Without it every run differs
    #[clap(short, long)]
    pub(crate) seed: Option<u64>,

    /// Number of sample records to print
    #[clap(long, default_value_t = 5)]
    pub(crate) preview: usize,

    /// Print product recommendations for this customer id, e.g. C0001
    #[clap(short, long)]
    pub(crate) recommend_for: Option<String>,

    /// Most recommendations to print
    #[clap(long, default_value_t = DEFAULT_RECOMMENDATIONS)]
    pub(crate) recommendations: usize,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let range = PurchaseRange::new(cli.min_purchases, cli.max_purchases)?;

    let catalog = Catalog::standard();
    let generator = PurchaseGenerator::new(&catalog);
    let purchases = match cli.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            generator.generate(cli.customers, range, &mut StdRng::seed_from_u64(seed))?
        }
        None => generator.generate(cli.customers, range, &mut thread_rng())?,
    };

    write_csv_file(&cli.output_file, &purchases)?;

    println!("✓ Generated {} purchases", purchases.len());
    println!("✓ Saved to {}", cli.output_file);
    println!();
    println!("{}", DatasetSummary::from_records(&purchases));

    if cli.preview > 0 {
        println!();
        println!("Sample Records:");
        for line in preview(&purchases, cli.preview) {
            println!("{}", line);
        }
    }

    if let Some(customer_id) = &cli.recommend_for {
        let recommender = Recommender::from_records(&purchases);
        let recommendations = recommender.recommend(customer_id, cli.recommendations)?;
        println!();
        println!("Recommendations for {}:", customer_id);
        for (i, recommendation) in recommendations.iter().enumerate() {
            println!("{}. {}", i + 1, recommendation);
        }
    }

    Ok(())
}
