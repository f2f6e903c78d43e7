use mnist_feedforward::config::{load_config, TrainingConfig};
use mnist_feedforward::dataset::Dataset;
use mnist_feedforward::network::Network;
use mnist_feedforward::trainer::train;
use mnist_feedforward::utils::SimpleRng;
use std::process;
use std::time::Instant;

// Sigmoid MLP trained on MNIST with mini-batch SGD.
const TRAIN_IMAGES: &str = "./data/train-images-idx3-ubyte";
const TRAIN_LABELS: &str = "./data/train-labels-idx1-ubyte";
const TEST_IMAGES: &str = "./data/t10k-images-idx3-ubyte";
const TEST_LABELS: &str = "./data/t10k-labels-idx1-ubyte";
const DEFAULT_CONFIG: &str = "config/mnist.json";

fn load_or_exit(config_path: &str) -> TrainingConfig {
    load_config(config_path).unwrap_or_else(|err| {
        eprintln!("Could not load config {}: {}", config_path, err);
        process::exit(1);
    })
}

fn main() {
    let program_start = Instant::now();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = load_or_exit(&config_path);
    let topology = config.topology().unwrap_or_else(|err| {
        eprintln!("Invalid topology: {}", err);
        process::exit(1);
    });
    let num_classes = topology.output_size();

    println!("Loading training data...");
    let load_start = Instant::now();
    let training_set = Dataset::from_idx_files(TRAIN_IMAGES, TRAIN_LABELS, num_classes)
        .unwrap_or_else(|err| {
            eprintln!("Could not load training data: {}", err);
            process::exit(1);
        });

    println!("Loading test data...");
    let test_set =
        Dataset::from_idx_files(TEST_IMAGES, TEST_LABELS, num_classes).unwrap_or_else(|err| {
            eprintln!("Could not load test data: {}", err);
            process::exit(1);
        });
    let load_time = load_start.elapsed().as_secs_f64();
    println!("Data loading time: {:.2} seconds", load_time);

    println!("Initializing network...");
    let mut rng = match config.seed {
        Some(seed) => SimpleRng::new(seed),
        None => {
            let mut rng = SimpleRng::new(1);
            rng.reseed_from_time();
            rng
        }
    };
    let mut network = Network::new(topology);
    network.randomize(&mut rng);

    println!("Training network...");
    let train_start = Instant::now();
    train(
        &mut network,
        &training_set,
        &test_set,
        &config,
        &mut rng,
        |report| {
            println!("Epoch {}: {}/{}", report.epoch, report.correct, report.total);
        },
    )
    .unwrap_or_else(|err| {
        eprintln!("Training failed: {}", err);
        process::exit(1);
    });
    let train_time = train_start.elapsed().as_secs_f64();

    let total_time = program_start.elapsed().as_secs_f64();
    println!("\n=== Performance Summary ===");
    println!("Data loading time: {:.2} seconds", load_time);
    println!("Training time: {:.2} seconds", train_time);
    println!("Total program time: {:.2} seconds", total_time);
    println!("===========================");
}
