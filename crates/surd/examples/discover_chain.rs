//! Discover the causal order of a synthetic chain with a collider.
//!
//! ```text
//! RUST_LOG=info cargo run -p surd --example discover_chain
//! ```

use ndarray::{Axis, concatenate};
use surd::testing::data::{linear_chain, sink};
use surd::{DiscoveryError, Surd, SurdConfig, Verbosity};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DiscoveryError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Columns 0..4: a chain x0 → x1 → x2 → x3. Columns 4..7: x6 = x4 + x5 + ε.
    let chain = linear_chain(1_000, 4, 0.8, 0.6, 1);
    let collider = sink(1_000, 2, 0.1, 2);
    let x = concatenate(Axis(1), &[chain.view(), collider.view()])
        .expect("row counts match");

    let config = SurdConfig::builder()
        .lambda(0.05)
        .workers(4)
        .verbosity(Verbosity::Info)
        .build();
    let graph = Surd::new(config).fit(x.view())?;

    println!("causal order: {:?}", graph.order());
    for (step, (&v, &mse)) in graph.order().iter().zip(graph.residuals()).enumerate() {
        println!("  step {step}: x{v} (mse {mse:.4})");
    }
    println!("edges:");
    for edge in graph.edges() {
        println!("  x{} -> x{}  {:+.3}", edge.from, edge.to, edge.weight);
    }

    Ok(())
}
