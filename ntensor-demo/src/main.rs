//! ntensor demo driver
//!
//! Builds two square sample matrices, scales the first, multiplies them and prints the product together
//! with its top-left 2×2 view.

mod config;

use anyhow::Result;
use config::DemoConfig;
use ntensor::Tensor;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let config = DemoConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ntensor={0},ntensor_demo={0}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    config.validate()?;
    info!(size = config.size, direct_threshold = config.tensor.direct_threshold, "starting demo");

    let n = config.size;
    let mut tensor = Tensor::new(&[n, n], 0.0f32, config.tensor);
    let mut tensor2 = Tensor::new(&[n, n], 0.0f32, config.tensor);
    for i in 0..n {
        for j in 0..n {
            tensor[[i, j]] = (2.125 * (i + j) as f64 + (i / (j + 1)) as f64) as f32;
            tensor2[[i, j]] = (i + j) as f32;
        }
    }

    tensor *= 2.0;
    let product = tensor.matmul(&tensor2)?;
    info!(kernel = ?tensor.kernel_for(), "multiplied");
    product.print_flat();

    let rows = n.min(2);
    let view = product.slice(0, rows, 0, rows)?;
    view.print_flat();

    Ok(())
}
