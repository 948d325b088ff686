//! Image printing example
//!
//! Usage: `PRINTER_ADDR=10.0.0.7 cargo run --example print_image -- logo.png`

use thermoprint::{Alignment, ImageOptions, Printer, PrinterConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let path = std::env::args().nth(1).ok_or("missing image path")?;
    let addr = std::env::var("PRINTER_ADDR").unwrap_or_else(|_| "192.168.1.50".to_string());

    let image = image::open(&path)?.to_rgb8();
    println!("Loaded {} ({}x{})", path, image.width(), image.height());

    let mut printer = Printer::new().with_config(PrinterConfig::paper_80mm())?;
    printer.connect(&addr).await?;

    printer
        .print_image(&image, &ImageOptions::new().with_align(Alignment::Center))
        .await?;
    printer.cut().await?;

    printer.disconnect().await?;

    Ok(())
}
