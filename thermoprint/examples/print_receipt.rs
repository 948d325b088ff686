//! Receipt printing example

use thermoprint::{
    Alignment, BarcodeOptions, NamedSize, Printer, PrintOptions, QrOptions, Symbology,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> thermoprint::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let addr = std::env::var("PRINTER_ADDR").unwrap_or_else(|_| "192.168.1.50:9100".to_string());

    let mut printer = Printer::new().with_name("Counter");
    let mut events = printer.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("event: {}", event);
        }
    });

    printer.connect(&addr).await?;
    println!("{}", printer.status());

    let title = PrintOptions::new()
        .with_align(Alignment::Center)
        .with_bold(true)
        .with_size(NamedSize::Large);
    printer.print_text("CORNER CAFE", &title).await?;
    printer.print_text("Flat white      3.20", &PrintOptions::new()).await?;
    printer.print_text("Croissant       2.50", &PrintOptions::new()).await?;
    printer
        .print_text("TOTAL           5.70", &PrintOptions::new().with_bold(true))
        .await?;

    printer
        .print_barcode(
            "4006381333931",
            Symbology::Ean13,
            &BarcodeOptions::new().with_align(Alignment::Center),
        )
        .await?;
    printer
        .print_qr("https://example.com/r/1042", &QrOptions::new().with_align(Alignment::Center))
        .await?;

    printer.cut().await?;
    printer.disconnect().await?;

    Ok(())
}
