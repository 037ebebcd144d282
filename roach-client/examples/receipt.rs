// roach-client/examples/receipt.rs
// Demo receipt against a running Roach service

use roach_client::{Printer, TableCell, TableOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    let mut printer = Printer::new(&address);
    printer
        .font("a")
        .align("ct")
        .style("bu")
        .size(0, 0)
        .text("The quick brown fox jumps over the lazy dog")
        .table(["One", "Two", "Three"])
        .table_custom_with(
            vec![
                TableCell::new("Left")
                    .with_align("LEFT")
                    .with_width(0.33)
                    .with_style("B"),
                TableCell::new("Center").with_align("CENTER").with_width(0.33),
                TableCell::new("Right").with_align("RIGHT").with_width(0.33),
            ],
            TableOptions::new().with_encoding("cp857").with_size(1, 1),
        )
        .qrimage("https://github.com/song940/node-escpos")
        .cut();
    printer.close().await?;

    tracing::info!("receipt sent to {address}");
    Ok(())
}
