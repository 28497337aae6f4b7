use anyhow::Result;
use cryptotap::client::CheckoutClient;
use cryptotap::flow::CheckoutEvent;
use cryptotap::models::{CheckoutMode, ServiceType};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Load configuration
    dotenvy::dotenv().ok();

    let base_url = std::env::var("CRYPTOTAP_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());
    let amount = std::env::var("CHECKOUT_AMOUNT").unwrap_or_else(|_| "12.55".to_string());
    let mode = match std::env::var("CHECKOUT_MODE") {
        Ok(raw) => Some(raw.parse::<CheckoutMode>().map_err(anyhow::Error::msg)?),
        Err(_) => None,
    };
    let service = match std::env::var("CHECKOUT_SERVICE").as_deref() {
        Ok("Delivery") => ServiceType::Delivery,
        Ok("Other") => ServiceType::Other,
        _ => ServiceType::PedicabRide,
    };

    println!("CryptoTap Checkout Agent");
    println!("========================");
    println!("Server: {}", base_url);
    println!("Amount: ${} for {}", amount, service);
    println!();

    let client = CheckoutClient::new(&base_url);

    println!("Step 1: Walking the checkout...");
    let receipt = match client.run_checkout(mode, &amount, service).await {
        Ok(view) => view,
        Err(e) => {
            println!("[FAILED] {:#}", e);
            return Ok(());
        }
    };

    if let Some(details) = &receipt.receipt {
        println!("   [OK] Receipt");
        println!("   Service: {}", details.service);
        println!("   Amount:  ${}", details.amount);
        println!("   Status:  {}", details.status);
        println!("   TX Hash: {}", details.tx_hash);
    }
    if let Some(widget) = &receipt.widget {
        println!("   Payment widget: {}", widget.url);
    }
    println!();

    println!("Step 2: Opening transaction history...");
    let history = client.send(receipt.id, &CheckoutEvent::ViewHistory).await?;
    for tx in history.history.unwrap_or_default() {
        println!("   - {} | ${} | {:?} | {}", tx.service, tx.amount, tx.status, tx.created_at);
    }
    println!();

    println!("Step 3: Starting a new payment...");
    let fresh = client.send(receipt.id, &CheckoutEvent::NewPayment).await?;
    println!("   [OK] Back on {} showing ${}", fresh.screen, fresh.display_amount);

    Ok(())
}
