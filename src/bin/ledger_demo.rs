//! Walkthrough of the wallet ledger operations.
//!
//! Runs against an in-memory store, so every run starts clean.

use anyhow::Result;
use dotenv::dotenv;
use rust_decimal::Decimal;

use kartpay_wallet_ledger::{
    CardPaymentRequest, CreditRequest, DebitRequest, HistoryFilter, LedgerConfig, NewCardDetails,
    PeerTransferRequest, WalletLedger,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = LedgerConfig::from_env();
    println!("KartPay Wallet Ledger Demo:\n");
    println!("  Default transaction limit: {}", config.default_transaction_limit);
    println!("  Card starting allowance:   {}\n", config.card_starting_allowance);

    let ledger = WalletLedger::in_memory(config);

    let alice = ledger.open_account("Alice", "alice@example.com").await?;
    let bob = ledger.open_account("Bob", "bob@example.com").await?;
    println!("Opened accounts for {} and {}", alice.email, bob.email);

    // Top up and save a card in one operation
    let request = CreditRequest {
        new_card: Some(NewCardDetails {
            number: "4242 4242 4242 4242".to_string(),
            expiry: "12/27".to_string(),
            cvv: Some("123".to_string()),
        }),
        save_card: true,
        ..CreditRequest::new(Decimal::from(500))
    };
    let snapshot = ledger.credit(&alice.id, request).await?;
    let card = snapshot.cards[0].clone();
    println!("Credited 500 and saved {} (balance {})", card.label(), card.balance);

    ledger.debit(&alice.id, DebitRequest::new(Decimal::from(200))).await?;
    println!("Debited 200");

    let snapshot = ledger
        .credit(
            &alice.id,
            CreditRequest::from_card(Decimal::from(50), card.id.clone()),
        )
        .await?;
    println!(
        "Moved 50 from {} into the wallet (card now {})",
        card.label(),
        snapshot.cards[0].balance
    );

    ledger
        .pay_from_card(&alice.id, CardPaymentRequest::new(card.id.clone(), Decimal::from(75)))
        .await?;
    println!("Paid 75 directly from {}", card.label());

    ledger
        .send_to_peer(
            &alice.id,
            PeerTransferRequest::new("bob@example.com", Decimal::from(100)),
        )
        .await?;
    println!("Sent 100 to {}\n", bob.email);

    let alice_snapshot = ledger.account(&alice.id).await?;
    let bob_snapshot = ledger.account(&bob.id).await?;
    println!("Balances:");
    println!("  {}: {}", alice_snapshot.email, alice_snapshot.balance);
    println!("  {}: {}\n", bob_snapshot.email, bob_snapshot.balance);

    println!("History for {} (most recent first):", alice_snapshot.email);
    for entry in ledger.history(&alice.id, HistoryFilter::default()).await? {
        println!(
            "  [{}] {:<7} {:>8}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.kind.to_string(),
            entry.amount,
            entry.description
        );
    }

    let spent = ledger.total_spent(&alice.id, None, None).await?;
    println!("\nTotal spent by {}: {}", alice_snapshot.email, spent);

    Ok(())
}
