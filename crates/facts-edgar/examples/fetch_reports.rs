//! Fetch normalized annual reports for one ticker.
//!
//! Expects a ticker-to-CIK mapping file (the format of
//! `https://www.sec.gov/include/ticker.txt`) at `ticker.txt`.
//!
//! ```sh
//! cargo run --example fetch_reports -- VEEV
//! ```

use facts_edgar::{EdgarClient, LocalFileCikRepository, UserAgent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ticker = std::env::args().nth(1).unwrap_or_else(|| "VEEV".to_string());

    let ciks = LocalFileCikRepository::new("ticker.txt");
    let user_agent = UserAgent::new("Example company", "Jane Doe", "jane.doe@example.com");
    let client = EdgarClient::new(ciks, &user_agent);

    match client.get_reports(&ticker).await? {
        Some(reports) => {
            println!("{ticker} total assets by fiscal year:");
            for (year, assets) in &reports.balance.assets {
                println!("  {year}: {assets}");
            }
            println!("{ticker} revenue by fiscal year:");
            for (year, revenue) in &reports.income.revenue {
                println!("  {year}: {revenue}");
            }
        }
        None => println!("No CIK known for ticker {ticker}"),
    }

    Ok(())
}
