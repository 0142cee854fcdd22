use enrichly_http::{ClientOptions, CompanyQuery, EnrichlyClient, RetryPolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = EnrichlyClient::from_env()?.with_options(ClientOptions {
        timeout_ms: 5_000,
        connect_timeout_ms: 2_000,
        retry: RetryPolicy::new(3, 500),
    });

    let domain = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "enrichly.io".to_owned());

    let response = client
        .enrich_company(&CompanyQuery::by_domain(domain))
        .await?;

    if let Some(company) = response.data {
        println!(
            "{:?} — {:?}, {:?} employees, founded {:?}",
            company.name, company.category, company.employees, company.founded
        );
    } else {
        println!("{} (status {})", response.message, response.status);
    }

    client.close();
    Ok(())
}
