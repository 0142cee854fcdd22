use enrichly_http::{EnrichlyClient, PersonQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = EnrichlyClient::from_env()?;

    let email = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "kit@example.com".to_owned());

    let response = client.enrich_person(&PersonQuery::by_email(email)).await?;

    match response.data {
        Some(profile) => println!(
            "{:?} — {:?} at {:?} (likelihood {:?})",
            profile.full_name, profile.title, profile.organization, profile.likelihood
        ),
        None => println!("{} (status {})", response.message, response.status),
    }

    client.close();
    Ok(())
}
