use mentor_train::{report, Client, TrainOutcome};

#[tokio::main]
async fn main() -> mentor_train::Result<()> {
    let client = Client::from_env()?;
    let pathway = std::env::var("MENTOR_PATHWAY").unwrap_or_default();
    let result = client
        .documents()
        .train_from_path("syracuse", "jasidel", &pathway, "README.md")
        .await;
    let outcome = TrainOutcome::from_result(result)?;
    report::write_outcome(&mut std::io::stdout(), &outcome)?;
    Ok(())
}
