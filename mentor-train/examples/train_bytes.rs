use mentor_train::types::documents::TrainDocumentRequest;
use mentor_train::Client;

#[tokio::main]
async fn main() -> mentor_train::Result<()> {
    let client = Client::builder()
        .api_token_file("api_credentials.txt")
        .timeout(300)
        .build()?;

    let request = TrainDocumentRequest::new(
        "25223e76-fc94-4cc2-aec1-f9fb51f0c2bf",
        b"Office hours move to Thursday afternoons.".to_vec(),
    )
    .with_name("announcement.txt");

    match client.documents().train("syracuse", "jasidel", &request).await {
        Ok(response) => println!("queued task {:?}", response.task_id),
        Err(err) => eprintln!("request failed: {err}"),
    }
    Ok(())
}
