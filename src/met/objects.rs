use crate::{config, met::client::MetClient, types::MetObject, warning};

/// Fetches one object record, degrading to `None` on any failure.
///
/// Uses the smaller retry budget: a single unfetchable object is not worth
/// stalling the whole run for, the scan just treats it as not qualifying and
/// advances.
pub async fn fetch_object(client: &MetClient, id: i64) -> Option<MetObject> {
    let api_url = format!("{uri}/objects/{id}", uri = client.api_url());

    match client
        .fetch_json::<MetObject>(&api_url, config::object_retries())
        .await
    {
        Ok(obj) => Some(obj),
        Err(e) => {
            warning!("Object {id} unavailable: {e}");
            None
        }
    }
}
