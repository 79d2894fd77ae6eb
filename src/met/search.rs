use crate::{
    config,
    met::client::{FetchError, MetClient},
    types::SearchResponse,
};

/// Runs one search query for an artist and returns the matching object ids
/// in upstream order.
///
/// `hasImages=true` prunes records without any raster, `artistOrCulture=true`
/// biases the free-text match toward the artist field. The id list is the
/// sole input to an artist's scan, so this call uses the large retry budget;
/// an error here means the artist cannot be processed at all.
pub async fn search_artist(client: &MetClient, query: &str) -> Result<Vec<i64>, FetchError> {
    let api_url = format!(
        "{uri}/search?hasImages=true&artistOrCulture=true&q={q}",
        uri = client.api_url(),
        q = urlencoding::encode(query)
    );

    let res: SearchResponse = client.fetch_json(&api_url, config::search_retries()).await?;
    Ok(res.object_ids.unwrap_or_default())
}
