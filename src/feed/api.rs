use url::Url;

use crate::core::{IcClient, IcError, ListingQuery, PageFuture, PageSource, net};

/// Build the URL for one page of the listing.
///
/// Parameter order is fixed: timeframe, "po", minimum amount, symbol (empty),
/// ordering ("o=fd", by filing date), direction ("d=d", descending), then the page index.
pub fn listing_url(base: &Url, query: &ListingQuery, page: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("t", query.timeframe.code())
        .append_pair("po", "1")
        .append_pair("am", &query.min_amount.to_string())
        .append_pair("sym", "")
        .append_pair("o", "fd")
        .append_pair("d", "d")
        .append_pair("L", &page.to_string());
    url
}

pub(crate) async fn fetch_listing_page(
    client: &IcClient,
    query: &ListingQuery,
    page: u32,
) -> Result<String, IcError> {
    let url = listing_url(client.base_listing(), query, page);
    tracing::debug!(page, %url, "fetching listing page");

    let req = client.http().get(url.clone());
    let resp = client.send_with_retry(req, None).await?;
    if !resp.status().is_success() {
        return Err(IcError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body = net::get_text(resp, "listing", &format!("page{page}"), "html").await?;
    net::debug_dump_page(page, &body);
    Ok(body)
}

impl PageSource for IcClient {
    fn fetch_page<'a>(&'a self, query: &'a ListingQuery, page: u32) -> PageFuture<'a> {
        Box::pin(fetch_listing_page(self, query, page))
    }
}
