//! Checkout link construction.
//!
//! Deterministic: the same bucket and data always yield the same URL.

use thiserror::Error;
use url::Url;

use crate::bucket::Bucket;
use crate::catalog::Catalog;
use crate::state::{SessionData, KEY_EMAIL, KEY_FIRST_NAME};

pub const UTM_SOURCE: &str = "sensei_bot";
pub const UTM_CAMPAIGN: &str = "skr";

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The configured destination template is not a URL. Deployment defect.
    #[error("checkout destination for bucket '{bucket}' is not a valid URL ({template}): {source}")]
    MalformedDestination {
        bucket: Bucket,
        template: String,
        #[source]
        source: url::ParseError,
    },
}

/// Build the outbound checkout URL for `bucket`, prefilled from `data`.
///
/// Sets `email` and `name` when present, then the bucket's `tag` and the
/// campaign parameters. Same-named parameters already in the template are
/// replaced; everything else in the template is preserved.
pub fn build_checkout_link(
    catalog: &Catalog,
    bucket: Bucket,
    data: &SessionData,
) -> Result<Url, CheckoutError> {
    let product = catalog.product(bucket);
    let mut url =
        Url::parse(&product.checkout_url).map_err(|source| CheckoutError::MalformedDestination {
            bucket,
            template: product.checkout_url.clone(),
            source,
        })?;

    let mut params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    if let Some(email) = data.get(KEY_EMAIL) {
        set_param(&mut params, "email", email);
    }
    if let Some(name) = data.get(KEY_FIRST_NAME) {
        set_param(&mut params, "name", name);
    }
    set_param(&mut params, "tag", &product.tag);
    set_param(&mut params, "utm_source", UTM_SOURCE);
    set_param(&mut params, "utm_campaign", UTM_CAMPAIGN);

    url.query_pairs_mut().clear().extend_pairs(&params);
    Ok(url)
}

/// Replace the first `key` pair in place and drop any later duplicates, or
/// append when absent.
fn set_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    match params.iter().position(|(k, _)| k == key) {
        Some(idx) => {
            params[idx].1 = value.to_string();
            let mut seen = 0usize;
            params.retain(|(k, _)| {
                if k != key {
                    return true;
                }
                seen += 1;
                seen == 1
            });
        }
        None => params.push((key.to_string(), value.to_string())),
    }
}
