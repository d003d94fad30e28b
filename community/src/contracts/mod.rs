pub mod login;
pub mod register;
pub mod suggest_event;

use anyhow::Context;
use url::Url;

fn endpoint(api_base: &Url, path: &str) -> anyhow::Result<Url> {
    let host = api_base.as_str().trim_end_matches('/');
    Url::parse(&format!("{host}{path}")).with_context(|| format!("Failed to parse url for {path}"))
}
