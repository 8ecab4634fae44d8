use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = env::var("DCMS_API_BASE_URL")?
            .trim_end_matches('/')
            .to_string();
        let api_token = env::var("DCMS_API_TOKEN").ok().filter(|t| !t.is_empty());
        let request_timeout_secs = env::var("DCMS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Self {
            api_base_url,
            api_token,
            request_timeout_secs,
        })
    }
}
