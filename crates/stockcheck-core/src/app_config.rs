use std::path::PathBuf;

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    /// Text file with one product page URL per line.
    pub input_path: PathBuf,
    /// Directory receiving per-product and summary spreadsheets.
    pub output_dir: PathBuf,
    pub graphql_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Pause between consecutive products; never applied after the last one.
    pub inter_product_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Skip TLS certificate validation for every request. Insecure; opt-in only.
    pub accept_invalid_certs: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("input_path", &self.input_path)
            .field("output_dir", &self.output_dir)
            .field("graphql_url", &self.graphql_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_product_delay_ms", &self.inter_product_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field(
                "accept_invalid_certs",
                &if self.accept_invalid_certs {
                    "enabled (INSECURE)"
                } else {
                    "disabled"
                },
            )
            .finish()
    }
}
