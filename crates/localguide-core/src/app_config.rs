use crate::region::RegionPolicy;

#[derive(Clone)]
pub struct AppConfig {
    pub kakao_api_key: String,
    pub llm_api_key: String,
    pub kakao_base_url: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub region: RegionPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("kakao_api_key", &"[redacted]")
            .field("llm_api_key", &"[redacted]")
            .field("kakao_base_url", &self.kakao_base_url)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("region", &self.region)
            .finish()
    }
}
