use tallyboard_core::view::TotalsPolicy;

/// Console configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the billing backend (default: `http://localhost:3000/api`).
    pub api_base_url: String,
    /// How the grand total combines revenue and cost.
    pub totals_policy: TotalsPolicy,
}

impl ConsoleConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var         | Default                     |
    /// |-----------------|-----------------------------|
    /// | `API_BASE_URL`  | `http://localhost:3000/api` |
    /// | `TOTALS_POLICY` | `profit-loss`               |
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".into());

        let totals_policy = match std::env::var("TOTALS_POLICY").as_deref() {
            Ok("combined") => TotalsPolicy::CombinedTotal,
            _ => TotalsPolicy::ProfitLoss,
        };

        Self {
            api_base_url,
            totals_policy,
        }
    }
}
