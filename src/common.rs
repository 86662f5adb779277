use crate::config::Config;
use crate::types::TargetLength;
use clap::Args;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Override the configured model
    #[arg(short, long, help = "Override the configured model for this run")]
    pub model: Option<String>,

    /// Cap on generated tokens
    #[arg(long = "max-tokens", help = "Cap the number of tokens generated for the rewrite")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(
        short,
        long,
        help = "Sampling temperature between 0.0 and 2.0 (ignored by some models)"
    )]
    pub temperature: Option<f32>,
}

impl CommonParams {
    /// Apply command-line overrides to a loaded configuration
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.model.clone_from(model);
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = Some(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            config.temperature = Some(temperature);
        }
    }
}

/// Validates that a target-length hint is one of the known variants
pub fn target_length_parser(s: &str) -> Result<TargetLength, String> {
    s.parse::<TargetLength>().map_err(|_| {
        format!(
            "Invalid length '{}'. Available lengths: {}",
            s,
            TargetLength::all_names().join(", ")
        )
    })
}
