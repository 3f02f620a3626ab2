use clap::Parser;
use std::path::PathBuf;

/// basketball-reference.com Shot Finder scraper and shot-probability model
#[derive(Parser, Debug, Clone)]
#[command(name = "shotfinder", version, about)]
pub struct Config {
    /// Search players by name, print the matches and exit
    #[arg(long)]
    pub search: Option<String>,

    /// Site-assigned player ID (e.g. "ingrabr01")
    #[arg(long, env = "PLAYER_ID")]
    pub player_id: Option<String>,

    /// Year ID narrowing the scrape to one season (e.g. "2020" for the
    /// 2019/20 season); empty scrapes all seasons
    #[arg(long, env = "YEAR_ID", default_value = "")]
    pub year_id: String,

    /// List the player's seasons and exit
    #[arg(long)]
    pub list_seasons: bool,

    /// Export the dataset to this path (.json writes JSON, anything else CSV)
    #[arg(long, env = "EXPORT_PATH")]
    pub export: Option<PathBuf>,

    /// Site base URL
    #[arg(
        long,
        env = "BBREF_BASE_URL",
        default_value = "https://www.basketball-reference.com"
    )]
    pub base_url: String,

    /// Keep the rows collected before a mid-run fetch failure instead of
    /// failing the whole scrape
    #[arg(long, env = "ALLOW_PARTIAL", default_value = "false")]
    pub allow_partial: bool,

    /// Fit and evaluate the shot-probability model after scraping
    #[arg(long)]
    pub fit: bool,

    /// Comma-separated feature columns for the model
    #[arg(long, env = "FEATURES", default_value = "home,distance,type,assisted")]
    pub features: String,

    /// Held-out fraction for model evaluation (0.0–1.0 exclusive)
    #[arg(long, env = "TEST_FRACTION", default_value = "0.25")]
    pub test_fraction: f64,

    /// Gradient-descent iterations
    #[arg(long, env = "MAX_ITERS", default_value = "500")]
    pub max_iters: usize,

    /// Initial gradient-descent learning rate
    #[arg(long, env = "LEARNING_RATE", default_value = "0.1")]
    pub learning_rate: f64,

    /// L2 regularization strength
    #[arg(long, env = "L2", default_value = "0.0001")]
    pub l2: f64,

    /// Shuffle seed for the train/test split
    #[arg(long, env = "SPLIT_SEED", default_value = "42")]
    pub seed: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.search.is_none() && self.player_id.is_none() {
            anyhow::bail!("either --search or --player-id is required");
        }
        if self.search.is_some() && self.player_id.is_some() {
            anyhow::bail!("--search and --player-id are mutually exclusive");
        }
        if self.list_seasons && self.player_id.is_none() {
            anyhow::bail!("--list-seasons requires --player-id");
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            anyhow::bail!("test_fraction must be strictly between 0.0 and 1.0");
        }
        if self.learning_rate <= 0.0 {
            anyhow::bail!("learning_rate must be positive");
        }
        if self.l2 < 0.0 {
            anyhow::bail!("l2 must be non-negative");
        }
        if self.fit && self.feature_list().is_empty() {
            anyhow::bail!("--fit requires at least one feature column");
        }
        Ok(())
    }

    /// Feature names from the comma-separated `--features` value.
    pub fn feature_list(&self) -> Vec<String> {
        self.features
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config::parse_from(["shotfinder", "--player-id", "ingrabr01"])
    }

    #[test]
    fn player_id_mode_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn search_and_player_id_are_mutually_exclusive() {
        let config = Config::parse_from([
            "shotfinder",
            "--search",
            "brandon i",
            "--player-id",
            "ingrabr01",
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn one_of_search_or_player_id_is_required() {
        let mut config = base_config();
        config.player_id = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fraction_bounds_are_enforced() {
        let mut config = base_config();
        config.test_fraction = 1.0;
        assert!(config.validate().is_err());
        config.test_fraction = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn feature_list_splits_and_trims() {
        let mut config = base_config();
        config.features = "home, distance ,type,,assisted".to_string();
        assert_eq!(
            config.feature_list(),
            vec!["home", "distance", "type", "assisted"]
        );
    }
}
