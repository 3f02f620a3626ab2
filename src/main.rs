use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use shotfinder::bbref::{season_label, BbrefClient, ShotFinderPage};
use shotfinder::config::Config;
use shotfinder::dataset::Dataset;
use shotfinder::model::{build_estimator, FitOptions, Metrics};
use shotfinder::pbp::{aggregate_from_page, AggregateOptions, PageFetcher, ScrapeError};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let client = BbrefClient::new(&config.base_url)?;

    if let Some(query) = &config.search {
        let hits = client.search(query).await?;
        if hits.is_empty() {
            println!("No players match {query:?}");
            return Ok(());
        }
        for hit in hits {
            println!("{} ({})", hit.name, hit.player_id);
        }
        return Ok(());
    }

    let player_id = config
        .player_id
        .as_deref()
        .context("player id is required")?;

    if config.list_seasons {
        let seasons = client.seasons(player_id).await?;
        if seasons.is_empty() {
            println!("No seasons found for {player_id}");
            return Ok(());
        }
        for season in seasons {
            println!("{:<6} {}", season.year_id, season.label);
        }
        return Ok(());
    }

    let dataset = scrape(&client, &config, player_id).await?;
    info!("Collected {} shot attempts", dataset.len());

    if let Some(path) = &config.export {
        if path.extension().is_some_and(|ext| ext == "json") {
            dataset.write_json(path)?;
        } else {
            dataset.write_csv(path)?;
        }
        info!("Exported dataset to {}", path.display());
    }

    if config.fit {
        let (train, test) = dataset.split(config.test_fraction, config.seed);
        info!(
            "Fitting shot-probability model ({} train / {} test rows)",
            train.len(),
            test.len()
        );
        let estimator = build_estimator(
            &train,
            &config.feature_list(),
            FitOptions {
                max_iters: config.max_iters,
                learning_rate: config.learning_rate,
                l2: config.l2,
            },
        )?;
        let metrics = estimator.evaluate_records(test.records())?;
        print_metrics(&metrics);
    }

    Ok(())
}

/// Fetch the first Shot Finder page, announce the retrieval scope from its
/// header, then walk the remaining pages.
async fn scrape(client: &BbrefClient, config: &Config, player_id: &str) -> Result<Dataset> {
    let start = client.shot_finder_url(player_id, &config.year_id)?;
    let first_page = client
        .fetch(&start)
        .await
        .map_err(ScrapeError::FetchFailed)?;

    let name =
        ShotFinderPage::player_header(&first_page).unwrap_or_else(|| player_id.to_string());
    info!(
        "Retrieving data for {} from {}",
        name,
        season_label(&config.year_id)
    );

    let decoder = ShotFinderPage::new(client.base_url().clone());
    let options = AggregateOptions {
        allow_partial: config.allow_partial,
        cancel: None,
    };
    let records = aggregate_from_page(first_page, client, &decoder, &options).await?;
    Ok(Dataset::from_records(records))
}

fn print_metrics(metrics: &Metrics) {
    let c = &metrics.confusion;
    println!("True Positives | False Positives | True Negatives | False Negatives");
    println!(
        "{:<14} | {:<15} | {:<14} | {}",
        c.true_positives, c.false_positives, c.true_negatives, c.false_negatives
    );
    println!();
    println!("Accuracy:  {:.3}", metrics.accuracy);
    println!("Precision: {:.3}", metrics.precision);
    println!("Recall:    {:.3}", metrics.recall);
}
