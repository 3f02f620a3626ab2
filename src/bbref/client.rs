use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::pbp::PageFetcher;

/// One player returned by the site search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHit {
    pub name: String,
    /// Site-assigned player ID, e.g. `"ingrabr01"`.
    pub player_id: String,
}

/// One season option from the Shot Finder season dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    /// Year ID, e.g. `"2020"` for the 2019/20 season.
    pub year_id: String,
    pub label: String,
}

/// Client for basketball-reference.com: Shot Finder pages, player search
/// and season listings.
pub struct BbrefClient {
    http: Client,
    base_url: Url,
}

impl BbrefClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent(concat!("shotfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(BbrefClient {
            http,
            base_url: Url::parse(base_url).context("invalid base url")?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Shot Finder query URL for a player; an empty `year_id` spans all
    /// seasons.
    pub fn shot_finder_url(&self, player_id: &str, year_id: &str) -> Result<Url> {
        let mut url = self.base_url.join("/play-index/shot_finder.cgi")?;
        url.query_pairs_mut()
            .append_pair("request", "1")
            .append_pair("match", "play")
            .append_pair("player_id", player_id)
            .append_pair("year_id", year_id)
            .append_pair("order_by", "date_game");
        Ok(url)
    }

    /// Search players by free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<PlayerHit>> {
        let mut url = self.base_url.join("/search/search.fcgi")?;
        url.query_pairs_mut().append_pair("search", query);
        let body = self.get(&url).await?;
        Ok(parse_search_page(&body))
    }

    /// Seasons a player appears in, from the Shot Finder season dropdown.
    pub async fn seasons(&self, player_id: &str) -> Result<Vec<Season>> {
        let mut url = self.base_url.join("/play-index/shot_finder.cgi")?;
        url.query_pairs_mut().append_pair("player_id", player_id);
        let body = self.get(&url).await?;
        Ok(parse_seasons_page(&body))
    }

    async fn get(&self, url: &Url) -> Result<String> {
        debug!("GET {url}");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .context("request failed")?;
        if !resp.status().is_success() {
            anyhow::bail!("HTTP error {} for {url}", resp.status());
        }
        resp.text().await.context("failed to read response body")
    }
}

#[async_trait]
impl PageFetcher for BbrefClient {
    async fn fetch(&self, locator: &Url) -> Result<String> {
        self.get(locator).await
    }

    fn name(&self) -> &str {
        "basketball-reference"
    }
}

/// Decode a search response. The site either renders a results list or
/// redirects straight to the single matching player's page; both shapes
/// resolve to `(name, player_id)` hits.
pub fn parse_search_page(body: &str) -> Vec<PlayerHit> {
    let doc = Html::parse_document(body);
    let strong_sel = Selector::parse("strong").unwrap();
    let a_sel = Selector::parse("a").unwrap();

    let is_results_page = doc
        .select(&strong_sel)
        .any(|s| s.text().collect::<String>().trim() == "Search Results");

    if !is_results_page {
        // Redirect case: the player page itself came back.
        let name_sel = Selector::parse(r#"h1[itemprop="name"]"#).unwrap();
        let Some(name) = doc
            .select(&name_sel)
            .next()
            .map(|h| h.text().collect::<String>().trim().to_string())
        else {
            return Vec::new();
        };
        let overview = format!("{name} Overview");
        let Some(href) = doc
            .select(&a_sel)
            .find(|a| a.text().collect::<String>().trim() == overview)
            .and_then(|a| a.value().attr("href"))
        else {
            return Vec::new();
        };
        return match player_id_from_href(href) {
            Some(player_id) => vec![PlayerHit { name, player_id }],
            None => Vec::new(),
        };
    }

    let item_sel = Selector::parse("div.search-item").unwrap();
    let mut hits = Vec::new();
    for item in doc.select(&item_sel) {
        let Some(anchor) = item.select(&a_sel).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        // The search page mixes players with teams, coaches, etc.
        if !href.contains("players") {
            continue;
        }
        let name = anchor.text().collect::<String>().trim().to_string();
        if let Some(player_id) = player_id_from_href(href) {
            hits.push(PlayerHit { name, player_id });
        }
    }
    hits
}

/// Decode the season dropdown of a Shot Finder page.
pub fn parse_seasons_page(body: &str) -> Vec<Season> {
    let doc = Html::parse_document(body);
    let select_sel = Selector::parse("select").unwrap();
    let option_sel = Selector::parse("option").unwrap();
    let Some(select) = doc.select(&select_sel).next() else {
        return Vec::new();
    };
    select
        .select(&option_sel)
        .map(|option| Season {
            year_id: option.value().attr("value").unwrap_or_default().to_string(),
            label: option.text().collect::<String>().trim().to_string(),
        })
        .collect()
}

/// `"/players/i/ingrabr01.html"` -> `"ingrabr01"`.
fn player_id_from_href(href: &str) -> Option<String> {
    let last = href.trim_end_matches('/').rsplit('/').next()?;
    let id = last.split('.').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
