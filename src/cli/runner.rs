//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PagingArgs};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::{SearchResult, Video};
use crate::pagination::PageStream;
use crate::query::SearchParam;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Client::new(self.load_config()?)?;
        let start = Instant::now();

        let items = match &self.cli.command {
            Commands::Search {
                query,
                related_to,
                paging,
            } => {
                let mut param = search_param(paging);
                param.query.clone_from(query);
                param.related_to_video.clone_from(related_to);
                self.print_search(client.search(&param)?).await?
            }
            Commands::Popular { paging } => {
                self.print_videos(client.most_popular(&search_param(paging))?)
                    .await?
            }
            Commands::ById { ids } => self.print_videos(client.by_id(ids.iter().cloned())?).await?,
        };

        info!(items, elapsed_ms = start.elapsed().as_millis() as u64, "Done");
        Ok(())
    }

    /// Load configuration: file (if given), then environment, then flags
    pub(crate) fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.merge_env();

        if let Some(key) = &self.cli.api_key {
            config.api_key = Some(key.clone());
            config.oauth_token = None;
        }
        Ok(config)
    }

    async fn print_search(&self, stream: PageStream<SearchResult>) -> Result<u64> {
        match self.cli.format {
            OutputFormat::Json => self.print_json(stream).await,
            OutputFormat::Pretty => {
                print_lines(stream, |r| {
                    Ok(format!(
                        "{}\t{}\t{}",
                        r.resource_id().unwrap_or("-"),
                        r.snippet.channel_title,
                        r.snippet.title
                    ))
                })
                .await
            }
        }
    }

    async fn print_videos(&self, stream: PageStream<Video>) -> Result<u64> {
        match self.cli.format {
            OutputFormat::Json => self.print_json(stream).await,
            OutputFormat::Pretty => {
                print_lines(stream, |v| {
                    Ok(format!("{}\t{:>12}\t{}", v.id, v.view_count(), v.snippet.title))
                })
                .await
            }
        }
    }

    async fn print_json<T: Serialize>(&self, stream: PageStream<T>) -> Result<u64> {
        print_lines(stream, render_json::<T>).await
    }
}

fn render_json<T: Serialize>(item: &T) -> Result<String> {
    Ok(serde_json::to_string(item)?)
}

/// Print one line per item; stops at the first error page or render failure
async fn print_lines<T, F>(mut stream: PageStream<T>, render: F) -> Result<u64>
where
    F: Fn(&T) -> Result<String>,
{
    let mut count = 0;
    while let Some(page) = stream.next_page().await {
        for item in page.into_result()? {
            println!("{}", render(&item)?);
            count += 1;
        }
    }
    Ok(count)
}

fn search_param(paging: &PagingArgs) -> SearchParam {
    let mut param = SearchParam::new().max_page(paging.max_pages);
    param.max_results_per_page = paging.page_size;
    for (key, value) in &paging.filters {
        param = param.filter(key, value);
    }
    param
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::{RawResponse, Transport};
    use crate::types::Endpoint;
    use async_trait::async_trait;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::Arc;

    /// Answers every request with the same single-page video listing
    struct OneVideoPage;

    #[async_trait]
    impl Transport for OneVideoPage {
        async fn execute(
            &self,
            _endpoint: Endpoint,
            _params: &[(String, String)],
        ) -> Result<RawResponse> {
            Ok(RawResponse::ok(r#"{"items": [{"id": "a"}, {"id": "b"}]}"#))
        }
    }

    #[test]
    fn test_search_param_from_paging() {
        let paging = PagingArgs {
            max_pages: 3,
            page_size: Some(20),
            filters: vec![("order".into(), "date".into())],
        };
        let param = search_param(&paging);
        assert_eq!(param.max_page, 3);
        assert_eq!(param.max_results_per_page, Some(20));
        assert_eq!(param.filters.get("order").map(String::as_str), Some("date"));
    }

    #[test]
    fn test_load_config_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: from-file\nchannel_capacity: 3").unwrap();

        let cli = Cli::try_parse_from([
            "youtube-pager",
            "--config",
            file.path().to_str().unwrap(),
            "--api-key",
            "from-flag",
            "popular",
        ])
        .unwrap();
        let config = Runner::new(cli).load_config().unwrap();

        assert_eq!(config.api_key.as_deref(), Some("from-flag"));
        assert_eq!(config.oauth_token, None);
        assert_eq!(config.channel_capacity, 3);
    }

    #[test]
    fn test_render_json_reports_serialization_failure() {
        let mut bad = std::collections::HashMap::new();
        bad.insert((1, 2), "tuple keys are not valid JSON object keys");

        let err = render_json(&bad).unwrap_err();
        assert!(matches!(err, Error::JsonParse(_)));
        assert!(err.is_decode());

        assert_eq!(render_json(&vec!["a", "b"]).unwrap(), r#"["a","b"]"#);
    }

    #[tokio::test]
    async fn test_print_lines_stops_on_render_error() {
        let client =
            Client::with_transport(Arc::new(OneVideoPage), ClientConfig::default()).unwrap();
        let stream = client.by_id(["a", "b"]).unwrap();

        let err = print_lines(stream, |_: &Video| Err(Error::decode("unprintable")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unprintable"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let cli = Cli::try_parse_from([
            "youtube-pager",
            "--config",
            "/nonexistent/youtube-pager.yaml",
            "popular",
        ])
        .unwrap();
        assert!(Runner::new(cli).load_config().is_err());
    }
}
