//! Fetch a random item from the command line

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::archive::{ArchiveClient, MediaItem};
use crate::category::Category;
use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;
use crate::picker::{self, Content, Picker};

#[derive(Args, Debug)]
pub struct RandomArgs {
    /// Category to draw from (repeatable; defaults to the configured set)
    #[arg(short = 'c', long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,

    /// Open the detail page in the system browser
    #[arg(long)]
    pub open: bool,
}

#[derive(Serialize)]
struct RandomResult {
    identifier: String,
    title: String,
    mediatype: Option<String>,
    format: Vec<String>,
    description: Option<String>,
    url: String,
}

impl RandomResult {
    fn new(item: &MediaItem, url: String) -> Self {
        Self {
            identifier: item.identifier.clone(),
            title: item.display_title().to_string(),
            mediatype: item.mediatype.clone(),
            format: item.format.clone(),
            description: item.description_text(),
            url,
        }
    }
}

pub async fn run(args: RandomArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = Config::load()?;

    let categories = if args.categories.is_empty() {
        config.picker.default_categories.clone()
    } else {
        args.categories
    };

    let client = ArchiveClient::new(&config.archive)?;
    let mut picker = Picker::new(&config.archive).with_selection(categories);
    let mut rng = StdRng::from_os_rng();
    tracing::debug!(
        "Selected categories: {:?}",
        picker.selection().collect::<Vec<_>>()
    );

    picker.fetch_random_media(&client, &mut rng).await?;

    match picker::render(&picker).content {
        Content::Frame { url, item } => {
            let result = RandomResult::new(item, url);
            print_formatted(&result, format, format_result);

            if args.open || config.picker.open_in_browser {
                open::that(&result.url)?;
                print_success("Opened in browser", quiet);
            }
            Ok(())
        }
        Content::Error(message) => anyhow::bail!(message),
        Content::Placeholder(message) => {
            print_success(message, quiet);
            Ok(())
        }
    }
}

fn format_result(r: &RandomResult) -> String {
    let mut lines = vec![r.title.clone()];

    if let Some(mediatype) = &r.mediatype {
        lines.push(format!("Type:    {}", mediatype));
    }
    if !r.format.is_empty() {
        lines.push(format!("Format:  {}", r.format.join(", ")));
    }
    lines.push(format!("Details: {}", r.url));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_result() {
        let item = MediaItem {
            identifier: "cat123".to_string(),
            title: None,
            mediatype: Some("image".to_string()),
            description: vec!["A cat.".to_string()],
            format: vec!["JPEG".to_string(), "Thumbnail".to_string()],
        };
        let result = RandomResult::new(&item, "https://archive.org/details/cat123".to_string());

        assert_eq!(result.description.as_deref(), Some("A cat."));
        assert_eq!(
            format_result(&result),
            "cat123\nType:    image\nFormat:  JPEG, Thumbnail\nDetails: https://archive.org/details/cat123"
        );
    }
}
