//! Turning a resolved run into a chat embed.

pub mod diff;
pub mod embed;
pub mod labels;

use chrono::{TimeZone, Utc};

use self::diff::render_sections;
use self::embed::{Embed, EmbedAuthor, EmbedFooter, COLOR_FAILURE, COLOR_INFO, COLOR_SUCCESS};
use self::labels::Icons;
use crate::github::CommitInfo;
use crate::results::feed::Feed;
use crate::results::resolve::Resolved;
use crate::results::PRIMARY_REPOSITORY;

/// Browsing URLs for the repositories that appear in run `versions`.
const REPOSITORY_URLS: &[(&str, &str)] = &[
    ("serenity", "https://github.com/SerenityOS/serenity"),
    ("test262", "https://github.com/tc39/test262"),
    ("test262-parser-tests", "https://github.com/tc39/test262-parser-tests"),
    ("wasm-testsuite", "https://github.com/WebAssembly/testsuite"),
];

pub fn repository_url(name: &str) -> Option<&'static str> {
    REPOSITORY_URLS
        .iter()
        .find(|(repository, _)| *repository == name)
        .map(|(_, url)| *url)
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

/// Short hash, hyperlinked when the repository is known.
pub fn commit_link(repository: &str, hash: &str) -> String {
    match repository_url(repository) {
        Some(url) => format!("[`{}`]({}/commit/{})", short_hash(hash), url, hash),
        None => format!("`{}`", short_hash(hash)),
    }
}

fn rfc3339(seconds: i64) -> Option<String> {
    Utc.timestamp_opt(seconds, 0).single().map(|t| t.to_rfc3339())
}

/// The diff report for a resolved run.
pub fn report_embed(feed: Feed, resolved: &Resolved<'_>, commit: &CommitInfo, icons: &Icons) -> Embed {
    let target = resolved.target;
    let sections = render_sections(target, resolved.previous, icons);

    let mut description = vec![format!("**{}**", commit.headline), String::new()];
    for (repository, hash) in &target.versions {
        description.push(format!("{}: {}", repository, commit_link(repository, hash)));
    }
    if let Some(hash) = resolved.previous.and_then(|run| run.primary_commit()) {
        description.push(format!("Compared to: {}", commit_link(PRIMARY_REPOSITORY, hash)));
    }

    let regressed = sections.iter().any(|s| s.percentage_change < 0.0);

    let mut embed = Embed::new(feed.title())
        .description(description.join("\n"))
        .color(if regressed { COLOR_FAILURE } else { COLOR_SUCCESS });
    embed.url = Some(commit.html_url.clone());
    embed.timestamp = rfc3339(target.run_timestamp);
    embed.author = Some(EmbedAuthor {
        name: commit.author_name.clone(),
        url: commit.author_url.clone(),
        icon_url: commit.author_avatar_url.clone(),
    });
    embed.footer = rfc3339(target.commit_timestamp).map(|committed| EmbedFooter {
        text: format!("Committed {}", committed),
    });

    sections
        .into_iter()
        .fold(embed, |embed, section| embed.field(section.header, section.body))
}

/// Reference listing of every known label and its icon.
pub fn legend_embed(icons: &Icons) -> Embed {
    Embed::new("Result labels")
        .description(labels::legend(icons).join("\n"))
        .color(COLOR_INFO)
}

/// A one-field error report.
pub fn error_embed(message: impl Into<String>) -> Embed {
    Embed::new("Error").color(COLOR_FAILURE).field("Error", message)
}
