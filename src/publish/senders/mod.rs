use async_trait::async_trait;
use once_cell::sync::Lazy;
use tera::{Context, Tera};
use thiserror::Error;

use super::models::{PackageListing, PublishOutcome};

pub mod facebook;
pub mod messenger;
pub mod whatsapp;

/// Message templates for every supported channel, compiled once.
pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("whatsapp.txt", whatsapp::TEMPLATE),
        ("messenger.txt", messenger::TEMPLATE),
        ("facebook.txt", facebook::TEMPLATE),
    ])
    .expect("built-in publish templates must parse");
    tera
});

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Unsupported channel: {0}")]
    UnsupportedChannel(String),
    #[error("Templating error: {0}")]
    TemplatingError(String),
}

/// A trait for formatting a package listing the way one social channel
/// expects it. Implementations render a preview only; none of them deliver.
#[async_trait]
pub trait ChannelPublisher: Send + Sync {
    /// The channel name this publisher answers to, e.g. `"whatsapp"`.
    fn channel(&self) -> &'static str;

    /// Renders the listing into the message this channel would post and
    /// returns it as a simulated outcome.
    async fn publish(&self, listing: &PackageListing) -> Result<PublishOutcome, PublishError>;
}

/// Shared rendering path. Every concrete publisher feeds the same listing
/// context into its own registered template.
pub(super) fn render_preview(
    template_name: &str,
    channel: &str,
    listing: &PackageListing,
) -> Result<PublishOutcome, PublishError> {
    let mut context = Context::new();
    context.insert("title", &listing.title);
    context.insert("price", &format!("{:.2}", listing.price));
    context.insert("duration_days", &listing.duration_days);
    context.insert("highlights", &listing.highlights);
    context.insert("description", &listing.description);
    context.insert("locations_text", &listing.locations_text);

    let preview = TEMPLATES
        .render(template_name, &context)
        .map_err(|e| PublishError::TemplatingError(e.to_string()))?;

    Ok(PublishOutcome {
        channel: channel.to_string(),
        preview,
        simulated: true,
    })
}
