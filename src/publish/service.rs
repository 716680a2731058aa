use tracing::info;

use super::models::{PackageListing, PublishOutcome};
use super::senders::{
    facebook::FacebookPublisher, messenger::MessengerPublisher, whatsapp::WhatsAppPublisher,
    ChannelPublisher, PublishError,
};

/// Dispatches a publish request to the matching channel implementation.
#[derive(Default)]
pub struct PublishService;

impl PublishService {
    pub fn new() -> Self {
        Self
    }

    pub fn supported_channels(&self) -> &'static [&'static str] {
        &["whatsapp", "messenger", "facebook"]
    }

    pub async fn publish(
        &self,
        channel: &str,
        listing: &PackageListing,
    ) -> Result<PublishOutcome, PublishError> {
        let outcome = match channel {
            "whatsapp" => WhatsAppPublisher::new().publish(listing).await?,
            "messenger" => MessengerPublisher::new().publish(listing).await?,
            "facebook" => FacebookPublisher::new().publish(listing).await?,
            other => return Err(PublishError::UnsupportedChannel(other.to_string())),
        };

        info!(
            channel = outcome.channel,
            title = listing.title,
            "simulated publish, nothing was delivered"
        );

        Ok(outcome)
    }
}
