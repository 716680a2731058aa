use async_trait::async_trait;

use super::{render_preview, ChannelPublisher, PublishError};
use crate::publish::models::{PackageListing, PublishOutcome};

/// Messenger messages stay short and end on a call to action.
pub const TEMPLATE: &str = "\
{{ title }}: {{ duration_days }} days for ${{ price }}
{% if locations_text %}Where: {{ locations_text }}
{% endif %}{% for highlight in highlights %}• {{ highlight }}
{% endfor %}
Tap below to chat with us about this trip.";

#[derive(Default)]
pub struct MessengerPublisher;

impl MessengerPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChannelPublisher for MessengerPublisher {
    fn channel(&self) -> &'static str {
        "messenger"
    }

    async fn publish(&self, listing: &PackageListing) -> Result<PublishOutcome, PublishError> {
        render_preview("messenger.txt", self.channel(), listing)
    }
}
