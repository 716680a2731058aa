use async_trait::async_trait;

use super::{render_preview, ChannelPublisher, PublishError};
use crate::publish::models::{PackageListing, PublishOutcome};

/// Facebook posts carry the full description and a hashtag line.
pub const TEMPLATE: &str = "\
🌍 NEW PACKAGE: {{ title }}
{% if locations_text %}Destination: {{ locations_text }}
{% endif %}Price: ${{ price }} | Duration: {{ duration_days }} days

{{ description }}
{% if highlights %}
What's included:
{% for highlight in highlights %}- {{ highlight }}
{% endfor %}{% endif %}
#travel #holiday #wanderlust";

#[derive(Default)]
pub struct FacebookPublisher;

impl FacebookPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChannelPublisher for FacebookPublisher {
    fn channel(&self) -> &'static str {
        "facebook"
    }

    async fn publish(&self, listing: &PackageListing) -> Result<PublishOutcome, PublishError> {
        render_preview("facebook.txt", self.channel(), listing)
    }
}
