use async_trait::async_trait;

use super::{render_preview, ChannelPublisher, PublishError};
use crate::publish::models::{PackageListing, PublishOutcome};

/// WhatsApp favors compact broadcast messages with bold markers.
pub const TEMPLATE: &str = "\
*{{ title }}*
{% if locations_text %}📍 {{ locations_text }}
{% endif %}💰 ${{ price }} · {{ duration_days }} days
{% for highlight in highlights %}✓ {{ highlight }}
{% endfor %}
{{ description }}

Reply to this message to book your spot!";

#[derive(Default)]
pub struct WhatsAppPublisher;

impl WhatsAppPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChannelPublisher for WhatsAppPublisher {
    fn channel(&self) -> &'static str {
        "whatsapp"
    }

    async fn publish(&self, listing: &PackageListing) -> Result<PublishOutcome, PublishError> {
        render_preview("whatsapp.txt", self.channel(), listing)
    }
}
