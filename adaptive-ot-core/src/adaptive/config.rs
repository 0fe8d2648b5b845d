use derive_builder::Builder;

use crate::group::SchnorrGroup;

/// Default upper bound on the byte length of a single grid entry.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 4096;

/// Adaptive OT sender configuration.
#[derive(Debug, Clone, Builder)]
pub struct SenderConfig {
    /// The DDH group the protocol runs over.
    #[builder(default = "SchnorrGroup::modp_2048()")]
    group: SchnorrGroup,
    /// Upper bound on the byte length of a single grid entry.
    #[builder(default = "DEFAULT_MAX_MESSAGE_LEN")]
    max_message_len: usize,
}

impl SenderConfig {
    /// Creates a new builder for SenderConfig.
    pub fn builder() -> SenderConfigBuilder {
        SenderConfigBuilder::default()
    }

    /// The DDH group the protocol runs over.
    pub fn group(&self) -> &SchnorrGroup {
        &self.group
    }

    /// Upper bound on the byte length of a single grid entry.
    pub fn max_message_len(&self) -> usize {
        self.max_message_len
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            group: SchnorrGroup::modp_2048(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

/// Adaptive OT receiver configuration.
#[derive(Debug, Clone, Builder)]
pub struct ReceiverConfig {
    /// The group the receiver expects the sender to publish. Constructed
    /// independently and compared against the ingested parameters.
    #[builder(default = "SchnorrGroup::modp_2048()")]
    group: SchnorrGroup,
}

impl ReceiverConfig {
    /// Creates a new builder for ReceiverConfig.
    pub fn builder() -> ReceiverConfigBuilder {
        ReceiverConfigBuilder::default()
    }

    /// The group the receiver expects the sender to publish.
    pub fn group(&self) -> &SchnorrGroup {
        &self.group
    }
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            group: SchnorrGroup::modp_2048(),
        }
    }
}
