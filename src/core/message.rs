use serde::{Deserialize, Serialize};

/// A chat message as handed to the renderer by the host.
///
/// `body` is raw markdown; the renderer parses it per call. `reply_to`
/// carries the quoted parent for one-level reply previews. When the host
/// is previewing live input, `body` contains the cursor sentinel at the
/// edit position (see [`crate::utils::cursor`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Box<Message>>,
}

impl Message {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            reply_to: None,
        }
    }

    pub fn with_reply_to(mut self, parent: Message) -> Self {
        self.reply_to = Some(Box::new(parent));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_chain_round_trips_through_serde() {
        let msg = Message::new("alice", "hi *there*")
            .with_reply_to(Message::new("bob", "original"));
        let encoded = toml::to_string(&msg).expect("serialize");
        let decoded: Message = toml::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded.sender, "alice");
        assert_eq!(decoded.reply_to.as_ref().map(|m| m.sender.as_str()), Some("bob"));
    }
}
