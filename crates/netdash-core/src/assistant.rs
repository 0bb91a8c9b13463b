// ── Simulated networking assistant ──

use crate::error::CoreError;
use crate::model::ChatMessage;

pub(crate) const GREETING: &str = "Hello! I'm your networking AI assistant. I can help you with \
Cisco commands, troubleshooting, and network analysis. How can I assist you today?";

const RESPONSES: [&str; 4] = [
    "To check interface status on a Cisco CBS350, use 'show interfaces status'. This will display \
     port status, VLAN assignments, and link speeds.",
    "For VLAN troubleshooting, start with 'show vlan' to see VLAN configuration, then 'show \
     interfaces switchport' for port assignments.",
    "The device appears to be experiencing connectivity issues. I recommend checking physical \
     connections first, then verifying IP configuration.",
    "Based on your network topology, I suggest implementing spanning-tree protocol to prevent \
     loops. Use 'show spanning-tree' to check current status.",
];

/// Chat transcript plus the reply rotation.
#[derive(Debug, Clone)]
pub struct Assistant {
    transcript: Vec<ChatMessage>,
    next_reply: usize,
    listening: bool,
}

impl Assistant {
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(GREETING)],
            next_reply: 0,
            listening: false,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Append the user's message. The reply is delivered separately.
    pub fn post_user(&mut self, text: &str) -> Result<(), CoreError> {
        if text.trim().is_empty() {
            return Err(CoreError::validation("message text is empty"));
        }
        self.transcript.push(ChatMessage::user(text));
        Ok(())
    }

    /// Append the next canned reply and return it.
    pub fn deliver_reply(&mut self) -> &ChatMessage {
        let content = RESPONSES[self.next_reply % RESPONSES.len()];
        self.next_reply = self.next_reply.wrapping_add(1);
        self.transcript.push(ChatMessage::assistant(content));
        &self.transcript[self.transcript.len() - 1]
    }

    pub fn toggle_voice(&mut self) -> bool {
        self.listening = !self.listening;
        self.listening
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}
