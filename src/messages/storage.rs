use super::types::{Message, Role};

/// Ordered message log for the current session
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Role and content pairs in insertion order
    pub fn transcript(&self) -> Vec<(Role, &str)> {
        self.messages
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("hi"));
        conversation.push(Message::ai("hello"));

        assert_eq!(
            conversation.transcript(),
            vec![(Role::User, "hi"), (Role::Ai, "hello")]
        );
    }

    #[test]
    fn test_clear() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("hi"));
        conversation.clear();
        assert!(conversation.is_empty());
        assert!(conversation.last().is_none());
    }
}
