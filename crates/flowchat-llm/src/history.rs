use crate::types::Message;

/// Ordered, append-only message history of one session
///
/// The full history is replayed as context on every request, so insertion
/// order matters. Messages are only handed out by shared reference.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_history_keeps_insertion_order() {
        let mut history = Conversation::new();
        history.push_user("first");
        history.push_assistant("second");
        history.push_user("third");

        let roles: Vec<Role> = history.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(history.last().unwrap().content, "third");
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_empty_assistant_turn_is_kept() {
        let mut history = Conversation::new();
        history.push_user("question");
        history.push_assistant("");

        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap(), &Message::assistant(""));
    }
}
