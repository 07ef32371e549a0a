#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: String) -> Message {
        Message { role, content }
    }

    pub fn user(content: impl Into<String>) -> Message {
        Message::new(Role::User, content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Message {
        Message::new(Role::Assistant, content.into())
    }
}

/// Messages of one session, oldest first. Entries are only ever appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> ConversationHistory {
        ConversationHistory::default()
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Moves the messages of `other` to the end, keeping their order.
    pub fn append(&mut self, other: ConversationHistory) {
        self.messages.extend(other.messages);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
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

    #[test]
    fn test_history_keeps_insertion_order() {
        let mut history = ConversationHistory::new();
        assert!(history.is_empty());

        history.push(Message::user("hello"));
        history.push(Message::assistant("hi there"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[0], Message::new(Role::User, "hello".into()));
        assert_eq!(history.last().unwrap().role, Role::Assistant);
        let roles: Vec<Role> = history.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[test]
    fn test_append_keeps_existing_messages() {
        let mut history = ConversationHistory::new();
        history.push(Message::user("first"));
        history.push(Message::assistant("first reply"));

        let mut turn = ConversationHistory::new();
        turn.push(Message::user("second"));
        turn.push(Message::assistant("second reply"));
        history.append(turn);
        history.append(ConversationHistory::new());

        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "first reply", "second", "second reply"]);
    }
}
