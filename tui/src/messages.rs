//! Message Deck
//!
//! The rotation of messages the demo board cycles through with `n`.
//! Messages from the command line may spell line breaks as a literal `\n`.

/// Shown when no messages are given
pub const DEFAULT_MESSAGES: &[&str] = &[
    "HELLO WORLD",
    "{red}{orange}{yellow}{green}{blue}{violet}\nSPLIT FLAP\nBOARD",
    "DEPARTURES\nLHR 09:45  ON TIME\nCDG 10:10  DELAYED",
    "THE QUICK BROWN FOX\nJUMPS OVER\nTHE LAZY DOG!",
];

/// Turn the two-character escape `\n` into a line break
pub fn unescape(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// A non-empty, wrapping list of messages
#[derive(Clone, Debug)]
pub struct MessageDeck {
    messages: Vec<String>,
    current: usize,
}

impl MessageDeck {
    /// Build from raw arguments, falling back to the defaults when empty
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let messages: Vec<String> = args.into_iter().map(|a| unescape(a.as_ref())).collect();
        if messages.is_empty() {
            Self::default()
        } else {
            Self {
                messages,
                current: 0,
            }
        }
    }

    /// Message on display
    pub fn current(&self) -> &str {
        &self.messages[self.current]
    }

    /// Move to the next message, wrapping
    pub fn advance(&mut self) -> &str {
        self.current = (self.current + 1) % self.messages.len();
        self.current()
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageDeck {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect(),
            current: 0,
        }
    }
}
