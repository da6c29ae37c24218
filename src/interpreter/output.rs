//! Structured command output

/// One block of rendered command output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Section title
    Heading(String),
    /// Plain paragraph
    Text(String),
    /// Highlighted single line (names, titles)
    Accent(String),
    /// Label followed by its detail, e.g. a command and its description
    Entry { label: String, detail: String },
}

/// Output of a single command, an ordered list of blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    blocks: Vec<Block>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single plain paragraph
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with_text(text)
    }

    pub fn with_heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Text(text.into()));
        self
    }

    pub fn with_accent(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Accent(text.into()));
        self
    }

    pub fn with_entry(mut self, label: impl Into<String>, detail: impl Into<String>) -> Self {
        self.blocks.push(Block::Entry {
            label: label.into(),
            detail: detail.into(),
        });
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Flatten to plain text, one block per line
    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Heading(text) | Block::Text(text) | Block::Accent(text) => text.clone(),
                Block::Entry { label, detail } => format!("{:<10} {}", label, detail),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_layout() {
        let output = Output::new()
            .with_heading("Contact:")
            .with_entry("Email:", "contact@example.com");
        assert_eq!(
            output.to_plain_text(),
            "Contact:\nEmail:     contact@example.com"
        );
    }
}
