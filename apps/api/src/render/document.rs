//! Block document: the laid-out content of a PDF before it is turned into Typst markup.

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Title style (resume name).
    Title(String),
    /// Section-heading style.
    Heading(String),
    /// One body-style paragraph.
    Paragraph(String),
    /// A multi-line item kept together on the page, e.g. one job or one degree.
    Entry { lines: Vec<String>, space_after_pt: f32 },
    /// Vertical gap in points.
    Spacer(f32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// PDF metadata title.
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn heading(&mut self, text: &str) {
        self.push(Block::Heading(text.to_string()));
    }

    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.push(Block::Paragraph(text.into()));
    }

    pub fn spacer(&mut self, points: f32) {
        self.push(Block::Spacer(points));
    }

    /// Adds an entry block from its lines. Blank lines are dropped; an entry with no
    /// remaining lines is not emitted at all.
    pub fn entry<I>(&mut self, lines: I, space_after_pt: f32)
    where
        I: IntoIterator<Item = String>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect();
        if !lines.is_empty() {
            self.push(Block::Entry {
                lines,
                space_after_pt,
            });
        }
    }
}

#[cfg(test)]
impl Document {
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Content blocks (everything except spacers) that follow `heading`, up to the next heading.
    pub fn section(&self, heading: &str) -> Vec<&Block> {
        self.blocks
            .iter()
            .skip_while(|b| !matches!(b, Block::Heading(h) if h == heading))
            .skip(1)
            .take_while(|b| !matches!(b, Block::Heading(_)))
            .filter(|b| !matches!(b, Block::Spacer(_)))
            .collect()
    }
}
