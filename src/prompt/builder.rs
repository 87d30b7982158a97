//! Section-based prompt construction
//!
//! Sections render in insertion order and facts keep their insertion order,
//! so identical builder calls always produce byte-identical text.

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Persona and the task it is given
    Role { persona: String, task: String },
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Ordered key-value facts under a header
    Facts {
        header: String,
        items: Vec<(String, String)>,
    },
    /// Bulleted list under a header; empty lists render a placeholder
    List { header: String, items: Vec<String> },
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Focus enforcement with restrictions
    Focus {
        target: String,
        restrictions: Vec<String>,
    },
    /// Constraints on the answer's shape
    OutputFormat(Vec<String>),
}

/// Placeholder bullet for an empty list
const EMPTY_ITEM: &str = "(없음)";

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, persona: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            persona: persona.to_string(),
            task: task.to_string(),
        });
        self
    }

    pub fn objectives(mut self, objectives: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.into_iter().map(String::from).collect(),
        ));
        self
    }

    pub fn facts(mut self, header: &str, items: Vec<(&str, String)>) -> Self {
        self.sections.push(PromptSection::Facts {
            header: header.to_string(),
            items: items
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        });
        self
    }

    pub fn list(mut self, header: &str, items: Vec<String>) -> Self {
        self.sections.push(PromptSection::List {
            header: header.to_string(),
            items,
        });
        self
    }

    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.to_string(),
        });
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    pub fn focus(mut self, target: &str, restrictions: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Focus {
            target: target.to_string(),
            restrictions: restrictions.into_iter().map(String::from).collect(),
        });
        self
    }

    pub fn output_format(mut self, rules: Vec<&str>) -> Self {
        self.sections.push(PromptSection::OutputFormat(
            rules.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { persona, task } => {
                    prompt.push_str("<ROLE>\n");
                    prompt.push_str(&format!("당신은 {}입니다. 과제: {}\n", persona, task));
                    prompt.push_str("</ROLE>\n\n");
                }
                PromptSection::Objectives(objectives) => {
                    prompt.push_str("<OBJECTIVES>\n");
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push_str("</OBJECTIVES>\n\n");
                }
                PromptSection::Facts { header, items } => {
                    prompt.push_str(&format!("# {}\n\n", header));
                    for (key, value) in items {
                        prompt.push_str(&format!("**{}**: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::List { header, items } => {
                    prompt.push_str(&format!("## {}\n\n", header));
                    if items.is_empty() {
                        prompt.push_str(&format!("- {}\n", EMPTY_ITEM));
                    }
                    for item in items {
                        prompt.push_str(&format!("- {}\n", item));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Focus {
                    target,
                    restrictions,
                } => {
                    prompt.push_str("<FOCUS>\n");
                    prompt.push_str(&format!("중요: 다음 대상에만 집중하세요: {}\n", target));
                    for restriction in restrictions {
                        prompt.push_str(&format!("- {}\n", restriction));
                    }
                    prompt.push_str("</FOCUS>\n\n");
                }
                PromptSection::OutputFormat(rules) => {
                    prompt.push_str("<OUTPUT_FORMAT>\n");
                    for rule in rules {
                        prompt.push_str(&format!("- {}\n", rule));
                    }
                    prompt.push_str("</OUTPUT_FORMAT>\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}
