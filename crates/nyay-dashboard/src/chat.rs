//! The two mocked chat panels.
//!
//! Neither panel talks to the server; replies are canned.  The Q&A panel
//! opens on a structured sample answer with source attributions, the
//! drafting panel answers its first prompt with a draft preview and every
//! later prompt with a refinement acknowledgement.

use serde::Serialize;

use crate::panel::PanelKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelRole {
    User,
    Bot,
}

/// A document cited by a bot answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub file: String,
    pub link: String,
    pub preview: String,
    pub title: String,
    /// `judgment`, `statute`, `document`, or anything else the backend sends.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Source {
    /// Title, or the file name when the title is blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.file
        } else {
            &self.title
        }
    }

    /// Preview with control characters stripped.
    pub fn display_preview(&self) -> String {
        self.preview.chars().filter(|c| !c.is_control()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelMessage {
    pub role: PanelRole,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl PanelMessage {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: PanelRole::User,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    fn bot(text: impl Into<String>) -> Self {
        Self {
            role: PanelRole::Bot,
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

const SAMPLE_QUERY: &str = "Explain Section 125 CrPC regarding maintenance of wife.";

const SAMPLE_ANSWER: &str = "Section 125 of the Code of Criminal Procedure (CrPC) in India deals with the maintenance of a wife, children, and parents. Here's a breakdown of the key aspects:\n\n\
**Maintenance under Section 125 CrPC:**\n\n\
1. **Wife:** A wife is entitled to maintenance from her husband if he has sufficient means to maintain her but refuses to do so.\n\
2. **Children:** Both legitimate and illegitimate children are entitled to maintenance from their parents.\n\
3. **Parents:** A person is liable to maintain their parents if they are unable to maintain themselves.";

pub const QA_PROCESSING_REPLY: &str =
    "Thank you for your question. As a legal assistant bot, I am processing this query now...";

pub const DRAFTING_GREETING: &str = "Hello! I'm the Contract Drafting Studio. I can help you draft a custom legal document. Please describe the contract you need (e.g., 'A simple NDA between Acme Corp and Jane Doe') and specify the key terms.";

const NDA_DRAFT: &str = "[Drafting Document...]\n\n\
**DOCUMENT DRAFT - Non-Disclosure Agreement (NDA)**\n\n\
This Non-Disclosure Agreement (\"Agreement\") is made effective [Date] by and between:\n\n\
**1. Disclosing Party:**\nAcme Corporation, located at 123 Main St.\n\n\
**2. Receiving Party:**\nJane Doe, residing at 456 Oak Ave.\n\n\
**3. Purpose:**\nThe parties are entering into a business relationship concerning proprietary technology research (the \"Purpose\").\n\n\
**5. Obligations:**\nThe Receiving Party agrees to use the Confidential Information solely for the Purpose and shall not disclose it to any third party for a period of five (5) years.\n\n\
--- END OF DRAFT PREVIEW ---\n\n\
This preliminary draft is ready. You can download the full file for editing, or you can refine a specific clause by typing your request below.";

/// The canned Q&A exchange the Q&A panel opens on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredAnswer {
    pub query: &'static str,
    pub answer: &'static str,
    pub sources: Vec<Source>,
}

pub fn sample_answer() -> StructuredAnswer {
    StructuredAnswer {
        query: SAMPLE_QUERY,
        answer: SAMPLE_ANSWER,
        sources: sample_sources(),
    }
}

fn sample_sources() -> Vec<Source> {
    vec![Source {
        file: "2023_16_1209_1524_EN.pdf".into(),
        link: "https://drive.google.com/file/d/1qH3G5c0dD2HL9niIgDeySFeCtxiG2fds/view?usp=sharing".into(),
        preview: "150. Matrimonial and child care related bene\u{fb01} ts include the provisions...".into(),
        title: "Maintenance under CrPC".into(),
        kind: "judgment".into(),
    }]
}

/// Transcript of one side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPanel {
    kind: PanelKind,
    messages: Vec<PanelMessage>,
}

impl ChatPanel {
    pub fn new(kind: PanelKind) -> Self {
        let opening = match kind {
            PanelKind::LegalQa => {
                let sample = sample_answer();
                PanelMessage {
                    sources: sample.sources,
                    ..PanelMessage::bot(sample.answer)
                }
            }
            PanelKind::ContractDrafting => PanelMessage::bot(DRAFTING_GREETING),
        };
        Self {
            kind,
            messages: vec![opening],
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn messages(&self) -> &[PanelMessage] {
        &self.messages
    }

    /// Whether the send button is enabled for `input`.
    pub fn can_send(input: &str) -> bool {
        !input.trim().is_empty()
    }

    /// Append the trimmed input and the canned reply.  Blank input is
    /// ignored and returns `None`.
    pub fn send(&mut self, input: &str) -> Option<&PanelMessage> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        let reply = match self.kind {
            PanelKind::LegalQa => QA_PROCESSING_REPLY.to_owned(),
            PanelKind::ContractDrafting if self.messages.len() == 1 => {
                format!("Processing request for: \"{query}\".\n\n{NDA_DRAFT}")
            }
            PanelKind::ContractDrafting => format!(
                "Thank you for your refinement suggestion: \"{query}\". I am updating the draft now. \
                 (Mock refinement complete. The contract structure has been adjusted.)"
            ),
        };

        self.messages.push(PanelMessage::user(query));
        self.messages.push(PanelMessage::bot(reply));
        self.messages.last()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
