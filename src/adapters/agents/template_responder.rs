//! Template Responder - canned persona replies, no external model.
//!
//! Keeps the scammer engaged with persona-voiced stock lines, rotated by
//! conversation turn so consecutive replies differ. Suitable as the default
//! wiring and as the fallback while an upstream model is unavailable.

use async_trait::async_trait;

use crate::domain::session::Persona;
use crate::ports::{PersonaResponder, ResponderError, TranscriptMessage};

const ELDERLY_LINES: &[&str] = &[
    "Oh dear, this sounds serious. I'm not very good with these phone things, can you explain it again slowly?",
    "My grandson usually helps me with the bank. What do you need from me exactly?",
    "I wrote down what you said last time but I lost the paper. Could you send the details once more?",
    "Is this about my pension account? I get so confused with all these numbers.",
];

const PROFESSIONAL_LINES: &[&str] = &[
    "I'm in back-to-back meetings today. Can you send me the exact account details so I can forward them to finance?",
    "Before I approve anything I need the full reference number and a callback line.",
    "Our process requires written confirmation. Which number or link should I use?",
    "I can action this by end of day if you give me the complete payment instructions.",
];

const NOVICE_LINES: &[&str] = &[
    "Wait, I've never done this before. What app do I open first?",
    "Sorry, which number am I supposed to send it to? Can you type it out?",
    "It's asking me for some details, can you tell me exactly what to enter?",
    "I think I did it wrong. Can you send me the link again?",
];

/// [`PersonaResponder`] backed by per-persona stock lines.
#[derive(Debug, Default, Clone)]
pub struct TemplateResponder;

impl TemplateResponder {
    pub fn new() -> Self {
        Self
    }

    fn lines(persona: Persona) -> &'static [&'static str] {
        match persona {
            Persona::Elderly => ELDERLY_LINES,
            Persona::Professional => PROFESSIONAL_LINES,
            Persona::Novice => NOVICE_LINES,
        }
    }
}

#[async_trait]
impl PersonaResponder for TemplateResponder {
    async fn respond(
        &self,
        _text: &str,
        persona: Persona,
        history: &[TranscriptMessage],
    ) -> Result<String, ResponderError> {
        let lines = Self::lines(persona);
        // Rotate by transcript length so back-to-back turns get fresh lines.
        let line = lines[history.len() % lines.len()];
        Ok(line.to_string())
    }
}
