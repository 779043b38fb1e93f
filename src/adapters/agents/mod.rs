//! Engagement capability adapters: scam classification and persona replies.

mod keyword_classifier;
mod scripted;
mod template_responder;

pub use keyword_classifier::KeywordClassifier;
pub use scripted::{ScriptedClassifier, ScriptedResponder};
pub use template_responder::TemplateResponder;
