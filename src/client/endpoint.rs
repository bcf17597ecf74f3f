use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Server resources, relative to the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Sentences,
    CustomWords,
    Slots,
    Train,
    SpeechToText,
    TextToIntent,
    TextToSpeech,
    Restart,
    ListenForCommand,
    Profile,
    Lookup,
    Version,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Sentences => "sentences",
            Self::CustomWords => "custom-words",
            Self::Slots => "slots",
            Self::Train => "train",
            Self::SpeechToText => "speech-to-text",
            Self::TextToIntent => "text-to-intent",
            Self::TextToSpeech => "text-to-speech",
            Self::Restart => "restart",
            Self::ListenForCommand => "listen-for-command",
            Self::Profile => "profile",
            Self::Lookup => "lookup",
            Self::Version => "version",
        }
    }
}

/// Values grouped by slot name.
pub type Slots = BTreeMap<String, Vec<String>>;

/// Which settings `GET /profile` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileLayers {
    /// User settings merged over the defaults.
    #[default]
    All,
    /// Only what the user's profile overrides.
    Profile,
}

impl ProfileLayers {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Profile => "profile",
        }
    }
}

/// Answer of the pronunciation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLookup {
    /// Whether the word is in the base dictionary.
    pub in_dictionary: bool,
    /// Known or guessed pronunciations, best first.
    pub pronunciations: Vec<String>,
}

/// Ensures the base URL ends with `/` so endpoint paths land below it.
pub(crate) fn normalize_base(api_url: &str) -> String {
    let mut base = api_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}
