//! Registry and routing for the text-completion models the optimizer accepts.
//!
//! The optimizer routes a model identifier to a backend family by substring
//! and applies that backend's retry profile. The launcher only consults the
//! registry to warn about identifiers the optimizer will not recognize; an
//! unregistered model is not a launch failure.

/// Model identifiers the optimizer ships routing for.
pub const REGISTERED_LLMS: &[&str] = &[
    "gpt-4-1106-preview",
    "gpt-4-0125-preview",
    "gpt-4-turbo-preview",
    "gpt-4-turbo",
    "gpt-4-turbo-2024-04-09",
    "claude-2.1",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
    "huggingface/codellama/CodeLlama-7b-hf",
    "gemma-2-9b-it",
    "gemma-2-27b-it",
    "gemma-3-27b-it",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
];

/// Backend family a model identifier routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    OpenAi,
    Anthropic,
    Gemini,
    HuggingFace,
}

impl ModelBackend {
    /// Retry budget (attempts, sleep seconds) the optimizer uses per backend.
    pub fn retry_profile(&self) -> (u32, u64) {
        match self {
            ModelBackend::OpenAi => (5, 60),
            ModelBackend::Anthropic => (100, 5),
            ModelBackend::Gemini => (5, 30),
            ModelBackend::HuggingFace => (1, 0),
        }
    }
}

/// Route a model identifier to its backend family, if any.
pub fn backend_for(model: &str) -> Option<ModelBackend> {
    if model.contains("gpt-4") {
        Some(ModelBackend::OpenAi)
    } else if model.contains("claude") {
        Some(ModelBackend::Anthropic)
    } else if model.contains("gemma") || model.contains("gemini") {
        Some(ModelBackend::Gemini)
    } else if model.contains("huggingface") {
        Some(ModelBackend::HuggingFace)
    } else {
        None
    }
}

/// Whether the optimizer ships this identifier in its registry.
pub fn is_registered(model: &str) -> bool {
    REGISTERED_LLMS.contains(&model)
}
