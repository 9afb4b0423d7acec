//! Prompt composition for persona-framed questions.
//!
//! The rendered prompt has four segments in a fixed order: the user's context
//! (capped at [`MAX_CONTEXT_CHARS`]), the persona instruction, optional
//! response-style directives, and the literal question. Changing the order,
//! headings or cap changes model output and must bump
//! [`PROMPT_TEMPLATE_VERSION`].

use arca_core::persona::Persona;
use arca_core::{ArcaError, Result};
use minijinja::{Environment, context};

/// Hard cap on embedded context, in characters.
pub const MAX_CONTEXT_CHARS: usize = 5000;

/// Version of the prompt contract rendered by [`PromptComposer`].
pub const PROMPT_TEMPLATE_VERSION: u32 = 1;

const PERSONA_PROMPT_TEMPLATE: &str = r#"CONTEXTO DEL USUARIO (Notas/Lectura actual):
"{{ context }}"

INSTRUCCIÓN DE CONTROL:
{{ instruction }}
{% if directives %}

ESTILO DE RESPUESTA:
{% for directive in directives %}
- {{ directive }}
{% endfor %}
{% endif %}

PREGUNTA DEL USUARIO:
{{ message }}"#;

/// Optional directives shaping the answer's register.
///
/// The default adds no directives, which reproduces the plain persona prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseStyle {
    /// Ask for a short, direct answer
    pub concise: bool,
    /// Address the user by this name
    pub display_name: Option<String>,
    /// Scale the answer's length to the question's complexity
    pub adaptive_length: bool,
}

impl ResponseStyle {
    pub fn concise(mut self) -> Self {
        self.concise = true;
        self
    }

    pub fn addressing(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.display_name = (!name.trim().is_empty()).then_some(name);
        self
    }

    pub fn adaptive_length(mut self) -> Self {
        self.adaptive_length = true;
        self
    }

    /// Directive sentences in render order.
    pub fn directives(&self) -> Vec<String> {
        let mut directives = Vec::new();
        if self.concise {
            directives.push(
                "Responde de forma concisa y directa, sin rodeos innecesarios.".to_string(),
            );
        }
        if let Some(name) = &self.display_name {
            directives.push(format!("Dirígete al usuario por su nombre: {}.", name.trim()));
        }
        if self.adaptive_length {
            directives.push(
                "Ajusta la extensión de tu respuesta a la complejidad de la pregunta: breve para preguntas sencillas, más desarrollada para preguntas profundas."
                    .to_string(),
            );
        }
        directives
    }
}

/// Returns the leading [`MAX_CONTEXT_CHARS`] characters of `context`.
pub fn truncate_context(context: &str) -> &str {
    match context.char_indices().nth(MAX_CONTEXT_CHARS) {
        Some((byte_index, _)) => &context[..byte_index],
        None => context,
    }
}

/// Renders persona prompts.
pub struct PromptComposer {
    env: Environment<'static>,
}

impl PromptComposer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        Self { env }
    }

    pub fn compose(
        &self,
        persona: Persona,
        context: &str,
        message: &str,
        style: &ResponseStyle,
    ) -> Result<String> {
        self.env
            .render_str(
                PERSONA_PROMPT_TEMPLATE,
                context! {
                    context => truncate_context(context),
                    instruction => persona.instruction(),
                    directives => style.directives(),
                    message => message,
                },
            )
            .map_err(|e| ArcaError::Template(e.to_string()))
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}
