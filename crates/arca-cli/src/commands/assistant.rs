use anyhow::Result;
use arca_core::persona::Persona;
use arca_interaction::{GeminiAssistant, ResponseStyle};

use super::Context;

pub async fn dictionary(ctx: &Context, term: &str, perspective: Option<&str>) -> Result<()> {
    let entry = ctx.client().dictionary().lookup(term, perspective).await?;
    println!("{}\n\n{}", entry.termino, entry.definicion);
    Ok(())
}

pub async fn ask(ctx: &Context, question: &str) -> Result<()> {
    let answer = ctx.client().assistant().ask(question).await?;
    println!("{}", answer.respuesta);
    if !answer.fuentes.is_empty() {
        println!("\nFuentes: {}", answer.fuentes.len());
    }
    Ok(())
}

pub async fn chat(
    ctx: &Context,
    message: &str,
    persona: &str,
    context: &str,
    name: Option<String>,
    concise: bool,
) -> Result<()> {
    let persona = Persona::parse_strict(persona)?;
    let assistant = GeminiAssistant::new(ctx.config(), ctx.preferences()?);

    let mut style = ResponseStyle::default();
    if concise {
        style = style.concise();
    }
    if let Some(name) = name {
        style = style.addressing(name);
    }

    match assistant
        .send_message_styled(message, persona, context, &style)
        .await
    {
        Ok(answer) => {
            println!("{}", answer);
            Ok(())
        }
        Err(e) if e.is_missing_api_key() => {
            anyhow::bail!(
                "No Gemini API key configured. Run `arca config set-key <KEY>` or set ARCA_GEMINI_API_KEY."
            )
        }
        Err(e) => Err(e.into()),
    }
}

pub fn personas() {
    for persona in Persona::all() {
        let marker = if persona == Persona::DEFAULT { " (default)" } else { "" };
        println!("{}{}", persona.id(), marker);
    }
}
