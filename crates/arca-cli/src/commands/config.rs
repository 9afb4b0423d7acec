use anyhow::Result;
use arca_core::preference::PreferenceKey;
use arca_core::ui::Theme;
use arca_infrastructure::ArcaPaths;
use arca_interaction::GeminiAssistant;
use std::str::FromStr;

use super::Context;

pub fn show(ctx: &Context) -> Result<()> {
    let config = ctx.config();
    let paths = ArcaPaths::new(None);
    println!("config file:   {}", paths.config_file()?.display());
    println!("api_base_url:  {}", config.api_base_url);
    println!("gemini_model:  {}", config.gemini_model);

    let preferences = ctx.preferences()?;
    let key_source = if preferences.get(PreferenceKey::ApiKey)?.is_some() {
        "preferences"
    } else if config.gemini_api_key.is_some() {
        "config"
    } else {
        "none"
    };
    println!("gemini_api_key: {}", key_source);
    Ok(())
}

pub fn set_key(ctx: &Context, key: &str) -> Result<()> {
    let assistant = GeminiAssistant::new(ctx.config(), ctx.preferences()?);
    assistant.set_api_key(key.trim())?;
    println!("Gemini API key saved");
    Ok(())
}

pub fn set_theme(ctx: &Context, theme: &str) -> Result<()> {
    let theme = Theme::from_str(theme)
        .map_err(|_| anyhow::anyhow!("Unknown theme '{}'; expected auto, light or dark", theme))?;
    ctx.store()?.set_theme(theme)?;
    println!("Theme set to {}", theme);
    Ok(())
}

pub fn set_user(ctx: &Context, name: Option<&str>) -> Result<()> {
    let store = ctx.store()?;
    store.set_user(name)?;
    match store.user().get().as_deref() {
        Some(name) => println!("Display name set to {}", name),
        None => println!("Display name cleared"),
    }
    Ok(())
}
